// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Teacher-side queue table.
//!
//! Rows are rendered in the order the server returns them. Every
//! interpolated field is HTML-escaped.

use std::fmt::Write as _;
use std::sync::Arc;

use defense_queue_api::{MeResponse, QueueApi, QueueResponse};
use defense_queue_domain::{CurrentUser, QueueEntry, StatusLanguage, UserRole, escape_html};
use tracing::{debug, warn};

use crate::coordinator::StatusLine;
use crate::error::CoreError;
use crate::messages::{QueueStatus, empty_queue_text};

/// Shown in place of a missing value.
pub const MISSING_VALUE: &str = "—";

/// Number of columns in the queue table.
pub const QUEUE_COLUMNS: usize = 5;

/// Returns the display name, region, MSK offset and position cells of a row,
/// unescaped.
#[must_use]
pub fn queue_row_cells(entry: &QueueEntry) -> [String; 4] {
    let display_name: &str = if entry.display_name.is_empty() {
        MISSING_VALUE
    } else {
        &entry.display_name
    };
    [
        display_name.to_string(),
        entry
            .region
            .clone()
            .unwrap_or_else(|| MISSING_VALUE.to_string()),
        entry
            .msk_offset
            .map_or_else(|| MISSING_VALUE.to_string(), |offset| offset.hours().to_string()),
        entry
            .position
            .map_or_else(|| MISSING_VALUE.to_string(), |position| position.to_string()),
    ]
}

/// Renders one `<tr>`; `index` is zero-based and shown one-based.
#[must_use]
pub fn render_queue_row(index: usize, entry: &QueueEntry) -> String {
    let mut row: String = format!("<tr><td class=\"text-muted\">{}</td>", index + 1);
    for cell in queue_row_cells(entry) {
        let _ = write!(row, "<td>{}</td>", escape_html(&cell));
    }
    row.push_str("</tr>");
    row
}

/// Renders the table body for `entries`.
///
/// An empty queue renders one placeholder row spanning every column.
#[must_use]
pub fn render_queue_rows(entries: &[QueueEntry], language: StatusLanguage) -> String {
    if entries.is_empty() {
        return format!(
            "<tr><td colspan=\"{QUEUE_COLUMNS}\" class=\"text-muted\">{}</td></tr>",
            escape_html(empty_queue_text(language))
        );
    }
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| render_queue_row(index, entry))
        .collect::<Vec<String>>()
        .join("\n")
}

/// Loads and renders one group's queue for a teacher.
#[derive(Debug)]
pub struct TeacherQueue<A> {
    api: Arc<A>,
    language: StatusLanguage,
    user: Option<CurrentUser>,
    entries: Vec<QueueEntry>,
}

impl<A: QueueApi> TeacherQueue<A> {
    /// Creates a view with no user loaded and an empty queue.
    #[must_use]
    pub const fn new(api: Arc<A>, language: StatusLanguage) -> Self {
        Self {
            api,
            language,
            user: None,
            entries: Vec::new(),
        }
    }

    /// Fetches the signed-in user and checks that they are a teacher.
    ///
    /// # Errors
    ///
    /// - `CoreError::QueueTransport` if the call fails
    /// - `CoreError::NotTeacher` if the user has any other role
    pub async fn load_current_user(&mut self) -> Result<&CurrentUser, CoreError> {
        let response: MeResponse = self
            .api
            .current_user()
            .await
            .map_err(CoreError::QueueTransport)?;
        let role: String = response.user.role.clone();
        let user: CurrentUser =
            CurrentUser::try_from(response).map_err(|_| CoreError::NotTeacher { role: role.clone() })?;
        if user.role != UserRole::Teacher {
            warn!(role, "Queue view requested by a non-teacher");
            return Err(CoreError::NotTeacher { role });
        }
        debug!(name = %user.full_name, "Loaded teacher");
        Ok(self.user.insert(user))
    }

    /// Reloads the queue of `group_id` and returns the rendered rows.
    ///
    /// The teacher check runs first if no user has been loaded yet. The status
    /// line shows progress and is cleared on success.
    ///
    /// # Errors
    ///
    /// - `CoreError::NotTeacher` if the signed-in user is not a teacher
    /// - `CoreError::QueueTransport` if a call fails
    pub async fn refresh<S: StatusLine + Send>(
        &mut self,
        group_id: i64,
        status: &mut S,
    ) -> Result<String, CoreError> {
        status.set_status(&QueueStatus::Refreshing.text(self.language));

        if self.user.is_none() {
            if let Err(e) = self.load_current_user().await {
                status.set_status(&QueueStatus::Failed(e.to_string()).text(self.language));
                return Err(e);
            }
        }

        let response: QueueResponse = match self.api.group_queue(group_id).await {
            Ok(response) => response,
            Err(e) => {
                warn!(group_id, error = %e, "Failed to load queue");
                status.set_status(&QueueStatus::Failed(e.user_message()).text(self.language));
                return Err(CoreError::QueueTransport(e));
            }
        };

        self.entries = response.queue.into_iter().map(QueueEntry::from).collect();
        debug!(group_id, rows = self.entries.len(), "Queue loaded");
        status.set_status(&QueueStatus::Loaded.text(self.language));
        Ok(render_queue_rows(&self.entries, self.language))
    }

    /// Returns the signed-in user, once loaded.
    #[must_use]
    pub const fn current_user(&self) -> Option<&CurrentUser> {
        self.user.as_ref()
    }

    /// Returns the rows of the last successful refresh.
    #[must_use]
    pub fn entries(&self) -> &[QueueEntry] {
        &self.entries
    }
}
