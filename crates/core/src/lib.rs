// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod coordinator;
mod error;
mod messages;
mod picker;
mod queue_view;
mod resolver;
mod suggest;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use coordinator::{
    CoordinatorConfig, JoinCoordinator, JoinForm, JoinOutcome, JoinPhase, JoinSurface,
    Settlement, StatusLine,
};
pub use error::CoreError;
pub use messages::{JoinStatus, QueueStatus, empty_queue_text};
pub use picker::{AmbiguityPicker, PendingSelection, option_text};
pub use queue_view::{
    MISSING_VALUE, QUEUE_COLUMNS, TeacherQueue, queue_row_cells, render_queue_row,
    render_queue_rows,
};
pub use resolver::{DEFAULT_RESOLVE_LIMIT, RegionResolver, classify};
pub use suggest::{
    DEFAULT_DEBOUNCE, DEFAULT_SUGGESTION_LIMIT, SuggestionBatch, SuggestionConfig,
    SuggestionSource, search_suggestions,
};
