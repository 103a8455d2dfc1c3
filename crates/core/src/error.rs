// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use defense_queue_api::ApiError;
use defense_queue_domain::DomainError;

/// Errors produced by the join workflow and the queue view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// The join code was empty. No call was made.
    MissingJoinCode,
    /// The resolver returned zero variants.
    RegionNotFound {
        /// The region text that was resolved.
        region: String,
    },
    /// The resolve call failed.
    ResolutionTransport(ApiError),
    /// The join call failed.
    JoinTransport(ApiError),
    /// A pick was made against a sequence that is no longer held.
    ///
    /// This indicates a bug in the UI layer and is never shown to a user.
    StaleSelectionIndex {
        /// The index that was requested.
        index: usize,
        /// The length of the currently held sequence (0 when nothing is held).
        len: usize,
    },
    /// The queue view requires the teacher role.
    NotTeacher {
        /// The role the server reported.
        role: String,
    },
    /// Loading the queue or the current user failed.
    QueueTransport(ApiError),
    /// A domain rule was violated.
    DomainViolation(DomainError),
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingJoinCode => write!(f, "Join code is required"),
            Self::RegionNotFound { region } => write!(f, "Region '{region}' not found"),
            Self::ResolutionTransport(err) | Self::JoinTransport(err) | Self::QueueTransport(err) => {
                write!(f, "{err}")
            }
            Self::StaleSelectionIndex { index, len } => {
                write!(
                    f,
                    "Selection index {index} is out of bounds for {len} held variants"
                )
            }
            Self::NotTeacher { role } => {
                write!(f, "Teacher role required, signed in as '{role}'")
            }
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::EmptyJoinCode => Self::MissingJoinCode,
            other => Self::DomainViolation(other),
        }
    }
}
