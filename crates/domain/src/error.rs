// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The join code is empty after trimming.
    EmptyJoinCode,
    /// The MSK offset cannot be expressed as a UTC offset.
    InvalidMskOffset {
        /// The offending offset in hours.
        hours: i32,
    },
    /// The role reported by the server is not recognized.
    UnknownRole(String),
    /// The status language code is not recognized.
    UnknownLanguage(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyJoinCode => write!(f, "Join code cannot be empty"),
            Self::InvalidMskOffset { hours } => {
                write!(f, "MSK offset {hours:+} is outside the valid UTC range")
            }
            Self::UnknownRole(role) => write!(f, "Unknown user role: '{role}'"),
            Self::UnknownLanguage(code) => {
                write!(f, "Unknown status language '{code}'. Expected 'en' or 'ru'")
            }
        }
    }
}

impl std::error::Error for DomainError {}
