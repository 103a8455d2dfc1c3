// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

/// Errors produced while talking to the queue service.
///
/// The `Display` output is the message shown to the user: the server's
/// `detail` verbatim when present, otherwise a generic status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The server answered with a non-2xx status.
    Http {
        /// The HTTP status code.
        status: u16,
        /// The `detail` field of the error body, if any.
        detail: Option<String>,
    },
    /// The request never produced a response (connection, timeout, TLS).
    Transport {
        /// A description of the failure.
        message: String,
    },
    /// A 2xx response did not have the expected shape.
    Decode {
        /// A description of the mismatch.
        message: String,
    },
}

impl ApiError {
    /// Returns the HTTP status code, if the server responded.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Transport { .. } | Self::Decode { .. } => None,
        }
    }

    /// Returns the message to show on a status line.
    ///
    /// This is the server's `detail` verbatim when present, else `HTTP <status>`,
    /// else the transport or decode description.
    #[must_use]
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Http {
                detail: Some(detail),
                ..
            } => f.write_str(detail),
            Self::Http {
                status,
                detail: None,
            } => write!(f, "HTTP {status}"),
            Self::Transport { message } => f.write_str(message),
            Self::Decode { message } => write!(f, "Unexpected response: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Result alias used throughout the API layer.
pub type ApiResult<T> = Result<T, ApiError>;
