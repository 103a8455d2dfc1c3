// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::time::Duration;

/// Default versioned API root of a locally running service.
pub const DEFAULT_API_ROOT: &str = "http://127.0.0.1:8000/api/v1";

/// Connection settings for [`crate::HttpQueueApi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Versioned API root, e.g. `https://queue.example.org/api/v1`.
    pub api_root: String,
    /// Bearer token sent with every call except region search.
    pub token: Option<String>,
    /// Per-request timeout. `None` leaves it to the HTTP client.
    pub request_timeout: Option<Duration>,
}

impl ClientConfig {
    /// Creates a configuration for the given API root with no token.
    #[must_use]
    pub fn new(api_root: &str) -> Self {
        Self {
            api_root: api_root.trim_end_matches('/').to_string(),
            token: None,
            request_timeout: None,
        }
    }

    /// Sets the bearer token.
    #[must_use]
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.trim().is_empty());
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Joins a path below the API root.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.api_root)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_ROOT)
    }
}
