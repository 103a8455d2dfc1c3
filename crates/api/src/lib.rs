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
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod config;
mod error;
mod http;
mod request_response;
mod transport;

#[cfg(test)]
mod tests;

pub use config::{ClientConfig, DEFAULT_API_ROOT};
pub use error::{ApiError, ApiResult};
pub use http::HttpQueueApi;
pub use request_response::{
    ErrorBody, JoinGroupRequest, JoinResponse, MeResponse, QueueEntryDto, QueueResponse,
    RegionSuggestionDto, RegionTimeResponse, ResolveResponse, TimezoneVariantDto, UserDto,
};
pub use transport::QueueApi;
