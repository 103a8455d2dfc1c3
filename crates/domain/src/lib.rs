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

mod error;
mod escape;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use error::DomainError;
pub use escape::escape_html;
pub use types::{
    CurrentUser, JoinCode, JoinRequest, MSK_UTC_OFFSET_HOURS, MskOffset, QueueEntry,
    RegionQuery, RegionSuggestion, ResolutionResult, StatusLanguage, TimezonePlacement,
    TimezoneVariant, UserRole,
};
pub use validation::{MIN_SEARCH_CHARS, is_searchable, region_text_matches};
