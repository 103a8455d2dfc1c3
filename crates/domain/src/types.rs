// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::{OffsetDateTime, UtcOffset};

/// Moscow time is fixed at UTC+3.
pub const MSK_UTC_OFFSET_HOURS: i32 = 3;

/// A free-text region entered by the student.
///
/// The value is trimmed on construction but otherwise left as typed;
/// normalization is the server's job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct RegionQuery {
    value: String,
}

impl RegionQuery {
    /// Creates a new `RegionQuery` from raw input.
    ///
    /// # Arguments
    ///
    /// * `raw` - The text as typed (surrounding whitespace is removed)
    #[must_use]
    pub fn new(raw: &str) -> Self {
        Self {
            value: raw.trim().to_string(),
        }
    }

    /// Returns the trimmed text.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns whether the query is empty after trimming.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Returns the number of characters (not bytes) in the query.
    ///
    /// Region names are mostly Cyrillic, so byte length would overcount.
    #[must_use]
    pub fn char_len(&self) -> usize {
        self.value.chars().count()
    }
}

impl std::fmt::Display for RegionQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.value)
    }
}

/// A join code identifying a teacher's group.
///
/// A `JoinCode` is never empty; construct it through [`JoinCode::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JoinCode {
    value: String,
}

impl JoinCode {
    /// Parses a join code from raw input.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptyJoinCode` if the input is empty after trimming.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let trimmed: &str = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyJoinCode);
        }
        Ok(Self {
            value: trimmed.to_string(),
        })
    }

    /// Returns the join code value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Offset from Moscow time, in whole hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MskOffset(i32);

impl MskOffset {
    /// Creates a new offset.
    #[must_use]
    pub const fn new(hours: i32) -> Self {
        Self(hours)
    }

    /// Returns the offset in hours.
    #[must_use]
    pub const fn hours(self) -> i32 {
        self.0
    }

    /// Converts this MSK offset into a UTC offset.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidMskOffset` if the resulting UTC offset
    /// falls outside the range `time` can represent.
    pub fn to_utc_offset(self) -> Result<UtcOffset, DomainError> {
        let utc_hours: i32 = self
            .0
            .checked_add(MSK_UTC_OFFSET_HOURS)
            .ok_or(DomainError::InvalidMskOffset { hours: self.0 })?;
        let hours: i8 =
            i8::try_from(utc_hours).map_err(|_| DomainError::InvalidMskOffset { hours: self.0 })?;
        UtcOffset::from_hms(hours, 0, 0).map_err(|_| DomainError::InvalidMskOffset { hours: self.0 })
    }
}

/// Formats with an explicit sign for non-negative offsets: `+3`, `+0`, `-2`.
impl std::fmt::Display for MskOffset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:+}", self.0)
    }
}

/// One candidate mapping from a region name to a timezone.
///
/// Variants are produced by the resolve endpoint and are immutable once
/// constructed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TimezoneVariant {
    region: String,
    label: Option<String>,
    msk_offset: MskOffset,
    utc_offset_hours: Option<i32>,
    fias_code: Option<String>,
}

impl TimezoneVariant {
    /// Creates a variant with no label, UTC offset or area code.
    ///
    /// # Arguments
    ///
    /// * `region` - The canonical region name
    /// * `msk_offset` - Offset from Moscow time
    #[must_use]
    pub fn new(region: &str, msk_offset: MskOffset) -> Self {
        Self {
            region: region.to_string(),
            label: None,
            msk_offset,
            utc_offset_hours: None,
            fias_code: None,
        }
    }

    /// Attaches a human-readable label.
    #[must_use]
    pub fn with_label(mut self, label: Option<String>) -> Self {
        self.label = label;
        self
    }

    /// Attaches the UTC offset reported by the server.
    #[must_use]
    pub fn with_utc_offset_hours(mut self, hours: Option<i32>) -> Self {
        self.utc_offset_hours = hours;
        self
    }

    /// Attaches the canonical area code.
    #[must_use]
    pub fn with_fias_code(mut self, fias_code: Option<String>) -> Self {
        self.fias_code = fias_code;
        self
    }

    /// Returns the canonical region name.
    #[must_use]
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Returns the label, if the server supplied one.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Returns the offset from Moscow time.
    #[must_use]
    pub const fn msk_offset(&self) -> MskOffset {
        self.msk_offset
    }

    /// Returns the UTC offset in hours, if the server supplied one.
    #[must_use]
    pub const fn utc_offset_hours(&self) -> Option<i32> {
        self.utc_offset_hours
    }

    /// Returns the canonical area code, if any.
    #[must_use]
    pub fn fias_code(&self) -> Option<&str> {
        self.fias_code.as_deref()
    }

    /// Computes the local wall-clock time in this region at the given instant.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidMskOffset` if the offset is out of range.
    pub fn local_time_at(&self, instant: OffsetDateTime) -> Result<OffsetDateTime, DomainError> {
        Ok(instant.to_offset(self.msk_offset.to_utc_offset()?))
    }
}

/// Outcome of resolving a region string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionResult {
    /// No variant matched.
    None,
    /// Exactly one variant matched and no choice is required.
    Single(TimezoneVariant),
    /// The user must pick one of these variants. Order is the server's.
    Ambiguous(Vec<TimezoneVariant>),
}

impl ResolutionResult {
    /// Returns a short name for logging.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Single(_) => "single",
            Self::Ambiguous(_) => "ambiguous",
        }
    }
}

/// Timezone fields attached to a join request.
///
/// Region and offset travel together; there is no way to build one without
/// the other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimezonePlacement {
    /// The canonical region name.
    pub region: String,
    /// Offset from Moscow time.
    pub msk_offset: MskOffset,
}

/// A request to join a group's queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinRequest {
    join_code: JoinCode,
    placement: Option<TimezonePlacement>,
}

impl JoinRequest {
    /// Creates a request for unconditional queue membership (no timezone weighting).
    #[must_use]
    pub const fn unconditional(join_code: JoinCode) -> Self {
        Self {
            join_code,
            placement: None,
        }
    }

    /// Creates a request weighted by the given variant's region and offset.
    #[must_use]
    pub fn for_variant(join_code: JoinCode, variant: &TimezoneVariant) -> Self {
        Self {
            join_code,
            placement: Some(TimezonePlacement {
                region: variant.region().to_string(),
                msk_offset: variant.msk_offset(),
            }),
        }
    }

    /// Returns the join code.
    #[must_use]
    pub const fn join_code(&self) -> &JoinCode {
        &self.join_code
    }

    /// Returns the timezone placement, if any.
    #[must_use]
    pub const fn placement(&self) -> Option<&TimezonePlacement> {
        self.placement.as_ref()
    }
}

/// One row of a group's queue as reported by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueEntry {
    /// The participant's display name.
    pub display_name: String,
    /// The region the participant joined with, if any.
    pub region: Option<String>,
    /// The participant's MSK offset, if any.
    pub msk_offset: Option<MskOffset>,
    /// The server-computed priority, if any.
    pub position: Option<i32>,
}

/// A single autocomplete suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RegionSuggestion {
    /// The suggested region name.
    pub region: String,
}

/// Role of an authenticated user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserRole {
    /// Creates groups and manages their queues.
    Teacher,
    /// Joins queues.
    Student,
}

impl UserRole {
    /// Returns the wire representation of this role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Teacher => "teacher",
            Self::Student => "student",
        }
    }
}

impl FromStr for UserRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "teacher" => Ok(Self::Teacher),
            "student" => Ok(Self::Student),
            _ => Err(DomainError::UnknownRole(s.to_string())),
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The authenticated user as reported by `/auth/me`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    /// The user's full name.
    pub full_name: String,
    /// The user's role.
    pub role: UserRole,
}

/// Language used for user-facing status text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StatusLanguage {
    /// English.
    #[default]
    English,
    /// Russian, the working language of the classroom UI.
    Russian,
}

impl StatusLanguage {
    /// Returns the short label for Moscow time in this language.
    #[must_use]
    pub const fn msk_label(self) -> &'static str {
        match self {
            Self::English => "MSK",
            Self::Russian => "МСК",
        }
    }
}

impl FromStr for StatusLanguage {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Self::English),
            "ru" | "russian" => Ok(Self::Russian),
            _ => Err(DomainError::UnknownLanguage(s.to_string())),
        }
    }
}
