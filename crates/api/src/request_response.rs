// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! These DTOs mirror the JSON exchanged with the service and are distinct
//! from domain types. Conversions into domain types live next to each DTO.

use defense_queue_domain::{
    CurrentUser, DomainError, JoinRequest, MskOffset, QueueEntry, RegionSuggestion,
    TimezoneVariant, UserRole,
};
use serde::{Deserialize, Serialize};

/// One element of the `/timezones/search` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionSuggestionDto {
    /// The suggested region name.
    pub region: String,
}

impl From<RegionSuggestionDto> for RegionSuggestion {
    fn from(dto: RegionSuggestionDto) -> Self {
        Self { region: dto.region }
    }
}

/// A timezone variant as returned by `/timezones/resolve`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimezoneVariantDto {
    /// The canonical region name.
    pub region: String,
    /// Optional human-readable label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Offset from Moscow time in hours.
    pub msk_offset_hours: i32,
    /// Offset from UTC in hours.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utc_offset_hours: Option<i32>,
    /// Canonical area code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fias_code: Option<String>,
}

impl From<TimezoneVariantDto> for TimezoneVariant {
    fn from(dto: TimezoneVariantDto) -> Self {
        Self::new(&dto.region, MskOffset::new(dto.msk_offset_hours))
            .with_label(dto.label.filter(|label| !label.is_empty()))
            .with_utc_offset_hours(dto.utc_offset_hours)
            .with_fias_code(dto.fias_code)
    }
}

/// Response of `/timezones/resolve`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResolveResponse {
    /// The region text as received by the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_region: Option<String>,
    /// Whether the server requires the user to choose, even for one variant.
    #[serde(default)]
    pub needs_choice: bool,
    /// Candidate variants in the server's preferred order.
    #[serde(default)]
    pub variants: Vec<TimezoneVariantDto>,
}

/// Body of `POST /groups/join`.
///
/// `region` and `msk_offset_hours` are either both present or both absent;
/// the only constructor is the conversion from a domain [`JoinRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JoinGroupRequest {
    /// The group's join code.
    pub join_code: String,
    /// The canonical region name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Offset from Moscow time in hours.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msk_offset_hours: Option<i32>,
}

impl From<&JoinRequest> for JoinGroupRequest {
    fn from(request: &JoinRequest) -> Self {
        let placement = request.placement();
        Self {
            join_code: request.join_code().value().to_string(),
            region: placement.map(|p| p.region.clone()),
            msk_offset_hours: placement.map(|p| p.msk_offset.hours()),
        }
    }
}

/// Join confirmation returned by `POST /groups/join`.
///
/// Every field is optional so that a sparse confirmation still decodes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct JoinResponse {
    /// Participant identifier.
    #[serde(default)]
    pub id: Option<i64>,
    /// Group identifier.
    #[serde(default)]
    pub group_id: Option<i64>,
    /// Display name recorded for the participant.
    #[serde(default)]
    pub display_name: Option<String>,
    /// Region recorded for the participant.
    #[serde(default)]
    pub region: Option<String>,
    /// MSK offset recorded for the participant.
    #[serde(default)]
    pub msk_offset_hours: Option<i32>,
    /// Server-computed priority.
    #[serde(default)]
    pub position: Option<i32>,
    /// Join timestamp (ISO 8601).
    #[serde(default)]
    pub joined_at: Option<String>,
}

/// One row of `/groups/{id}/queue`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueEntryDto {
    /// Participant display name.
    #[serde(default)]
    pub display_name: Option<String>,
    /// Region, if the participant joined with one.
    #[serde(default)]
    pub region: Option<String>,
    /// MSK offset, if the participant joined with a region.
    #[serde(default)]
    pub msk_offset_hours: Option<i32>,
    /// Server-computed priority.
    #[serde(default)]
    pub position: Option<i32>,
}

impl From<QueueEntryDto> for QueueEntry {
    fn from(dto: QueueEntryDto) -> Self {
        Self {
            display_name: dto.display_name.unwrap_or_default(),
            region: dto.region.filter(|region| !region.is_empty()),
            msk_offset: dto.msk_offset_hours.map(MskOffset::new),
            position: dto.position,
        }
    }
}

/// Response of `/groups/{id}/queue`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QueueResponse {
    /// Queue rows in server order.
    #[serde(default)]
    pub queue: Vec<QueueEntryDto>,
}

/// The `user` object of `/auth/me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDto {
    /// Full name.
    pub full_name: String,
    /// Role as a lowercase string.
    pub role: String,
}

/// Response of `/auth/me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeResponse {
    /// The authenticated user.
    pub user: UserDto,
}

impl TryFrom<MeResponse> for CurrentUser {
    type Error = DomainError;

    fn try_from(response: MeResponse) -> Result<Self, Self::Error> {
        let role: UserRole = response.user.role.parse()?;
        Ok(Self {
            full_name: response.user.full_name,
            role,
        })
    }
}

/// Response of `/timezones/now`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionTimeResponse {
    /// Canonical region name.
    pub region: String,
    /// Canonical area code.
    #[serde(default)]
    pub fias_code: Option<String>,
    /// Offset from Moscow time in hours.
    pub msk_offset_hours: i32,
    /// Offset from UTC in hours.
    #[serde(default)]
    pub utc_offset_hours: Option<i32>,
    /// Human-readable label.
    #[serde(default)]
    pub label: Option<String>,
    /// Current Moscow time, `YYYY-MM-DD HH:MM:SS`.
    pub msk_time: String,
    /// Current local time in the region, `YYYY-MM-DD HH:MM:SS`.
    pub local_time: String,
}

/// Error body of any non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ErrorBody {
    /// Human-readable reason, surfaced verbatim.
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
    /// Returns `detail` when it is a non-empty string.
    #[must_use]
    pub fn detail_text(&self) -> Option<String> {
        match &self.detail {
            Some(serde_json::Value::String(text)) if !text.is_empty() => Some(text.clone()),
            _ => None,
        }
    }
}
