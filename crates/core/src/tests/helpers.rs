// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! In-memory queue service and a recording join surface.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use defense_queue_api::{
    ApiError, ApiResult, JoinGroupRequest, JoinResponse, MeResponse, QueueApi, QueueEntryDto,
    QueueResponse, RegionSuggestionDto, RegionTimeResponse, ResolveResponse, TimezoneVariantDto,
    UserDto,
};

use crate::{JoinSurface, StatusLine};

/// One call received by [`FakeApi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Search { query: String, limit: u32 },
    Resolve { region: String, limit: u32 },
    Join(JoinGroupRequest),
    Queue(i64),
    Me,
    Now,
}

/// A `QueueApi` that answers from canned responses and records every call.
///
/// Unconfigured searches return one suggestion echoing the query;
/// unconfigured resolves return no variants.
#[derive(Debug)]
pub struct FakeApi {
    calls: Mutex<Vec<Call>>,
    search_results: HashMap<String, ApiResult<Vec<RegionSuggestionDto>>>,
    search_delays: HashMap<String, Duration>,
    resolve_results: HashMap<String, ApiResult<ResolveResponse>>,
    join_error: Option<ApiError>,
    queue: ApiResult<QueueResponse>,
    me: ApiResult<MeResponse>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            search_results: HashMap::new(),
            search_delays: HashMap::new(),
            resolve_results: HashMap::new(),
            join_error: None,
            queue: Ok(QueueResponse::default()),
            me: Ok(create_me_response("teacher")),
        }
    }

    pub fn with_search(mut self, query: &str, regions: &[&str]) -> Self {
        let items: Vec<RegionSuggestionDto> = regions
            .iter()
            .map(|region| RegionSuggestionDto {
                region: (*region).to_string(),
            })
            .collect();
        self.search_results.insert(query.to_string(), Ok(items));
        self
    }

    pub fn with_search_error(mut self, query: &str, error: ApiError) -> Self {
        self.search_results.insert(query.to_string(), Err(error));
        self
    }

    pub fn with_search_delay(mut self, query: &str, delay: Duration) -> Self {
        self.search_delays.insert(query.to_string(), delay);
        self
    }

    pub fn with_resolve(mut self, region: &str, response: ResolveResponse) -> Self {
        self.resolve_results.insert(region.to_string(), Ok(response));
        self
    }

    pub fn with_resolve_error(mut self, region: &str, error: ApiError) -> Self {
        self.resolve_results.insert(region.to_string(), Err(error));
        self
    }

    pub fn with_join_error(mut self, error: ApiError) -> Self {
        self.join_error = Some(error);
        self
    }

    pub fn with_queue(mut self, queue: Vec<QueueEntryDto>) -> Self {
        self.queue = Ok(QueueResponse { queue });
        self
    }

    pub fn with_queue_error(mut self, error: ApiError) -> Self {
        self.queue = Err(error);
        self
    }

    pub fn with_role(mut self, role: &str) -> Self {
        self.me = Ok(create_me_response(role));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn search_queries(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Search { query, .. } => Some(query),
                _ => None,
            })
            .collect()
    }

    pub fn resolve_calls(&self) -> Vec<(String, u32)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Resolve { region, limit } => Some((region, limit)),
                _ => None,
            })
            .collect()
    }

    pub fn join_calls(&self) -> Vec<JoinGroupRequest> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Join(request) => Some(request),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

impl QueueApi for FakeApi {
    async fn search_regions(&self, query: &str, limit: u32) -> ApiResult<Vec<RegionSuggestionDto>> {
        self.record(Call::Search {
            query: query.to_string(),
            limit,
        });
        if let Some(delay) = self.search_delays.get(query).copied() {
            tokio::time::sleep(delay).await;
        }
        self.search_results.get(query).cloned().unwrap_or_else(|| {
            Ok(vec![RegionSuggestionDto {
                region: query.to_string(),
            }])
        })
    }

    async fn resolve_region(&self, region: &str, limit: u32) -> ApiResult<ResolveResponse> {
        self.record(Call::Resolve {
            region: region.to_string(),
            limit,
        });
        self.resolve_results
            .get(region)
            .cloned()
            .unwrap_or_else(|| Ok(ResolveResponse::default()))
    }

    async fn join_group(&self, request: &JoinGroupRequest) -> ApiResult<JoinResponse> {
        self.record(Call::Join(request.clone()));
        if let Some(error) = &self.join_error {
            return Err(error.clone());
        }
        Ok(JoinResponse {
            id: Some(1),
            group_id: Some(7),
            display_name: Some(String::from("Student")),
            region: request.region.clone(),
            msk_offset_hours: request.msk_offset_hours,
            position: Some(1),
            joined_at: None,
        })
    }

    async fn group_queue(&self, group_id: i64) -> ApiResult<QueueResponse> {
        self.record(Call::Queue(group_id));
        self.queue.clone()
    }

    async fn current_user(&self) -> ApiResult<MeResponse> {
        self.record(Call::Me);
        self.me.clone()
    }

    async fn region_time(
        &self,
        _region: Option<&str>,
        _fias_code: Option<&str>,
    ) -> ApiResult<RegionTimeResponse> {
        self.record(Call::Now);
        Err(ApiError::Http {
            status: 404,
            detail: Some(String::from("Region not found")),
        })
    }
}

pub fn create_me_response(role: &str) -> MeResponse {
    MeResponse {
        user: UserDto {
            full_name: String::from("Ирина Петрова"),
            role: role.to_string(),
        },
    }
}

pub fn create_variant(region: &str, msk_offset_hours: i32) -> TimezoneVariantDto {
    TimezoneVariantDto {
        region: region.to_string(),
        label: None,
        msk_offset_hours,
        utc_offset_hours: Some(msk_offset_hours + 3),
        fias_code: None,
    }
}

pub fn create_resolve_response(
    needs_choice: bool,
    variants: Vec<TimezoneVariantDto>,
) -> ResolveResponse {
    ResolveResponse {
        input_region: None,
        needs_choice,
        variants,
    }
}

pub fn create_queue_entry(
    display_name: Option<&str>,
    region: Option<&str>,
    msk_offset_hours: Option<i32>,
    position: Option<i32>,
) -> QueueEntryDto {
    QueueEntryDto {
        display_name: display_name.map(str::to_string),
        region: region.map(str::to_string),
        msk_offset_hours,
        position,
    }
}

/// Records everything the coordinator does to the join form.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub statuses: Vec<String>,
    pub region_text: Option<String>,
    pub fias_code: Option<String>,
    pub picker_options: Vec<String>,
    pub picker_visible: bool,
}

impl RecordingSurface {
    pub fn last_status(&self) -> &str {
        self.statuses.last().map_or("", String::as_str)
    }
}

impl StatusLine for RecordingSurface {
    fn set_status(&mut self, text: &str) {
        self.statuses.push(text.to_string());
    }
}

impl JoinSurface for RecordingSurface {
    fn set_region_text(&mut self, region: &str) {
        self.region_text = Some(region.to_string());
    }

    fn set_fias_code(&mut self, fias_code: &str) {
        self.fias_code = Some(fias_code.to_string());
    }

    fn show_picker(&mut self, options: &[String]) -> bool {
        self.picker_options = options.to_vec();
        self.picker_visible = true;
        true
    }

    fn hide_picker(&mut self) {
        self.picker_visible = false;
    }
}

/// A surface with only a status line.
#[derive(Debug, Default)]
pub struct StatusOnly {
    pub statuses: Vec<String>,
}

impl StatusLine for StatusOnly {
    fn set_status(&mut self, text: &str) {
        self.statuses.push(text.to_string());
    }
}

impl JoinSurface for StatusOnly {}
