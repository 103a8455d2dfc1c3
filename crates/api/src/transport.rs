// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The transport seam between the client core and the queue service.

use std::future::Future;

use crate::error::ApiResult;
use crate::request_response::{
    JoinGroupRequest, JoinResponse, MeResponse, QueueResponse, RegionSuggestionDto,
    RegionTimeResponse, ResolveResponse,
};

/// Calls the queue service exposes to the client.
///
/// [`crate::HttpQueueApi`] is the production implementation; tests supply
/// in-memory fakes.
pub trait QueueApi: Send + Sync {
    /// `GET /timezones/search?q=&limit=` (no authentication).
    fn search_regions(
        &self,
        query: &str,
        limit: u32,
    ) -> impl Future<Output = ApiResult<Vec<RegionSuggestionDto>>> + Send;

    /// `GET /timezones/resolve?region=&limit=`.
    fn resolve_region(
        &self,
        region: &str,
        limit: u32,
    ) -> impl Future<Output = ApiResult<ResolveResponse>> + Send;

    /// `POST /groups/join`.
    fn join_group(
        &self,
        request: &JoinGroupRequest,
    ) -> impl Future<Output = ApiResult<JoinResponse>> + Send;

    /// `GET /groups/{id}/queue`.
    fn group_queue(&self, group_id: i64) -> impl Future<Output = ApiResult<QueueResponse>> + Send;

    /// `GET /auth/me`.
    fn current_user(&self) -> impl Future<Output = ApiResult<MeResponse>> + Send;

    /// `GET /timezones/now?region=&fias_code=`.
    ///
    /// The area code takes precedence on the server when both are given.
    fn region_time(
        &self,
        region: Option<&str>,
        fias_code: Option<&str>,
    ) -> impl Future<Output = ApiResult<RegionTimeResponse>> + Send;
}
