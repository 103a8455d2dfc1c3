// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! `reqwest`-backed implementation of [`QueueApi`].

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::request_response::{
    ErrorBody, JoinGroupRequest, JoinResponse, MeResponse, QueueResponse, RegionSuggestionDto,
    RegionTimeResponse, ResolveResponse,
};
use crate::transport::QueueApi;

/// HTTP client for the queue service.
///
/// Holds one connection pool; clone the surrounding `Arc` rather than the client.
#[derive(Debug, Clone)]
pub struct HttpQueueApi {
    client: Client,
    config: ClientConfig,
}

impl HttpQueueApi {
    /// Creates a client for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Transport` if the underlying HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> ApiResult<Self> {
        let mut builder = Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client: Client = builder.build().map_err(|e| ApiError::Transport {
            message: format!("Failed to build HTTP client: {e}"),
        })?;
        Ok(Self { client, config })
    }

    /// Returns the configuration this client was built with.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.config.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(&self, endpoint: &str, builder: RequestBuilder) -> ApiResult<T> {
        let response: Response = builder.send().await.map_err(|e| {
            warn!(endpoint, error = %e, "Request failed before a response arrived");
            ApiError::Transport {
                message: e.to_string(),
            }
        })?;
        decode(endpoint, response).await
    }
}

/// Decodes a response according to the service's error contract.
///
/// Bodies that are not JSON are treated as `{}`. On a non-2xx status the
/// `detail` string is surfaced verbatim when present.
async fn decode<T: DeserializeOwned>(endpoint: &str, response: Response) -> ApiResult<T> {
    let status = response.status();
    let bytes = response.bytes().await.map_err(|e| {
        warn!(endpoint, error = %e, "Failed to read response body");
        ApiError::Transport {
            message: e.to_string(),
        }
    })?;

    let body: serde_json::Value = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| serde_json::Value::Object(serde_json::Map::new()));

    if !status.is_success() {
        let error_body: ErrorBody = serde_json::from_value(body).unwrap_or_default();
        let detail: Option<String> = error_body.detail_text();
        debug!(endpoint, status = status.as_u16(), ?detail, "Service returned an error");
        return Err(ApiError::Http {
            status: status.as_u16(),
            detail,
        });
    }

    serde_json::from_value(body).map_err(|e| {
        warn!(endpoint, error = %e, "Response did not match the expected shape");
        ApiError::Decode {
            message: e.to_string(),
        }
    })
}

impl QueueApi for HttpQueueApi {
    async fn search_regions(&self, query: &str, limit: u32) -> ApiResult<Vec<RegionSuggestionDto>> {
        let limit: String = limit.to_string();
        let builder = self
            .client
            .get(self.config.endpoint("/timezones/search"))
            .query(&[("q", query), ("limit", limit.as_str())]);
        self.send("/timezones/search", builder).await
    }

    async fn resolve_region(&self, region: &str, limit: u32) -> ApiResult<ResolveResponse> {
        let limit: String = limit.to_string();
        let builder = self.authorized(
            self.client
                .get(self.config.endpoint("/timezones/resolve"))
                .query(&[("region", region), ("limit", limit.as_str())]),
        );
        self.send("/timezones/resolve", builder).await
    }

    async fn join_group(&self, request: &JoinGroupRequest) -> ApiResult<JoinResponse> {
        let builder = self.authorized(
            self.client
                .post(self.config.endpoint("/groups/join"))
                .json(request),
        );
        self.send("/groups/join", builder).await
    }

    async fn group_queue(&self, group_id: i64) -> ApiResult<QueueResponse> {
        let path: String = format!("/groups/{group_id}/queue");
        let builder = self.authorized(self.client.get(self.config.endpoint(&path)));
        self.send(&path, builder).await
    }

    async fn current_user(&self) -> ApiResult<MeResponse> {
        let builder = self.authorized(self.client.get(self.config.endpoint("/auth/me")));
        self.send("/auth/me", builder).await
    }

    async fn region_time(
        &self,
        region: Option<&str>,
        fias_code: Option<&str>,
    ) -> ApiResult<RegionTimeResponse> {
        let mut params: Vec<(&str, &str)> = Vec::new();
        if let Some(region) = region {
            params.push(("region", region));
        }
        if let Some(fias_code) = fias_code {
            params.push(("fias_code", fias_code));
        }
        let builder = self.authorized(
            self.client
                .get(self.config.endpoint("/timezones/now"))
                .query(&params),
        );
        self.send("/timezones/now", builder).await
    }
}
