// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Turns free-text regions into timezone variants.

use std::sync::Arc;

use defense_queue_api::{QueueApi, ResolveResponse};
use defense_queue_domain::{RegionQuery, ResolutionResult, TimezoneVariant};
use tracing::{debug, warn};

use crate::error::CoreError;

/// Result count requested from the resolve endpoint by the join form.
pub const DEFAULT_RESOLVE_LIMIT: u32 = 20;

/// Classifies a resolve response.
///
/// - no variants: `None`
/// - one variant without `needs_choice`: `Single`
/// - otherwise: `Ambiguous`, in server order
#[must_use]
pub fn classify(response: ResolveResponse) -> ResolutionResult {
    let mut variants: Vec<TimezoneVariant> = response
        .variants
        .into_iter()
        .map(TimezoneVariant::from)
        .collect();

    match (variants.len(), response.needs_choice) {
        (0, _) => ResolutionResult::None,
        (1, false) => variants
            .pop()
            .map_or(ResolutionResult::None, ResolutionResult::Single),
        _ => ResolutionResult::Ambiguous(variants),
    }
}

/// Resolves region text through the service.
#[derive(Debug)]
pub struct RegionResolver<A> {
    api: Arc<A>,
    limit: u32,
}

impl<A: QueueApi> RegionResolver<A> {
    /// Creates a resolver requesting at most `limit` variants.
    #[must_use]
    pub const fn new(api: Arc<A>, limit: u32) -> Self {
        Self { api, limit }
    }

    /// Resolves `region` to zero, one or many variants.
    ///
    /// The caller must not pass an empty region; an empty region means an
    /// unconditional join and never reaches the resolver.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::ResolutionTransport` if the call fails.
    pub async fn resolve(&self, region: &RegionQuery) -> Result<ResolutionResult, CoreError> {
        debug_assert!(!region.is_empty(), "resolve called with an empty region");

        let response: ResolveResponse = self
            .api
            .resolve_region(region.value(), self.limit)
            .await
            .map_err(|e| {
                warn!(region = %region, error = %e, "Region resolution failed");
                CoreError::ResolutionTransport(e)
            })?;

        let result: ResolutionResult = classify(response);
        debug!(region = %region, outcome = result.kind(), "Resolved region");
        Ok(result)
    }
}
