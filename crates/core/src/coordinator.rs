// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The join workflow: validate, resolve if needed, pick if needed, join.

use std::sync::Arc;

use defense_queue_api::{JoinGroupRequest, JoinResponse, QueueApi};
use defense_queue_domain::{
    JoinCode, JoinRequest, RegionQuery, ResolutionResult, StatusLanguage, TimezoneVariant,
    region_text_matches,
};
use tracing::{debug, info, warn};

use crate::error::CoreError;
use crate::messages::JoinStatus;
use crate::picker::AmbiguityPicker;
use crate::resolver::{DEFAULT_RESOLVE_LIMIT, RegionResolver};

/// Settings for the join coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoordinatorConfig {
    /// Variant count requested from the resolve endpoint.
    pub resolve_limit: u32,
    /// Language of status text and picker options.
    pub language: StatusLanguage,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            resolve_limit: DEFAULT_RESOLVE_LIMIT,
            language: StatusLanguage::default(),
        }
    }
}

/// The values of the join form at the moment submit is pressed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JoinForm {
    /// Join code as typed.
    pub join_code: String,
    /// Region text as typed. Empty means the general queue.
    pub region: String,
}

impl JoinForm {
    /// Creates a form from raw input.
    #[must_use]
    pub fn new(join_code: &str, region: &str) -> Self {
        Self {
            join_code: join_code.to_string(),
            region: region.to_string(),
        }
    }
}

/// A single line of status text.
pub trait StatusLine {
    /// Replaces the status text.
    fn set_status(&mut self, text: &str);
}

/// The widgets the coordinator may update.
///
/// Only the status line is mandatory. A surface that lacks a widget keeps
/// the default no-op.
pub trait JoinSurface: StatusLine {
    /// Replaces the region input text.
    fn set_region_text(&mut self, _region: &str) {}

    /// Replaces the area code field.
    fn set_fias_code(&mut self, _fias_code: &str) {}

    /// Shows the picker with these options; the first one is selected.
    ///
    /// Returns whether the options were rendered. A surface without a picker
    /// returns `false` and the coordinator does not hold the selection.
    fn show_picker(&mut self, _options: &[String]) -> bool {
        false
    }

    /// Hides the picker.
    fn hide_picker(&mut self) {}
}

/// How a settled attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    /// The join call succeeded.
    Succeeded,
    /// A call failed.
    Failed,
}

/// Where the coordinator is in the current attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JoinPhase {
    /// No attempt in progress.
    #[default]
    Idle,
    /// Checking the form.
    Validating,
    /// Waiting for the resolve call.
    Resolving,
    /// Variants are shown; the user must pick and submit again.
    AwaitingPick,
    /// Waiting for the join call.
    Submitting,
    /// The attempt ended with a join call.
    Settled(Settlement),
}

/// Result of a submit that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinOutcome {
    /// The join call succeeded.
    Joined {
        /// The request that was sent.
        request: JoinRequest,
        /// The server's confirmation.
        response: JoinResponse,
    },
    /// The region was ambiguous; the picker now shows these options.
    AwaitingPick {
        /// Option texts in server order.
        options: Vec<String>,
    },
}

/// Drives one join form.
///
/// Owns the picker, so a held selection lives exactly as long as the
/// coordinator that presented it.
#[derive(Debug)]
pub struct JoinCoordinator<A> {
    api: Arc<A>,
    resolver: RegionResolver<A>,
    picker: AmbiguityPicker,
    phase: JoinPhase,
    language: StatusLanguage,
}

impl<A: QueueApi> JoinCoordinator<A> {
    /// Creates an idle coordinator.
    #[must_use]
    pub fn new(api: Arc<A>, config: CoordinatorConfig) -> Self {
        Self {
            resolver: RegionResolver::new(Arc::clone(&api), config.resolve_limit),
            api,
            picker: AmbiguityPicker::new(config.language),
            phase: JoinPhase::Idle,
            language: config.language,
        }
    }

    /// Returns the current phase.
    #[must_use]
    pub const fn phase(&self) -> JoinPhase {
        self.phase
    }

    /// Returns the picker state.
    #[must_use]
    pub const fn picker(&self) -> &AmbiguityPicker {
        &self.picker
    }

    /// Records the user's choice in the visible picker.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::StaleSelectionIndex` if the index does not belong to
    /// the held sequence.
    pub fn choose(&mut self, index: usize) -> Result<&TimezoneVariant, CoreError> {
        self.picker.choose(index)
    }

    /// Notifies the coordinator that the region input changed.
    ///
    /// A held pick that no longer matches the input is dropped and the picker
    /// hidden. Returns whether a pick was dropped.
    pub fn region_edited<S: JoinSurface>(&mut self, region: &str, surface: &mut S) -> bool {
        let stale: bool = self
            .picker
            .pending()
            .is_some_and(|pending| !region_text_matches(region, pending.source()));
        if stale {
            debug!(region, "Region edited, dropping held pick");
            self.picker.clear();
            surface.hide_picker();
            if self.phase == JoinPhase::AwaitingPick {
                self.phase = JoinPhase::Idle;
            }
        }
        stale
    }

    /// Runs one join attempt.
    ///
    /// Every phase change is reported on `surface` with exactly one status
    /// line. Failures are reported there as well before they are returned.
    ///
    /// # Errors
    ///
    /// - `CoreError::MissingJoinCode` if the join code is empty (no call made)
    /// - `CoreError::RegionNotFound` if the region resolved to nothing (join not called)
    /// - `CoreError::ResolutionTransport` if the resolve call failed
    /// - `CoreError::JoinTransport` if the join call failed
    pub async fn submit<S: JoinSurface + Send>(
        &mut self,
        form: &JoinForm,
        surface: &mut S,
    ) -> Result<JoinOutcome, CoreError> {
        self.phase = JoinPhase::Validating;

        let join_code: JoinCode = match JoinCode::parse(&form.join_code) {
            Ok(code) => code,
            Err(e) => {
                self.report(surface, &JoinStatus::MissingJoinCode);
                self.phase = JoinPhase::Idle;
                return Err(CoreError::from(e));
            }
        };
        let region: RegionQuery = RegionQuery::new(&form.region);

        self.region_edited(region.value(), surface);
        if let Some(variant) = self.picker.selected().cloned() {
            debug!(region = variant.region(), "Joining with held pick");
            self.report(surface, &JoinStatus::JoiningWithPick);
            let request: JoinRequest = JoinRequest::for_variant(join_code, &variant);
            return self.send_join(request, Some(&variant), surface).await;
        }

        if self.picker.clear() {
            surface.hide_picker();
        }

        if region.is_empty() {
            self.report(surface, &JoinStatus::JoiningGeneral);
            return self
                .send_join(JoinRequest::unconditional(join_code), None, surface)
                .await;
        }

        self.phase = JoinPhase::Resolving;
        self.report(surface, &JoinStatus::Resolving);
        let resolution: ResolutionResult = match self.resolver.resolve(&region).await {
            Ok(resolution) => resolution,
            Err(e) => {
                self.report(surface, &JoinStatus::Failed(e.to_string()));
                self.phase = JoinPhase::Settled(Settlement::Failed);
                return Err(e);
            }
        };

        match resolution {
            ResolutionResult::None => {
                info!(region = %region, "Region not found");
                self.report(surface, &JoinStatus::RegionNotFound);
                self.phase = JoinPhase::Idle;
                Err(CoreError::RegionNotFound {
                    region: region.value().to_string(),
                })
            }
            ResolutionResult::Ambiguous(variants) => {
                let options: Vec<String> = self.picker.present(region.clone(), variants);
                if !surface.show_picker(&options) {
                    debug!(region = %region, "Surface has no picker; selection not held");
                    self.picker.clear();
                }
                self.report(surface, &JoinStatus::AwaitingPick);
                self.phase = JoinPhase::AwaitingPick;
                Ok(JoinOutcome::AwaitingPick { options })
            }
            ResolutionResult::Single(variant) => {
                self.report(surface, &JoinStatus::JoiningWithTimezone);
                let request: JoinRequest = JoinRequest::for_variant(join_code, &variant);
                self.send_join(request, Some(&variant), surface).await
            }
        }
    }

    async fn send_join<S: JoinSurface + Send>(
        &mut self,
        request: JoinRequest,
        variant: Option<&TimezoneVariant>,
        surface: &mut S,
    ) -> Result<JoinOutcome, CoreError> {
        self.phase = JoinPhase::Submitting;
        let body: JoinGroupRequest = JoinGroupRequest::from(&request);

        let response: JoinResponse = match self.api.join_group(&body).await {
            Ok(response) => response,
            Err(e) => {
                warn!(join_code = %body.join_code, error = %e, "Join failed");
                self.report(surface, &JoinStatus::Failed(e.user_message()));
                self.phase = JoinPhase::Settled(Settlement::Failed);
                return Err(CoreError::JoinTransport(e));
            }
        };

        let mut status: JoinStatus = JoinStatus::JoinedGeneral;
        if let Some(variant) = variant {
            if self.picker.clear() {
                surface.hide_picker();
            }
            surface.set_region_text(variant.region());
            surface.set_fias_code(variant.fias_code().unwrap_or_default());
            status = JoinStatus::JoinedWithTimezone;
        }
        info!(
            join_code = %body.join_code,
            region = body.region.as_deref().unwrap_or("-"),
            position = ?response.position,
            "Joined queue"
        );
        self.report(surface, &status);
        self.phase = JoinPhase::Settled(Settlement::Succeeded);

        Ok(JoinOutcome::Joined { request, response })
    }

    fn report<S: JoinSurface>(&self, surface: &mut S, status: &JoinStatus) {
        surface.set_status(&status.text(self.language));
    }
}
