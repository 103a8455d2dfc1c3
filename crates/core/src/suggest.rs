// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Debounced region autocomplete.
//!
//! Every keystroke restarts an idle timer. Only the timer that survives the
//! debounce window issues a search. Searches already in flight are never
//! cancelled; their results are tagged with the sequence number of the
//! keystroke that produced them and dropped on arrival if a newer keystroke
//! has been seen since.

use std::sync::Arc;
use std::time::Duration;

use defense_queue_api::QueueApi;
use defense_queue_domain::{MIN_SEARCH_CHARS, RegionQuery, RegionSuggestion, is_searchable};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Idle time after the last keystroke before a search is issued.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(250);

/// Result count requested from the search endpoint.
pub const DEFAULT_SUGGESTION_LIMIT: u32 = 8;

/// Tuning for the suggestion source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionConfig {
    /// Idle window before a search is issued.
    pub debounce: Duration,
    /// Queries shorter than this (in characters, after trimming) never reach the network.
    pub min_query_chars: usize,
    /// Result count requested from the server.
    pub limit: u32,
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            min_query_chars: MIN_SEARCH_CHARS,
            limit: DEFAULT_SUGGESTION_LIMIT,
        }
    }
}

/// Runs one search, degrading every failure to an empty list.
///
/// A query that is too short returns an empty list without calling `api`.
pub async fn search_suggestions<A: QueueApi>(
    api: &A,
    query: &RegionQuery,
    config: &SuggestionConfig,
) -> Vec<RegionSuggestion> {
    if !is_searchable(query, config.min_query_chars) {
        return Vec::new();
    }

    match api.search_regions(query.value(), config.limit).await {
        Ok(items) => items.into_iter().map(RegionSuggestion::from).collect(),
        Err(e) => {
            warn!(query = %query, error = %e, "Region search failed, showing no suggestions");
            Vec::new()
        }
    }
}

/// Results of one search, tagged with the keystroke that scheduled it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionBatch {
    /// Sequence number of the keystroke.
    pub seq: u64,
    /// The query that was searched.
    pub query: RegionQuery,
    /// The suggestions, in server order.
    pub suggestions: Vec<RegionSuggestion>,
}

/// Owns the current suggestion list for one region input.
///
/// Must be used from within a tokio runtime.
#[derive(Debug)]
pub struct SuggestionSource<A> {
    api: Arc<A>,
    config: SuggestionConfig,
    latest_seq: u64,
    timer: Option<JoinHandle<()>>,
    sender: mpsc::UnboundedSender<SuggestionBatch>,
    receiver: mpsc::UnboundedReceiver<SuggestionBatch>,
    current: Vec<RegionSuggestion>,
}

impl<A: QueueApi + 'static> SuggestionSource<A> {
    /// Creates a source with an empty suggestion list.
    #[must_use]
    pub fn new(api: Arc<A>, config: SuggestionConfig) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            api,
            config,
            latest_seq: 0,
            timer: None,
            sender,
            receiver,
            current: Vec::new(),
        }
    }

    /// Records a keystroke and restarts the debounce timer.
    ///
    /// Returns the sequence number assigned to this keystroke.
    pub fn input(&mut self, raw: &str) -> u64 {
        self.abort_timer();
        self.latest_seq += 1;

        let seq: u64 = self.latest_seq;
        let query: RegionQuery = RegionQuery::new(raw);
        let api: Arc<A> = Arc::clone(&self.api);
        let config: SuggestionConfig = self.config.clone();
        let sender: mpsc::UnboundedSender<SuggestionBatch> = self.sender.clone();

        debug!(seq, query = %query, "Scheduling region search");
        self.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(config.debounce).await;
            // Detached: aborting the timer after this point must not cancel the call.
            tokio::spawn(async move {
                let suggestions: Vec<RegionSuggestion> =
                    search_suggestions(api.as_ref(), &query, &config).await;
                let batch = SuggestionBatch {
                    seq,
                    query,
                    suggestions,
                };
                if sender.send(batch).is_err() {
                    debug!(seq, "Suggestion source dropped before search completed");
                }
            });
        }));
        seq
    }

    /// Cancels the pending timer and invalidates every outstanding search.
    pub fn cancel(&mut self) {
        self.abort_timer();
        self.latest_seq += 1;
    }

    /// Applies a batch if it belongs to the latest keystroke.
    ///
    /// The suggestion list is replaced, never appended to. Returns whether the
    /// batch was applied.
    pub fn apply(&mut self, batch: SuggestionBatch) -> bool {
        if batch.seq != self.latest_seq {
            debug!(
                seq = batch.seq,
                latest = self.latest_seq,
                query = %batch.query,
                "Discarding superseded suggestions"
            );
            return false;
        }
        debug!(seq = batch.seq, count = batch.suggestions.len(), "Applying suggestions");
        self.current = batch.suggestions;
        true
    }

    /// Waits for the next batch that is current and applies it.
    ///
    /// Superseded batches are discarded while waiting. This only returns once
    /// a search for the latest keystroke completes.
    pub async fn next_update(&mut self) -> Option<&[RegionSuggestion]> {
        loop {
            let batch: SuggestionBatch = self.receiver.recv().await?;
            if self.apply(batch) {
                break;
            }
        }
        Some(&self.current)
    }

    /// Applies every batch that has already arrived, without waiting.
    ///
    /// Returns whether the suggestion list changed.
    pub fn drain_ready(&mut self) -> bool {
        let mut applied: bool = false;
        while let Ok(batch) = self.receiver.try_recv() {
            applied |= self.apply(batch);
        }
        applied
    }

    /// Returns the current suggestion list.
    #[must_use]
    pub fn suggestions(&self) -> &[RegionSuggestion] {
        &self.current
    }

    /// Returns the sequence number of the latest keystroke.
    #[must_use]
    pub const fn latest_seq(&self) -> u64 {
        self.latest_seq
    }

    fn abort_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

impl<A> Drop for SuggestionSource<A> {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}
