// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Holds an ambiguous set of variants until the user confirms one.

use defense_queue_domain::{RegionQuery, StatusLanguage, TimezoneVariant};
use tracing::debug;

use crate::error::CoreError;

/// Renders one variant as a picker option.
///
/// `"{region} — {label}"` when a label is present, otherwise
/// `"{region} (MSK {±offset})"`.
#[must_use]
pub fn option_text(variant: &TimezoneVariant, language: StatusLanguage) -> String {
    match variant.label() {
        Some(label) => format!("{} — {label}", variant.region()),
        None => format!(
            "{} ({} {})",
            variant.region(),
            language.msk_label(),
            variant.msk_offset()
        ),
    }
}

/// The variants currently on display and the user's choice among them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSelection {
    source: RegionQuery,
    variants: Vec<TimezoneVariant>,
    chosen: usize,
}

impl PendingSelection {
    /// The region text that produced these variants.
    #[must_use]
    pub const fn source(&self) -> &RegionQuery {
        &self.source
    }

    /// The variants in server order.
    #[must_use]
    pub fn variants(&self) -> &[TimezoneVariant] {
        &self.variants
    }

    /// Index of the chosen variant.
    #[must_use]
    pub const fn chosen_index(&self) -> usize {
        self.chosen
    }

    /// The chosen variant.
    #[must_use]
    pub fn chosen(&self) -> Option<&TimezoneVariant> {
        self.variants.get(self.chosen)
    }
}

/// Ambiguity picker state.
///
/// Visible exactly when a selection is held. The first variant is chosen
/// by default, matching a freshly rendered `<select>`.
#[derive(Debug, Clone, Default)]
pub struct AmbiguityPicker {
    pending: Option<PendingSelection>,
    language: StatusLanguage,
}

impl AmbiguityPicker {
    /// Creates a hidden picker.
    #[must_use]
    pub const fn new(language: StatusLanguage) -> Self {
        Self {
            pending: None,
            language,
        }
    }

    /// Shows `variants` and returns the option texts to render.
    ///
    /// Any previously held selection is replaced. An empty sequence hides the
    /// picker instead.
    pub fn present(&mut self, source: RegionQuery, variants: Vec<TimezoneVariant>) -> Vec<String> {
        if variants.is_empty() {
            self.clear();
            return Vec::new();
        }
        debug!(region = %source, count = variants.len(), "Presenting timezone variants");
        self.pending = Some(PendingSelection {
            source,
            variants,
            chosen: 0,
        });
        self.options()
    }

    /// Selects the variant at `index` in the held sequence.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::StaleSelectionIndex` if nothing is held or the index
    /// is out of bounds.
    pub fn choose(&mut self, index: usize) -> Result<&TimezoneVariant, CoreError> {
        let Some(pending) = self.pending.as_mut() else {
            return Err(CoreError::StaleSelectionIndex { index, len: 0 });
        };
        if index >= pending.variants.len() {
            return Err(CoreError::StaleSelectionIndex {
                index,
                len: pending.variants.len(),
            });
        }
        pending.chosen = index;
        Ok(&pending.variants[index])
    }

    /// Hides the picker and discards the held sequence.
    ///
    /// Returns whether anything was held. Clearing a hidden picker is a no-op.
    pub fn clear(&mut self) -> bool {
        let was_visible: bool = self.pending.take().is_some();
        if was_visible {
            debug!("Cleared timezone picker");
        }
        was_visible
    }

    /// Returns whether the picker is visible.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.pending.is_some()
    }

    /// Returns the held selection, if any.
    #[must_use]
    pub const fn pending(&self) -> Option<&PendingSelection> {
        self.pending.as_ref()
    }

    /// Returns the chosen variant, if the picker is visible.
    #[must_use]
    pub fn selected(&self) -> Option<&TimezoneVariant> {
        self.pending.as_ref().and_then(PendingSelection::chosen)
    }

    /// Returns the option texts of the held sequence.
    #[must_use]
    pub fn options(&self) -> Vec<String> {
        self.pending
            .as_ref()
            .map(|pending| {
                pending
                    .variants
                    .iter()
                    .map(|variant| option_text(variant, self.language))
                    .collect()
            })
            .unwrap_or_default()
    }
}
