// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::RegionQuery;

/// Minimum number of characters before a region query is worth searching.
pub const MIN_SEARCH_CHARS: usize = 2;

/// Returns whether a region query is long enough to send to the search endpoint.
///
/// # Arguments
///
/// * `query` - The trimmed query
/// * `min_chars` - The minimum character count (not byte count)
#[must_use]
pub fn is_searchable(query: &RegionQuery, min_chars: usize) -> bool {
    !query.is_empty() && query.char_len() >= min_chars
}

/// Returns whether the region text currently in the input still matches the
/// text that produced a set of variants.
///
/// Both sides are compared after trimming, so trailing whitespace typed by
/// the user does not invalidate a pick.
#[must_use]
pub fn region_text_matches(current: &str, source: &RegionQuery) -> bool {
    current.trim() == source.value()
}
