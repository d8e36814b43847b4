//! Supplementary-play admission.
//!
//! Only zone-coverage plays with an attempted pass (complete, incomplete,
//! intercepted) enter the core. Filtering happens on the raw rows so that
//! excluded plays are never stitched.

use crate::models::{PlayInfo, PlayKey, SupplementaryPlay};
use rustc_hash::FxHashMap;

/// Pass results that count as an attempted pass.
pub const ATTEMPTED_PASS_RESULTS: [&str; 3] = ["C", "I", "IN"];

/// Whether a coverage label describes zone coverage.
pub fn is_zone_coverage(man_zone: Option<&str>) -> bool {
    man_zone
        .map(|s| s.to_lowercase().contains("zone"))
        .unwrap_or(false)
}

/// Whether a pass result is complete, incomplete or intercepted.
pub fn is_attempted_pass(pass_result: Option<&str>) -> bool {
    pass_result
        .map(|s| ATTEMPTED_PASS_RESULTS.contains(&s.trim()))
        .unwrap_or(false)
}

/// Admitted plays and their context, keyed by `(game_id, play_id)`.
#[derive(Debug, Clone, Default)]
pub struct SupplementaryFilter {
    plays: FxHashMap<PlayKey, PlayInfo>,
    rejected: usize,
}

impl SupplementaryFilter {
    pub fn from_rows(rows: &[SupplementaryPlay]) -> Self {
        let mut plays = FxHashMap::default();
        let mut rejected = 0;
        for row in rows {
            if is_zone_coverage(row.team_coverage_man_zone.as_deref())
                && is_attempted_pass(row.pass_result.as_deref())
            {
                plays.insert(row.key(), row.to_info());
            } else {
                rejected += 1;
            }
        }
        Self { plays, rejected }
    }

    #[inline]
    pub fn admits(&self, key: &PlayKey) -> bool {
        self.plays.contains_key(key)
    }

    pub fn info(&self, key: &PlayKey) -> Option<&PlayInfo> {
        self.plays.get(key)
    }

    /// Number of admitted plays.
    pub fn len(&self) -> usize {
        self.plays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plays.is_empty()
    }

    /// Number of supplementary rows that did not pass the filter.
    pub fn rejected(&self) -> usize {
        self.rejected
    }
}
