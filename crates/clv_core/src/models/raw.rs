//! Rows as delivered by the tracking feed, before stitching.
//!
//! The pre-event segment ("input") carries full player metadata and sensor
//! values; the post-event segment ("output") only carries positions, and its
//! frame numbering restarts near 1.

use super::play::{PlayInfo, PlayKey};
use serde::{Deserialize, Serialize};

/// Pre-throw row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPreFrame {
    pub game_id: i64,
    pub play_id: i64,
    pub nfl_id: i64,
    pub frame_id: i32,
    pub play_direction: Option<String>,
    pub player_name: Option<String>,
    pub player_position: Option<String>,
    pub player_side: Option<String>,
    pub player_role: Option<String>,
    pub x: f64,
    pub y: f64,
    pub s: Option<f64>,
    pub a: Option<f64>,
    pub dir: Option<f64>,
    pub o: Option<f64>,
    pub ball_land_x: Option<f64>,
    pub ball_land_y: Option<f64>,
}

impl RawPreFrame {
    #[inline]
    pub fn key(&self) -> PlayKey {
        PlayKey::new(self.game_id, self.play_id)
    }
}

/// Post-throw row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPostFrame {
    pub game_id: i64,
    pub play_id: i64,
    pub nfl_id: i64,
    pub frame_id: i32,
    pub x: f64,
    pub y: f64,
}

impl RawPostFrame {
    #[inline]
    pub fn key(&self) -> PlayKey {
        PlayKey::new(self.game_id, self.play_id)
    }
}

/// Supplementary per-play context row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SupplementaryPlay {
    pub game_id: i64,
    pub play_id: i64,
    pub week: Option<u32>,
    pub pass_result: Option<String>,
    pub team_coverage_man_zone: Option<String>,
    pub team_coverage_type: Option<String>,
    pub expected_points_added: Option<f64>,
    pub possession_team: Option<String>,
}

impl SupplementaryPlay {
    #[inline]
    pub fn key(&self) -> PlayKey {
        PlayKey::new(self.game_id, self.play_id)
    }

    pub fn to_info(&self) -> PlayInfo {
        PlayInfo {
            week: self.week,
            pass_result: self.pass_result.clone(),
            coverage_man_zone: self.team_coverage_man_zone.clone(),
            coverage_type: self.team_coverage_type.clone(),
            epa: self.expected_points_added,
            possession_team: self.possession_team.clone(),
        }
    }
}
