//! CSV row layouts of the weekly tracking feed.
//!
//! Headers are accepted in snake_case or the feed's camelCase. Numeric
//! sensor fields that are empty or unparsable (`NA`) read as missing.

use clv_core::models::{RawPostFrame, RawPreFrame, SupplementaryPlay};
use serde::Deserialize;

/// One row of `input_2023_wNN.csv` (pre-event segment).
#[derive(Debug, Clone, Deserialize)]
pub struct InputRecord {
    #[serde(alias = "gameId")]
    pub game_id: i64,
    #[serde(alias = "playId")]
    pub play_id: i64,
    #[serde(alias = "nflId")]
    pub nfl_id: i64,
    #[serde(alias = "frameId")]
    pub frame_id: i32,
    #[serde(default, alias = "playDirection")]
    pub play_direction: Option<String>,
    #[serde(default, alias = "displayName")]
    pub player_name: Option<String>,
    #[serde(default, alias = "position")]
    pub player_position: Option<String>,
    #[serde(default)]
    pub player_side: Option<String>,
    #[serde(default)]
    pub player_role: Option<String>,
    pub x: f64,
    pub y: f64,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub s: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub a: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub dir: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub o: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub ball_land_x: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub ball_land_y: Option<f64>,
}

impl From<InputRecord> for RawPreFrame {
    fn from(r: InputRecord) -> Self {
        RawPreFrame {
            game_id: r.game_id,
            play_id: r.play_id,
            nfl_id: r.nfl_id,
            frame_id: r.frame_id,
            play_direction: r.play_direction,
            player_name: r.player_name,
            player_position: r.player_position,
            player_side: r.player_side,
            player_role: r.player_role,
            x: r.x,
            y: r.y,
            s: r.s,
            a: r.a,
            dir: r.dir,
            o: r.o,
            ball_land_x: r.ball_land_x,
            ball_land_y: r.ball_land_y,
        }
    }
}

/// One row of `output_2023_wNN.csv` (post-event segment).
#[derive(Debug, Clone, Deserialize)]
pub struct OutputRecord {
    #[serde(alias = "gameId")]
    pub game_id: i64,
    #[serde(alias = "playId")]
    pub play_id: i64,
    #[serde(alias = "nflId")]
    pub nfl_id: i64,
    #[serde(alias = "frameId")]
    pub frame_id: i32,
    pub x: f64,
    pub y: f64,
}

impl From<OutputRecord> for RawPostFrame {
    fn from(r: OutputRecord) -> Self {
        RawPostFrame {
            game_id: r.game_id,
            play_id: r.play_id,
            nfl_id: r.nfl_id,
            frame_id: r.frame_id,
            x: r.x,
            y: r.y,
        }
    }
}

/// One row of `supplementary_data.csv`.
#[derive(Debug, Clone, Deserialize)]
pub struct SupplementaryRecord {
    #[serde(alias = "gameId")]
    pub game_id: i64,
    #[serde(alias = "playId")]
    pub play_id: i64,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub week: Option<u32>,
    #[serde(default)]
    pub pass_result: Option<String>,
    #[serde(default)]
    pub team_coverage_man_zone: Option<String>,
    #[serde(default)]
    pub team_coverage_type: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub expected_points_added: Option<f64>,
    #[serde(default)]
    pub possession_team: Option<String>,
}

impl From<SupplementaryRecord> for SupplementaryPlay {
    fn from(r: SupplementaryRecord) -> Self {
        SupplementaryPlay {
            game_id: r.game_id,
            play_id: r.play_id,
            week: r.week,
            pass_result: r.pass_result,
            team_coverage_man_zone: r.team_coverage_man_zone,
            team_coverage_type: r.team_coverage_type,
            expected_points_added: r.expected_points_added,
            possession_team: r.possession_team,
        }
    }
}
