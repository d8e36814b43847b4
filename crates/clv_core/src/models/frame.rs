//! Per-frame tracking rows after stitching.

use crate::geometry::FieldPos;
use serde::{Deserialize, Serialize};

/// Which tracking segment a row came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    PreThrow,
    PostThrow,
}

/// Raw play-direction flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayDirection {
    Left,
    Right,
}

impl PlayDirection {
    /// Case-insensitive parse; anything else is treated as missing.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "left" => Some(PlayDirection::Left),
            "right" => Some(PlayDirection::Right),
            _ => None,
        }
    }
}

/// Role of a player within a play.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerRole {
    Passer,
    #[serde(rename = "Targeted Receiver")]
    TargetedReceiver,
    #[serde(rename = "Defensive Coverage")]
    DefensiveCoverage,
    #[serde(rename = "Other Route Runner")]
    OtherRouteRunner,
    Other,
}

impl PlayerRole {
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "Passer" => PlayerRole::Passer,
            "Targeted Receiver" => PlayerRole::TargetedReceiver,
            "Defensive Coverage" => PlayerRole::DefensiveCoverage,
            "Other Route Runner" => PlayerRole::OtherRouteRunner,
            _ => PlayerRole::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerSide {
    Offense,
    Defense,
}

impl PlayerSide {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "offense" => Some(PlayerSide::Offense),
            "defense" => Some(PlayerSide::Defense),
            _ => None,
        }
    }
}

/// One player, one play, one frame.
///
/// Unique per `(game_id, play_id, nfl_id, frame_id)`. Angles use the
/// compass convention (0 = +y, clockwise). Sensor fields are `None` when
/// neither the feed nor kinematics recovery could supply them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingFrame {
    pub game_id: i64,
    pub play_id: i64,
    pub nfl_id: i64,
    pub frame_id: i32,
    pub phase: Phase,
    pub x: f64,
    pub y: f64,
    #[serde(rename = "s")]
    pub speed: Option<f64>,
    #[serde(rename = "a")]
    pub acceleration: Option<f64>,
    #[serde(rename = "dir")]
    pub direction: Option<f64>,
    #[serde(rename = "o")]
    pub orientation: Option<f64>,
    pub player_name: Option<String>,
    pub player_position: Option<String>,
    pub player_role: Option<PlayerRole>,
    pub player_side: Option<PlayerSide>,
}

impl TrackingFrame {
    #[inline]
    pub fn pos(&self) -> FieldPos {
        (self.x, self.y)
    }

    #[inline]
    pub fn has_role(&self, role: &PlayerRole) -> bool {
        self.player_role.as_ref() == Some(role)
    }

    #[inline]
    pub fn is_pre_throw(&self) -> bool {
        self.phase == Phase::PreThrow
    }
}
