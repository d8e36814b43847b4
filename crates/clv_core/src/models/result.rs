//! Per-play output row and exclusion reasons.

use serde::{Deserialize, Serialize};

/// Why the Victim was displaced before the throw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeakCause {
    /// Facing the passer: eyes were manipulated
    Puppeteer,
    /// A moving decoy was close by
    Gravity,
    /// Both of the above
    #[serde(rename = "Dual Threat")]
    DualThreat,
    /// Neither
    #[serde(rename = "Unforced Error")]
    UnforcedError,
}

impl LeakCause {
    /// Combination rule over the two independent tests.
    pub fn from_tests(puppeteer: bool, gravity: bool) -> Self {
        match (puppeteer, gravity) {
            (true, true) => LeakCause::DualThreat,
            (true, false) => LeakCause::Puppeteer,
            (false, true) => LeakCause::Gravity,
            (false, false) => LeakCause::UnforcedError,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LeakCause::Puppeteer => "Puppeteer",
            LeakCause::Gravity => "Gravity",
            LeakCause::DualThreat => "Dual Threat",
            LeakCause::UnforcedError => "Unforced Error",
        }
    }
}

/// Separation of the targeted receiver at the throw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum VoidType {
    #[serde(rename = "High Void")]
    HighVoid,
    Neutral,
    #[serde(rename = "Tight Window")]
    TightWindow,
}

/// Expected, silent reasons a play is left out of the result table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Exclusion {
    MissingBallLanding,
    NoPreThrowFrames,
    EmptyWindow,
    NoPasser,
    ShortAirYards,
    NoCoverageDefender,
    NoVictimKinematics,
}

impl Exclusion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Exclusion::MissingBallLanding => "missing_ball_landing",
            Exclusion::NoPreThrowFrames => "no_pre_throw_frames",
            Exclusion::EmptyWindow => "empty_window",
            Exclusion::NoPasser => "no_passer",
            Exclusion::ShortAirYards => "short_air_yards",
            Exclusion::NoCoverageDefender => "no_coverage_defender",
            Exclusion::NoVictimKinematics => "no_victim_kinematics",
        }
    }
}

impl std::fmt::Display for Exclusion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row per analyzable play.
///
/// `nfl_id`, `player_name`, `player_position` describe the Victim.
/// Post-throw fields are `None` when the ball-flight window was too short
/// or the Victim was not contesting the catch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayMetricsResult {
    pub game_id: i64,
    pub play_id: i64,
    pub nfl_id: i64,
    pub player_name: Option<String>,
    pub player_position: Option<String>,
    pub qb_name: Option<String>,
    pub qb_nfl_id: i64,
    pub target_name: Option<String>,
    pub target_nfl_id: Option<i64>,
    pub clv: f64,
    pub leak_cause: LeakCause,
    pub decoy_name: Option<String>,
    pub decoy_nfl_id: Option<i64>,
    pub bia_efficiency: Option<f64>,
    pub reaction_delay: Option<f64>,
    pub recovery_tax: Option<f64>,
    pub closing_speed: Option<f64>,
    pub void_type: Option<VoidType>,
    pub separation_at_throw: Option<f64>,
    pub ceoe_score: Option<f64>,
    pub epa: Option<f64>,
    pub pass_result: Option<String>,
}
