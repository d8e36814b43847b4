//! # clv_core - Pass-Play Deception Analysis Engine
//!
//! Turns per-frame player tracking of pass plays into a per-play deception
//! table: how far the closest coverage defender was pulled away from the
//! eventual catch point before the throw (CLV), why (quarterback eyes vs.
//! decoy gravity), and how well that defender recovered while the ball was
//! in the air.
//!
//! ## Stages
//! - `etl` - supplementary filter, timeline stitching, direction
//!   normalization, kinematics recovery
//! - `analysis` - context resolution, CLV, causality, ball-flight recovery,
//!   void context, benchmarking, leaderboards
//! - `pipeline` - per-play parallel driver producing the result table
//!
//! All thresholds live in [`config::AnalysisConfig`]; nothing in the
//! analysis code hard-codes a tunable constant.

#![allow(clippy::too_many_arguments)]

pub mod analysis;
pub mod config;
pub mod error;
pub mod etl;
pub mod geometry;
pub mod models;
pub mod pipeline;

pub use config::AnalysisConfig;
pub use error::{CoreError, Result};
pub use models::{
    Exclusion, LeakCause, Phase, Play, PlayInfo, PlayKey, PlayMetricsResult, PlayerRole,
    PlayerSide, TrackingFrame,
};
pub use pipeline::{analyze_play, analyze_plays, prepare_week, PlayOutcome, PreparedWeek, RunReport};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
