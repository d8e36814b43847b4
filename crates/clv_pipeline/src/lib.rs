//! CLV Pipeline Library
//!
//! Weekly tracking CSV -> clv_core -> `frames.csv` + `play_metrics.csv` + `leaderboards.json`

pub mod export;
pub mod loader;
pub mod records;
pub mod run;

use anyhow::{Context, Result};
use clv_core::AnalysisConfig;
use std::path::Path;

pub use export::{
    read_metrics, write_leaderboards, write_metrics, FrameWriter, Leaderboards, FRAMES_FILE,
    LEADERBOARDS_FILE, METRICS_FILE,
};
pub use loader::{load_supplementary, load_week, week_paths, WeekData, SUPPLEMENTARY_FILE};
pub use run::{
    parse_week_range, run, PipelineOptions, RunSummary, WeekSummary, DEFAULT_MIN_PLAYS, SUMMARY_FILE,
};

/// Effective analysis config: a YAML file wins over a named profile, which
/// wins over `CLV_THRESHOLD_PROFILE`.
pub fn resolve_config(config_path: Option<&Path>, profile: Option<&str>) -> Result<AnalysisConfig> {
    if let Some(path) = config_path {
        let yaml = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        return AnalysisConfig::from_yaml_str(&yaml)
            .with_context(|| format!("Invalid config file: {}", path.display()));
    }
    Ok(match profile {
        Some(name) => AnalysisConfig::from_profile(name),
        None => AnalysisConfig::from_env_or_default(),
    })
}
