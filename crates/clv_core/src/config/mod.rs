//! # Analysis Configuration
//!
//! Every tunable constant of the engine, grouped per stage and injected by
//! reference into each analyzer. Thresholds moved repeatedly between
//! analysis revisions (10 vs 15 frame windows, 60 vs 70 degree cones, ...),
//! so they are data, not literals.
//!
//! ## Usage
//! ```rust
//! use clv_core::config::AnalysisConfig;
//!
//! let config = AnalysisConfig::default();
//! let legacy = AnalysisConfig::legacy();
//! assert!(legacy.window.void_window_frames > config.window.void_window_frames);
//! ```
//!
//! ## Environment Variables
//!
//! - `CLV_THRESHOLD_PROFILE`: Select preset (canonical, legacy)

mod thresholds;

pub use thresholds::{
    CausalityConfig, ContextConfig, FieldConfig, KinematicsConfig, RecoveryConfig,
    VoidContextConfig, WindowConfig,
};

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::env;

/// Complete analysis configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub context: ContextConfig,
    #[serde(default)]
    pub causality: CausalityConfig,
    #[serde(default)]
    pub recovery: RecoveryConfig,
    #[serde(default)]
    pub kinematics: KinematicsConfig,
    #[serde(default)]
    pub field: FieldConfig,
    #[serde(default)]
    pub void_context: VoidContextConfig,
    /// Guard added to distance denominators
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,
}

fn default_epsilon() -> f64 {
    1e-6
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            context: ContextConfig::default(),
            causality: CausalityConfig::default(),
            recovery: RecoveryConfig::default(),
            kinematics: KinematicsConfig::default(),
            field: FieldConfig::default(),
            void_context: VoidContextConfig::default(),
            epsilon: default_epsilon(),
        }
    }
}

impl AnalysisConfig {
    /// Canonical constant set (same as `Default`).
    pub fn canonical() -> Self {
        Self::default()
    }

    /// Wider windows and looser causality gates used by the earlier
    /// revision of the analysis.
    pub fn legacy() -> Self {
        let mut cfg = Self::default();
        cfg.window.void_window_frames = 15;
        cfg.causality.vision_cone_deg = 70.0;
        cfg.causality.decoy_radius_yd = 10.0;
        cfg.causality.decoy_min_speed = 3.0;
        cfg.recovery.benchmark_speed = 7.9;
        cfg
    }

    /// Preset by name. Unknown names fall back to canonical.
    pub fn from_profile(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "legacy" => Self::legacy(),
            _ => Self::canonical(),
        }
    }

    /// Load from environment variable CLV_THRESHOLD_PROFILE or use default
    pub fn from_env_or_default() -> Self {
        Self::from_profile(&env::var("CLV_THRESHOLD_PROFILE").unwrap_or_default())
    }

    /// Parse a YAML document. Missing groups take their defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let cfg: Self = serde_yaml::from_str(yaml)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Reject configurations no analyzer can run with.
    pub fn validate(&self) -> Result<()> {
        let w = &self.window;
        if w.void_window_frames <= 0 {
            return Err(CoreError::InvalidConfig(format!(
                "void_window_frames must be positive, got {}",
                w.void_window_frames
            )));
        }
        if w.min_post_frames == 0 || w.post_window_frames < w.min_post_frames {
            return Err(CoreError::InvalidConfig(format!(
                "post window ({}) must be >= min_post_frames ({}) > 0",
                w.post_window_frames, w.min_post_frames
            )));
        }
        if !(w.frame_interval_s > 0.0) {
            return Err(CoreError::InvalidConfig(
                "frame_interval_s must be positive".to_string(),
            ));
        }
        let cone = self.causality.vision_cone_deg;
        if !(cone > 0.0 && cone <= 180.0) {
            return Err(CoreError::InvalidConfig(format!(
                "vision_cone_deg must be in (0, 180], got {}",
                cone
            )));
        }
        if self.causality.decoy_radius_yd <= 0.0 || self.recovery.competitive_radius_yd <= 0.0 {
            return Err(CoreError::InvalidConfig(
                "radii must be positive".to_string(),
            ));
        }
        if !(-1.0..=1.0).contains(&self.recovery.commit_efficiency) {
            return Err(CoreError::InvalidConfig(format!(
                "commit_efficiency must be in [-1, 1], got {}",
                self.recovery.commit_efficiency
            )));
        }
        if self.void_context.tight_window_yd > self.void_context.high_void_yd {
            return Err(CoreError::InvalidConfig(
                "tight_window_yd must not exceed high_void_yd".to_string(),
            ));
        }
        if self.field.length_yd <= 0.0 || self.field.width_yd <= 0.0 {
            return Err(CoreError::InvalidConfig(
                "field dimensions must be positive".to_string(),
            ));
        }
        if !(self.epsilon > 0.0) {
            return Err(CoreError::InvalidConfig("epsilon must be positive".to_string()));
        }
        Ok(())
    }

    /// Seconds covered by `frames` tracking frames.
    #[inline]
    pub fn frames_to_seconds(&self, frames: usize) -> f64 {
        frames as f64 * self.window.frame_interval_s
    }
}

// ========== Tests ==========
