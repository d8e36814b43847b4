//! Threshold groups for every analysis stage.
//!
//! | Group | Used by |
//! |-------|---------|
//! | `WindowConfig` | context resolver, CLV, post-throw recovery |
//! | `ContextConfig` | air-yards filter |
//! | `CausalityConfig` | Puppeteer / Gravity tests |
//! | `RecoveryConfig` | ball-flight efficiency and recovery tax |
//! | `KinematicsConfig` | orientation fallback |
//! | `FieldConfig` | direction normalization |
//! | `VoidContextConfig` | separation-at-throw labels |

use serde::{Deserialize, Serialize};

/// Frame windows and timing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Last W pre-throw frames analyzed for CLV (10 frames = 1.0s)
    pub void_window_frames: i32,
    /// Max post-throw frames analyzed for recovery
    pub post_window_frames: usize,
    /// Below this many post-throw frames, recovery metrics are undefined
    pub min_post_frames: usize,
    /// Tracking frame interval in seconds
    pub frame_interval_s: f64,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            void_window_frames: 10,
            post_window_frames: 15,
            min_post_frames: 5,
            frame_interval_s: 0.1,
        }
    }
}

/// Play admission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextConfig {
    /// Minimum downfield distance from passer to ball landing point (yards)
    pub min_air_yards: f64,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self { min_air_yards: 8.0 }
    }
}

/// Causality tests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CausalityConfig {
    /// Max angle (deg) between the defender's facing and the line to the passer
    pub vision_cone_deg: f64,
    /// Max distance (yards) from defender to a decoy
    pub decoy_radius_yd: f64,
    /// Min decoy speed (yd/s); filters out stationary blockers
    pub decoy_min_speed: f64,
    /// Player positions that can act as decoys
    pub skill_positions: Vec<String>,
}

impl Default for CausalityConfig {
    fn default() -> Self {
        Self {
            vision_cone_deg: 60.0,
            decoy_radius_yd: 5.0,
            decoy_min_speed: 2.5,
            skill_positions: ["WR", "TE", "RB", "FB", "HB"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Ball-flight recovery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecoveryConfig {
    /// Defender farther than this (yards) from the landing point at the
    /// first post-throw frame is not contesting the catch
    pub competitive_radius_yd: f64,
    /// Path efficiency that counts as committed pursuit
    pub commit_efficiency: f64,
    /// Elite closing speed benchmark (yd/s)
    pub benchmark_speed: f64,
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self {
            competitive_radius_yd: 10.0,
            commit_efficiency: 0.5,
            benchmark_speed: 8.0,
        }
    }
}

/// Kinematics recovery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KinematicsConfig {
    /// Above this speed, a missing orientation is taken from direction of travel
    pub orientation_commit_speed: f64,
}

impl Default for KinematicsConfig {
    fn default() -> Self {
        Self {
            orientation_commit_speed: 2.0,
        }
    }
}

/// Field dimensions (yards).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldConfig {
    pub length_yd: f64,
    pub width_yd: f64,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            length_yd: 120.0,
            width_yd: 53.3,
        }
    }
}

/// Separation-at-throw labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoidContextConfig {
    /// Separation above this is a "High Void"
    pub high_void_yd: f64,
    /// Separation below this is a "Tight Window"
    pub tight_window_yd: f64,
}

impl Default for VoidContextConfig {
    fn default() -> Self {
        Self {
            high_void_yd: 5.0,
            tight_window_yd: 2.0,
        }
    }
}
