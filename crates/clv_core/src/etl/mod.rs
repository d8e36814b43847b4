//! # Trajectory ETL
//!
//! Raw weekly segments in, analysis-ready plays out.
//!
//! - `filter` - supplementary-play admission (zone coverage, attempted pass)
//! - `stitcher` - pre/post segment stitching with metadata broadcast
//! - `normalizer` - left/right direction normalization
//! - `kinematics` - speed/direction/orientation recovery from positions

pub mod filter;
pub mod kinematics;
pub mod normalizer;
pub mod stitcher;

pub use filter::SupplementaryFilter;
pub use kinematics::{recover_play, FieldSource, RecoveryStats};
pub use normalizer::{mirror_play, normalize_play};
pub use stitcher::{stitch_play, stitch_week, StitchReport, StitchedWeek, SEAM_JUMP_THRESHOLD_YD};
