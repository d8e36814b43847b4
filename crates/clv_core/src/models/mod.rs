//! # Data Model
//!
//! - `raw` - pre-event / post-event rows as delivered by the tracking feed
//! - `frame` - stitched, normalized per-frame rows
//! - `play` - a play group with its play-level attributes
//! - `result` - per-play metrics row and exclusion reasons

pub mod frame;
pub mod play;
pub mod raw;
pub mod result;

pub use frame::{Phase, PlayDirection, PlayerRole, PlayerSide, TrackingFrame};
pub use play::{Play, PlayInfo, PlayKey};
pub use raw::{RawPostFrame, RawPreFrame, SupplementaryPlay};
pub use result::{Exclusion, LeakCause, PlayMetricsResult, VoidType};
