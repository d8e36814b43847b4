//! # Play Analysis
//!
//! Per-play analyzers over a stitched, normalized, recovered [`Play`].
//!
//! - `context` - analyzability checks and fixed actor set (passer, victim, target)
//! - `closing` - closing-line velocity over the void window
//! - `causality` - Puppeteer / Gravity tests and their combination
//! - `efficiency` - ball-flight path efficiency, reaction delay, recovery tax
//! - `void_context` - target separation at the throw
//! - `benchmark` - closing speed over expected (table-level)
//! - `leaderboard` - quarterback, decoy and victim aggregations (table-level)
//!
//! [`Play`]: crate::models::Play

pub mod benchmark;
pub mod causality;
pub mod closing;
pub mod context;
pub mod efficiency;
pub mod leaderboard;
pub mod void_context;

pub use benchmark::{apply_ceoe, CeoeGroupKey};
pub use causality::{classify, gravity_test, puppeteer_test, vision_error_deg, CausalityVerdict};
pub use closing::{compute_clv, frame_leak};
pub use context::{resolve_context, ActorRef, ResolvedContext};
pub use efficiency::{compute_recovery, RecoveryMetrics};
pub use leaderboard::{
    gravity_board, panic_score, puppeteer_board, victim_board, GravityEntry, PuppeteerEntry,
    VictimEntry,
};
pub use void_context::{classify_void, void_at_throw, VoidContext};
