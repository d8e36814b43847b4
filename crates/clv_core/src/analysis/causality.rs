//! # Causality Classifier
//!
//! Two independent tests on the window-start snapshot, combined into one
//! [`LeakCause`].
//!
//! ## Puppeteer
//! `vision_error = min circular diff(math(o_victim), bearing(victim -> passer))`.
//! Eligible when `vision_error < vision_cone_deg`.
//!
//! ## Gravity
//! Nearest skill-position player to the Victim (Passer and Targeted
//! Receiver excluded). Eligible when that player is within
//! `decoy_radius_yd` and moving faster than `decoy_min_speed`; the player
//! is recorded as the decoy.

use super::context::{ActorRef, ResolvedContext};
use crate::config::CausalityConfig;
use crate::geometry::{angular_difference_deg, compass_to_math_deg, distance, math_bearing_deg, FieldPos};
use crate::models::{LeakCause, Play, TrackingFrame};

/// Classification of one play.
#[derive(Debug, Clone, PartialEq)]
pub struct CausalityVerdict {
    pub cause: LeakCause,
    /// `None` when the Victim has no orientation at the snapshot
    pub vision_error_deg: Option<f64>,
    pub decoy: Option<ActorRef>,
    pub decoy_distance_yd: Option<f64>,
}

/// Angle between where the Victim faces and where the Passer stands.
#[inline]
pub fn vision_error_deg(victim_pos: FieldPos, orientation_deg: f64, passer_pos: FieldPos) -> f64 {
    angular_difference_deg(
        compass_to_math_deg(orientation_deg),
        math_bearing_deg(victim_pos, passer_pos),
    )
}

#[inline]
pub fn puppeteer_test(vision_error: Option<f64>, config: &CausalityConfig) -> bool {
    vision_error.map_or(false, |e| e < config.vision_cone_deg)
}

fn is_skill_position(frame: &TrackingFrame, config: &CausalityConfig) -> bool {
    frame
        .player_position
        .as_deref()
        .map(|p| config.skill_positions.iter().any(|s| s.eq_ignore_ascii_case(p.trim())))
        .unwrap_or(false)
}

/// Nearest eligible decoy to `victim_pos` among `candidates`, with its distance.
///
/// Players in `exclude` are never considered.
pub fn gravity_test<'a, I>(
    victim_pos: FieldPos,
    candidates: I,
    exclude: &[i64],
    config: &CausalityConfig,
) -> Option<(&'a TrackingFrame, f64)>
where
    I: IntoIterator<Item = &'a TrackingFrame>,
{
    let nearest = candidates
        .into_iter()
        .filter(|f| !exclude.contains(&f.nfl_id) && is_skill_position(f, config))
        .map(|f| (f, distance(victim_pos, f.pos())))
        .fold(None::<(&TrackingFrame, f64)>, |best, (f, d)| match best {
            Some((_, bd)) if bd <= d => best,
            _ => Some((f, d)),
        })?;

    let (frame, dist) = nearest;
    let moving = frame.speed.map_or(false, |s| s > config.decoy_min_speed);
    (dist < config.decoy_radius_yd && moving).then_some(nearest)
}

/// Run both tests on the snapshot and combine them.
pub fn classify(play: &Play, ctx: &ResolvedContext, config: &CausalityConfig) -> CausalityVerdict {
    let snapshot: Vec<&TrackingFrame> = ctx.snapshot(play).collect();

    let vision_error = snapshot
        .iter()
        .find(|f| f.nfl_id == ctx.victim.nfl_id)
        .and_then(|f| f.orientation)
        .map(|o| vision_error_deg(ctx.victim_pos, o, ctx.passer_pos));
    let puppeteer = puppeteer_test(vision_error, config);

    let mut exclude = vec![ctx.passer.nfl_id, ctx.victim.nfl_id];
    if let Some(target) = &ctx.target {
        exclude.push(target.nfl_id);
    }
    let decoy = gravity_test(ctx.victim_pos, snapshot.iter().copied(), &exclude, config);

    CausalityVerdict {
        cause: LeakCause::from_tests(puppeteer, decoy.is_some()),
        vision_error_deg: vision_error,
        decoy: decoy.map(|(f, _)| ActorRef {
            nfl_id: f.nfl_id,
            name: f.player_name.clone(),
            position: f.player_position.clone(),
        }),
        decoy_distance_yd: decoy.map(|(_, d)| d),
    }
}
