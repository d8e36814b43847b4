//! # Ball-Flight Recovery
//!
//! How well the Victim recovered once the ball was in the air.
//!
//! ## Algorithm
//! 1. Up to `post_window_frames` post-throw rows of the Victim; fewer than
//!    `min_post_frames` leaves every metric undefined
//! 2. Victim farther than `competitive_radius_yd` from the landing point at
//!    the first post-throw row: undefined
//! 3. Per row: `eff = unit(movement) . unit(ball - pos)`; movement comes from
//!    speed/direction, else from the position delta to the previous row
//! 4. `bia_efficiency = mean(eff)`
//! 5. `reaction_delay = i * dt` for the first `eff > commit_efficiency`,
//!    else `n * dt`
//! 6. `recovery_tax = benchmark_speed * n * dt - (d_first - d_last)`
//!
//! `closing_speed` is the mean of `v . unit(ball - pos)` over the same rows.

use super::context::ResolvedContext;
use crate::config::AnalysisConfig;
use crate::geometry::{distance, dot, unit_or_zero, unit_toward, velocity, Vec2};
use crate::models::{Phase, Play, TrackingFrame};

/// Post-throw metrics of one play. Only built when the window is usable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecoveryMetrics {
    /// Rows analyzed
    pub frames: usize,
    pub bia_efficiency: f64,
    /// Seconds
    pub reaction_delay: f64,
    /// Yards
    pub recovery_tax: f64,
    /// Yards/second; `None` if no row had a usable velocity
    pub closing_speed: Option<f64>,
}

struct Step {
    efficiency: f64,
    closing: Option<f64>,
}

fn step(
    frame: &TrackingFrame,
    prev: Option<&TrackingFrame>,
    ball: (f64, f64),
    config: &AnalysisConfig,
) -> Step {
    let eps = config.epsilon;
    let ideal = unit_toward(frame.pos(), ball, eps);

    let sensor_velocity = match (frame.speed, frame.direction) {
        (Some(s), Some(d)) => Some(velocity(s, d)),
        _ => None,
    };
    let delta: Option<(Vec2, f64)> = prev.map(|p| {
        let dt = (frame.frame_id - p.frame_id) as f64 * config.window.frame_interval_s;
        ((frame.x - p.x, frame.y - p.y), dt)
    });

    let movement = sensor_velocity
        .or_else(|| delta.map(|(d, _)| d))
        .unwrap_or((0.0, 0.0));
    let fallback_velocity = delta
        .filter(|(_, dt)| *dt > 0.0)
        .map(|((dx, dy), dt)| (dx / dt, dy / dt));

    Step {
        efficiency: dot(unit_or_zero(movement, eps), ideal),
        closing: sensor_velocity.or(fallback_velocity).map(|v| dot(v, ideal)),
    }
}

/// Compute ball-flight metrics for the Victim, or `None` when undefined.
pub fn compute_recovery(
    play: &Play,
    ctx: &ResolvedContext,
    config: &AnalysisConfig,
) -> Option<RecoveryMetrics> {
    let track = play.track(ctx.victim.nfl_id);
    let anchor = track
        .iter()
        .find(|f| f.phase == Phase::PreThrow && f.frame_id == ctx.throw_frame);
    let window: Vec<&TrackingFrame> = track
        .iter()
        .filter(|f| f.phase == Phase::PostThrow)
        .take(config.window.post_window_frames)
        .collect();

    let n = window.len();
    if n < config.window.min_post_frames {
        return None;
    }

    let ball = ctx.ball_land;
    let d_first = distance(window[0].pos(), ball);
    if d_first > config.recovery.competitive_radius_yd {
        return None;
    }
    let d_last = distance(window[n - 1].pos(), ball);

    let steps: Vec<Step> = window
        .iter()
        .enumerate()
        .map(|(i, f)| {
            let prev = if i == 0 { anchor } else { Some(window[i - 1]) };
            step(f, prev, ball, config)
        })
        .collect();

    let bia_efficiency = steps.iter().map(|s| s.efficiency).sum::<f64>() / n as f64;
    let committed_at = steps
        .iter()
        .position(|s| s.efficiency > config.recovery.commit_efficiency)
        .unwrap_or(n);
    let reaction_delay = config.frames_to_seconds(committed_at);
    let recovery_tax =
        config.recovery.benchmark_speed * config.frames_to_seconds(n) - (d_first - d_last);

    let closings: Vec<f64> = steps.iter().filter_map(|s| s.closing).collect();
    let closing_speed =
        (!closings.is_empty()).then(|| closings.iter().sum::<f64>() / closings.len() as f64);

    Some(RecoveryMetrics {
        frames: n,
        bia_efficiency,
        reaction_delay,
        recovery_tax,
        closing_speed,
    })
}
