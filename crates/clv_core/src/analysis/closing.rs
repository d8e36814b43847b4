//! # Closing-Line Velocity
//!
//! Deception score of the Victim over the void window.
//!
//! ## Algorithm
//! Per frame: `v = s * (cos(90 - dir), sin(90 - dir))`,
//! `u = (ball - pos) / (|ball - pos| + eps)`, `leak = -(v . u)`.
//! `clv` = mean leak over the window. Positive = moving away from the catch
//! point, negative = closing on it.

use super::context::ResolvedContext;
use crate::config::AnalysisConfig;
use crate::geometry::{dot, unit_toward, velocity, FieldPos};
use crate::models::Play;

/// Leak value of one frame.
#[inline]
pub fn frame_leak(pos: FieldPos, speed: f64, direction_deg: f64, ball: FieldPos, eps: f64) -> f64 {
    -dot(velocity(speed, direction_deg), unit_toward(pos, ball, eps))
}

/// Mean leak over the Victim's void-window frames.
///
/// A frame with speed at or below `epsilon` leaks nothing, with or without a
/// direction. Other frames without speed or direction are skipped; `None`
/// when no frame was usable.
pub fn compute_clv(play: &Play, ctx: &ResolvedContext, config: &AnalysisConfig) -> Option<f64> {
    let (sum, n) = ctx
        .victim_window(play)
        .filter_map(|f| match (f.speed, f.direction) {
            (Some(s), _) if s <= config.epsilon => Some(0.0),
            (Some(s), Some(d)) => Some(frame_leak(f.pos(), s, d, ctx.ball_land, config.epsilon)),
            _ => None,
        })
        .fold((0.0, 0usize), |(sum, n), leak| (sum + leak, n + 1));

    (n > 0).then(|| sum / n as f64)
}

#[cfg(test)]
mod tests {
    use crate::analysis::context::fixtures::{row, static_play};
    use crate::analysis::context::resolve_context;
    use super::*;
    use crate::models::{PlayerRole, TrackingFrame};

    const BALL: (f64, f64) = (40.0, 25.0);

    fn play_with_victim(victim: TrackingFrame) -> Play {
        let passer = row(1, 0, PlayerRole::Passer, 20.0, 25.0);
        static_play(&[passer, victim], 20, BALL)
    }

    fn clv_of(play: &Play) -> Option<f64> {
        let cfg = AnalysisConfig::default();
        let ctx = resolve_context(play, &cfg).unwrap();
        compute_clv(play, &ctx, &cfg)
    }

    #[test]
    fn test_closing_defender_is_negative() {
        // west of the ball, running east (compass 90)
        let mut v = row(10, 0, PlayerRole::DefensiveCoverage, 35.0, 25.0);
        v.speed = Some(5.0);
        v.direction = Some(90.0);
        let clv = clv_of(&play_with_victim(v)).unwrap();
        assert!(clv < 0.0);
        assert!((clv + 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_retreating_defender_is_positive() {
        let mut v = row(10, 0, PlayerRole::DefensiveCoverage, 35.0, 25.0);
        v.speed = Some(5.0);
        v.direction = Some(270.0);
        let clv = clv_of(&play_with_victim(v)).unwrap();
        assert!(clv > 0.0);
        assert!((clv - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_stationary_defender_on_ball_is_zero() {
        let v = row(10, 0, PlayerRole::DefensiveCoverage, 40.0, 25.0);
        let clv = clv_of(&play_with_victim(v)).unwrap();
        assert!(clv.abs() < 1e-9);
        assert!(clv.is_finite());
    }

    #[test]
    fn test_frames_without_kinematics_are_skipped() {
        let mut v = row(10, 0, PlayerRole::DefensiveCoverage, 35.0, 25.0);
        v.speed = None;
        let play = play_with_victim(v);
        assert_eq!(clv_of(&play), None);

        let mut partial = play.clone();
        for f in partial.frames.iter_mut().filter(|f| f.nfl_id == 10 && f.frame_id == 20) {
            f.speed = Some(2.0);
            f.direction = Some(90.0);
        }
        let clv = clv_of(&partial).unwrap();
        assert!((clv + 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_stationary_frames_without_direction_count_as_zero() {
        let mut v = row(10, 0, PlayerRole::DefensiveCoverage, 35.0, 25.0);
        v.speed = Some(5.0);
        v.direction = Some(270.0);
        let mut play = play_with_victim(v);
        // window 10..=20: frames 15..=19 stand still with no heading
        for f in play.frames.iter_mut().filter(|f| f.nfl_id == 10 && (15..20).contains(&f.frame_id)) {
            f.speed = Some(0.0);
            f.direction = None;
        }
        let clv = clv_of(&play).unwrap();
        assert!((clv - 5.0 * 6.0 / 11.0).abs() < 1e-4);
    }

    #[test]
    fn test_window_excludes_early_frames() {
        let mut v = row(10, 0, PlayerRole::DefensiveCoverage, 35.0, 25.0);
        v.speed = Some(5.0);
        v.direction = Some(90.0);
        let mut play = play_with_victim(v);
        // before the window: running away very fast
        for f in play.frames.iter_mut().filter(|f| f.nfl_id == 10 && f.frame_id < 10) {
            f.speed = Some(50.0);
            f.direction = Some(270.0);
        }
        assert!(clv_of(&play).unwrap() < 0.0);
    }
}
