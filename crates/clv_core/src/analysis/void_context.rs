//! Target separation at the throw.
//!
//! Distance from the Targeted Receiver to the nearest coverage defender at
//! the throw frame, bucketed into [`VoidType`]. Context only; never affects
//! whether a play is analyzable.

use super::context::ResolvedContext;
use crate::config::VoidContextConfig;
use crate::geometry::distance;
use crate::models::{Phase, Play, PlayerRole, VoidType};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoidContext {
    pub separation_yd: f64,
    pub void_type: VoidType,
}

pub fn classify_void(separation_yd: f64, config: &VoidContextConfig) -> VoidType {
    if separation_yd > config.high_void_yd {
        VoidType::HighVoid
    } else if separation_yd < config.tight_window_yd {
        VoidType::TightWindow
    } else {
        VoidType::Neutral
    }
}

/// `None` when the receiver or every defender is missing at the throw frame.
pub fn void_at_throw(
    play: &Play,
    ctx: &ResolvedContext,
    config: &VoidContextConfig,
) -> Option<VoidContext> {
    let target_id = ctx.target.as_ref()?.nfl_id;
    let at_throw: Vec<_> = play
        .frames_at(ctx.throw_frame)
        .filter(|f| f.phase == Phase::PreThrow)
        .collect();

    let receiver = at_throw.iter().find(|f| f.nfl_id == target_id)?;
    let separation_yd = at_throw
        .iter()
        .filter(|f| f.has_role(&PlayerRole::DefensiveCoverage))
        .map(|f| distance(receiver.pos(), f.pos()))
        .min_by(|a, b| a.total_cmp(b))?;

    Some(VoidContext {
        separation_yd,
        void_type: classify_void(separation_yd, config),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::context::fixtures::{row, static_play};
    use crate::analysis::context::resolve_context;
    use crate::config::AnalysisConfig;
    use crate::models::TrackingFrame;

    const BALL: (f64, f64) = (40.0, 25.0);

    fn context_of(rows: Vec<TrackingFrame>) -> Option<VoidContext> {
        let cfg = AnalysisConfig::default();
        let play = static_play(&rows, 20, BALL);
        let ctx = resolve_context(&play, &cfg).unwrap();
        void_at_throw(&play, &ctx, &cfg.void_context)
    }

    #[test]
    fn test_classify_thresholds() {
        let cfg = VoidContextConfig::default();
        assert_eq!(classify_void(6.0, &cfg), VoidType::HighVoid);
        assert_eq!(classify_void(5.0, &cfg), VoidType::Neutral);
        assert_eq!(classify_void(2.0, &cfg), VoidType::Neutral);
        assert_eq!(classify_void(1.5, &cfg), VoidType::TightWindow);
    }

    #[test]
    fn test_separation_uses_nearest_defender() {
        let ctx = context_of(vec![
            row(1, 0, PlayerRole::Passer, 20.0, 25.0),
            row(5, 0, PlayerRole::TargetedReceiver, 40.0, 25.0),
            row(10, 0, PlayerRole::DefensiveCoverage, 41.0, 25.0),
            row(11, 0, PlayerRole::DefensiveCoverage, 40.0, 35.0),
        ])
        .unwrap();
        assert!((ctx.separation_yd - 1.0).abs() < 1e-9);
        assert_eq!(ctx.void_type, VoidType::TightWindow);
    }

    #[test]
    fn test_no_target_is_undefined() {
        let ctx = context_of(vec![
            row(1, 0, PlayerRole::Passer, 20.0, 25.0),
            row(10, 0, PlayerRole::DefensiveCoverage, 41.0, 25.0),
        ]);
        assert_eq!(ctx, None);
    }
}
