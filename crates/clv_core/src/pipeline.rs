//! # Play Pipeline
//!
//! Drives the analyzers over independent play groups.
//!
//! ## Flow
//! ```text
//! raw rows -> filter -> stitch -> normalize -> recover   (prepare_week)
//! plays -> context -> {clv, causality, recovery, void} (analyze_play)
//! ```
//!
//! Each play is analyzed from its own frames only, so plays are mapped in
//! parallel and the merged table is sorted by `(game_id, play_id)`.

use crate::analysis::{classify, compute_clv, compute_recovery, resolve_context, void_at_throw};
use crate::config::AnalysisConfig;
use crate::etl::{
    normalize_play, recover_play, stitch_week, RecoveryStats, StitchReport, SupplementaryFilter,
};
use crate::models::{Exclusion, Play, PlayKey, PlayMetricsResult, RawPostFrame, RawPreFrame};
use rayon::prelude::*;
use rustc_hash::FxHashSet;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Below this many plays a sequential map is used
const PARALLEL_MIN_PLAYS: usize = 32;

/// Outcome of analyzing one play.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayOutcome {
    Analyzed(Box<PlayMetricsResult>),
    Excluded(Exclusion),
}

/// Analyze a single stitched, normalized, recovered play.
pub fn analyze_play(play: &Play, config: &AnalysisConfig) -> PlayOutcome {
    let ctx = match resolve_context(play, config) {
        Ok(ctx) => ctx,
        Err(reason) => return PlayOutcome::Excluded(reason),
    };
    let clv = match compute_clv(play, &ctx, config) {
        Some(clv) => clv,
        None => return PlayOutcome::Excluded(Exclusion::NoVictimKinematics),
    };

    let verdict = classify(play, &ctx, &config.causality);
    let recovery = compute_recovery(play, &ctx, config);
    let void = void_at_throw(play, &ctx, &config.void_context);

    let (decoy_name, decoy_nfl_id) = match verdict.decoy {
        Some(d) => (d.name, Some(d.nfl_id)),
        None => (None, None),
    };

    PlayOutcome::Analyzed(Box::new(PlayMetricsResult {
        game_id: play.key.game_id,
        play_id: play.key.play_id,
        nfl_id: ctx.victim.nfl_id,
        player_name: ctx.victim.name,
        player_position: ctx.victim.position,
        qb_name: ctx.passer.name,
        qb_nfl_id: ctx.passer.nfl_id,
        target_name: ctx.target.as_ref().and_then(|t| t.name.clone()),
        target_nfl_id: ctx.target.as_ref().map(|t| t.nfl_id),
        clv,
        leak_cause: verdict.cause,
        decoy_name,
        decoy_nfl_id,
        bia_efficiency: recovery.map(|r| r.bia_efficiency),
        reaction_delay: recovery.map(|r| r.reaction_delay),
        recovery_tax: recovery.map(|r| r.recovery_tax),
        closing_speed: recovery.and_then(|r| r.closing_speed),
        void_type: void.map(|v| v.void_type),
        separation_at_throw: void.map(|v| v.separation_yd),
        ceoe_score: None,
        epa: play.info.epa,
        pass_result: play.info.pass_result.clone(),
    }))
}

/// Result table plus the audit of excluded plays.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunReport {
    pub results: Vec<PlayMetricsResult>,
    pub exclusions: BTreeMap<Exclusion, usize>,
    pub plays_seen: usize,
}

impl RunReport {
    pub fn excluded_total(&self) -> usize {
        self.exclusions.values().sum()
    }

    /// Fold another report in and keep the table ordered.
    pub fn merge(&mut self, other: RunReport) {
        self.results.extend(other.results);
        self.results.sort_by_key(|r| (r.game_id, r.play_id));
        for (reason, n) in other.exclusions {
            *self.exclusions.entry(reason).or_insert(0) += n;
        }
        self.plays_seen += other.plays_seen;
    }
}

/// Analyze every play; output order is `(game_id, play_id)` regardless of
/// processing order.
pub fn analyze_plays(plays: &[Play], config: &AnalysisConfig) -> RunReport {
    let outcomes: Vec<(PlayKey, PlayOutcome)> = if plays.len() >= PARALLEL_MIN_PLAYS {
        plays
            .par_iter()
            .map(|p| (p.key, analyze_play(p, config)))
            .collect()
    } else {
        plays
            .iter()
            .map(|p| (p.key, analyze_play(p, config)))
            .collect()
    };

    let mut report = RunReport {
        plays_seen: plays.len(),
        ..RunReport::default()
    };
    for (key, outcome) in outcomes {
        match outcome {
            PlayOutcome::Analyzed(row) => report.results.push(*row),
            PlayOutcome::Excluded(reason) => {
                debug!(play = %key, %reason, "play excluded");
                *report.exclusions.entry(reason).or_insert(0) += 1;
            }
        }
    }
    report.results.sort_by_key(|r| (r.game_id, r.play_id));

    info!(
        plays = report.plays_seen,
        analyzed = report.results.len(),
        excluded = report.excluded_total(),
        "analysis complete"
    );
    report
}

/// One week of plays ready for analysis.
#[derive(Debug, Clone, Default)]
pub struct PreparedWeek {
    pub plays: Vec<Play>,
    pub stitch_reports: Vec<StitchReport>,
    /// Plays with post-event rows only
    pub dropped: Vec<PlayKey>,
    /// Plays the supplementary filter did not admit
    pub filtered_out: usize,
    /// Plays normalized from a leftward direction
    pub mirrored: usize,
    pub recovery: RecoveryStats,
}

/// Filter, stitch, normalize and recover one week of raw rows.
pub fn prepare_week(
    pre: Vec<RawPreFrame>,
    post: Vec<RawPostFrame>,
    filter: &SupplementaryFilter,
    config: &AnalysisConfig,
) -> PreparedWeek {
    let mut rejected: FxHashSet<PlayKey> = FxHashSet::default();
    let mut admitted = Vec::with_capacity(pre.len());
    for row in pre {
        let key = row.key();
        if filter.admits(&key) {
            admitted.push(row);
        } else {
            rejected.insert(key);
        }
    }
    let post: Vec<RawPostFrame> = post
        .into_iter()
        .filter(|r| filter.admits(&r.key()))
        .collect();

    let stitched = stitch_week(admitted, post);
    let mut plays = stitched.plays;

    let per_play: Vec<(bool, RecoveryStats)> = plays
        .par_iter_mut()
        .map(|play| {
            if let Some(info) = filter.info(&play.key) {
                play.info = info.clone();
            }
            let mirrored = normalize_play(play, &config.field);
            (mirrored, recover_play(play, config))
        })
        .collect();

    let mut recovery = RecoveryStats::default();
    let mut mirrored = 0;
    for (m, stats) in &per_play {
        mirrored += usize::from(*m);
        recovery.merge(stats);
    }

    info!(
        plays = plays.len(),
        dropped = stitched.dropped.len(),
        filtered_out = rejected.len(),
        mirrored,
        recovered_fields = recovery.total_filled(),
        "week prepared"
    );

    PreparedWeek {
        plays,
        stitch_reports: stitched.reports,
        dropped: stitched.dropped,
        filtered_out: rejected.len(),
        mirrored,
        recovery,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::context::fixtures::{row, static_play};
    use crate::models::{LeakCause, Phase, PlayerRole, SupplementaryPlay, TrackingFrame};

    const BALL: (f64, f64) = (40.0, 25.0);

    fn passer() -> TrackingFrame {
        row(1, 0, PlayerRole::Passer, 20.0, 25.0)
    }

    /// Defender at (38, 25) facing the passer and backpedaling away from the ball.
    fn baited_defender() -> TrackingFrame {
        let mut d = row(10, 0, PlayerRole::DefensiveCoverage, 38.0, 25.0);
        d.orientation = Some(270.0);
        d.direction = Some(270.0);
        d.speed = Some(4.0);
        d.player_name = Some("Corner".to_string());
        d.player_position = Some("CB".to_string());
        d
    }

    fn analyzed(outcome: PlayOutcome) -> PlayMetricsResult {
        match outcome {
            PlayOutcome::Analyzed(row) => *row,
            PlayOutcome::Excluded(reason) => panic!("unexpected exclusion: {}", reason),
        }
    }

    #[test]
    fn test_end_to_end_puppeteer() {
        let mut play = static_play(&[passer(), baited_defender()], 20, BALL);
        play.info.epa = Some(1.25);
        play.info.pass_result = Some("C".to_string());

        let row = analyzed(analyze_play(&play, &AnalysisConfig::default()));
        assert_eq!(row.leak_cause, LeakCause::Puppeteer);
        assert!(row.clv > 0.0);
        assert_eq!(row.nfl_id, 10);
        assert_eq!(row.player_name.as_deref(), Some("Corner"));
        assert_eq!(row.qb_nfl_id, 1);
        assert_eq!(row.decoy_name, None);
        assert_eq!(row.epa, Some(1.25));
        assert_eq!(row.pass_result.as_deref(), Some("C"));
    }

    #[test]
    fn test_short_flight_leaves_post_metrics_undefined() {
        let mut play = static_play(&[passer(), baited_defender()], 20, BALL);
        for i in 1..=3 {
            let mut f = baited_defender();
            f.frame_id = 20 + i;
            f.phase = Phase::PostThrow;
            play.frames.push(f);
        }
        play.frames.sort_by_key(|f| (f.nfl_id, f.frame_id));

        let row = analyzed(analyze_play(&play, &AnalysisConfig::default()));
        assert_eq!(row.bia_efficiency, None);
        assert_eq!(row.reaction_delay, None);
        assert_eq!(row.recovery_tax, None);
        assert_eq!(row.closing_speed, None);
        assert!(row.clv > 0.0);
        assert_eq!(row.leak_cause, LeakCause::Puppeteer);
    }

    #[test]
    fn test_missing_victim_kinematics_is_excluded() {
        let mut d = baited_defender();
        d.speed = None;
        let play = static_play(&[passer(), d], 20, BALL);
        assert_eq!(
            analyze_play(&play, &AnalysisConfig::default()),
            PlayOutcome::Excluded(Exclusion::NoVictimKinematics)
        );
    }

    #[test]
    fn test_stationary_victim_without_sensor_scores_zero() {
        let mut d = row(10, 0, PlayerRole::DefensiveCoverage, BALL.0, BALL.1);
        d.speed = None;
        d.direction = None;
        d.acceleration = None;
        d.orientation = None;
        let cfg = AnalysisConfig::default();
        let mut play = static_play(&[passer(), d], 20, BALL);
        recover_play(&mut play, &cfg);

        let row = analyzed(analyze_play(&play, &cfg));
        assert_eq!(row.nfl_id, 10);
        assert!(row.clv.abs() < 1e-9);
    }

    #[test]
    fn test_analyze_plays_sorts_and_counts() {
        let cfg = AnalysisConfig::default();
        let mut plays = Vec::new();
        for play_id in (1..=40).rev() {
            let mut p = static_play(&[passer(), baited_defender()], 20, BALL);
            p.key = PlayKey::new(7, play_id);
            if play_id % 10 == 0 {
                p.ball_land = None;
            }
            plays.push(p);
        }

        let report = analyze_plays(&plays, &cfg);
        assert_eq!(report.plays_seen, 40);
        assert_eq!(report.results.len(), 36);
        assert_eq!(report.exclusions.get(&Exclusion::MissingBallLanding), Some(&4));
        assert_eq!(report.excluded_total(), 4);
        assert!(report
            .results
            .windows(2)
            .all(|w| (w[0].game_id, w[0].play_id) < (w[1].game_id, w[1].play_id)));
    }

    #[test]
    fn test_report_merge() {
        let cfg = AnalysisConfig::default();
        let mut a = static_play(&[passer(), baited_defender()], 20, BALL);
        a.key = PlayKey::new(2, 1);
        let mut b = a.clone();
        b.key = PlayKey::new(1, 1);
        let mut c = a.clone();
        c.ball_land = None;

        let mut report = analyze_plays(&[a, c], &cfg);
        report.merge(analyze_plays(&[b], &cfg));
        assert_eq!(report.plays_seen, 3);
        assert_eq!(report.results[0].game_id, 1);
        assert_eq!(report.excluded_total(), 1);
    }

    fn raw_pre(play_id: i64, nfl_id: i64, frame_id: i32, role: &str, x: f64) -> RawPreFrame {
        RawPreFrame {
            game_id: 1,
            play_id,
            nfl_id,
            frame_id,
            play_direction: Some("left".to_string()),
            player_name: Some(format!("P{}", nfl_id)),
            player_position: Some("CB".to_string()),
            player_side: Some("Defense".to_string()),
            player_role: Some(role.to_string()),
            x,
            y: 20.0,
            s: None,
            a: None,
            dir: None,
            o: None,
            ball_land_x: Some(60.0),
            ball_land_y: Some(20.0),
        }
    }

    fn supplementary(play_id: i64, coverage: &str) -> SupplementaryPlay {
        SupplementaryPlay {
            game_id: 1,
            play_id,
            week: Some(1),
            pass_result: Some("I".to_string()),
            team_coverage_man_zone: Some(coverage.to_string()),
            team_coverage_type: None,
            expected_points_added: Some(-0.4),
            possession_team: None,
        }
    }

    #[test]
    fn test_prepare_week() {
        let filter = SupplementaryFilter::from_rows(&[
            supplementary(1, "ZONE_COVERAGE"),
            supplementary(2, "MAN_COVERAGE"),
        ]);
        let mut pre = Vec::new();
        for f in 1..=5 {
            pre.push(raw_pre(1, 10, f, "Defensive Coverage", 70.0 - f as f64));
            pre.push(raw_pre(2, 10, f, "Defensive Coverage", 70.0));
        }
        let post = vec![RawPostFrame {
            game_id: 1,
            play_id: 1,
            nfl_id: 10,
            frame_id: 1,
            x: 64.0,
            y: 20.0,
        }];

        let week = prepare_week(pre, post, &filter, &AnalysisConfig::default());
        assert_eq!(week.plays.len(), 1);
        assert_eq!(week.filtered_out, 1);
        assert_eq!(week.mirrored, 1);

        let play = &week.plays[0];
        assert_eq!(play.key, PlayKey::new(1, 1));
        assert_eq!(play.info.epa, Some(-0.4));
        let (bx, by) = play.ball_land.unwrap();
        assert!((bx - 60.0).abs() < 1e-9 && (by - 33.3).abs() < 1e-9);
        let track = play.track(10);
        assert_eq!(track.len(), 6);
        // mirrored x' = 120 - x: moving toward +x at 10 yd/s
        assert!((track[0].x - 51.0).abs() < 1e-9);
        assert!((track[1].speed.unwrap() - 10.0).abs() < 1e-6);
        assert!((track[1].direction.unwrap() - 90.0).abs() < 1e-6);
        assert_eq!(track[5].phase, Phase::PostThrow);
        assert_eq!(track[5].frame_id, 6);
        assert!(week.recovery.speed_derived > 0);
    }
}
