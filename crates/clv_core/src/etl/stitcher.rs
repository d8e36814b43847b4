//! # Timeline Stitcher
//!
//! Joins a play's pre-event and post-event segments into one timeline.
//!
//! ## Algorithm
//! 1. `offset = max(pre.frame_id)` per play
//! 2. Every post-event frame id is shifted by `offset`
//! 3. Name/position/role/side from the pre-event segment is broadcast onto
//!    post-event rows via `nfl_id`
//! 4. On a key collision the post-event row wins
//!
//! A play with no pre-event rows cannot be stitched (offset undefined); a
//! play with no post-event rows stays valid with only the pre-throw phase.

use crate::error::{CoreError, Result};
use crate::geometry::distance;
use crate::models::{
    Phase, Play, PlayDirection, PlayInfo, PlayKey, PlayerRole, PlayerSide, RawPostFrame,
    RawPreFrame, TrackingFrame,
};
use rustc_hash::FxHashMap;
use std::collections::{BTreeMap, BTreeSet};
use tracing::warn;

/// Seam jump above which a player's pre/post positions look inconsistent.
pub const SEAM_JUMP_THRESHOLD_YD: f64 = 2.0;

/// Continuity diagnostics for one stitched play.
#[derive(Debug, Clone, PartialEq)]
pub struct StitchReport {
    pub key: PlayKey,
    /// Offset added to post-event frame ids
    pub offset: i32,
    pub pre_rows: usize,
    pub post_rows: usize,
    /// Post-event numbering restarted near 1 (expected for this feed)
    pub numbering_restarted: bool,
    /// Largest distance between a player's last pre and first post position
    pub max_seam_jump_yd: Option<f64>,
    /// Post-event players that never appear in the pre-event segment
    pub players_without_metadata: usize,
}

impl StitchReport {
    pub fn seam_jump_flagged(&self) -> bool {
        self.max_seam_jump_yd
            .map(|d| d > SEAM_JUMP_THRESHOLD_YD)
            .unwrap_or(false)
    }

    pub fn has_anomaly(&self) -> bool {
        self.seam_jump_flagged() || self.players_without_metadata > 0
    }
}

/// Result of stitching one week of raw rows.
#[derive(Debug, Clone, Default)]
pub struct StitchedWeek {
    pub plays: Vec<Play>,
    pub reports: Vec<StitchReport>,
    /// Plays that only had post-event rows
    pub dropped: Vec<PlayKey>,
}

#[derive(Debug, Clone, Default)]
struct PlayerMeta {
    name: Option<String>,
    position: Option<String>,
    role: Option<PlayerRole>,
    side: Option<PlayerSide>,
}

fn collect_metadata(pre: &[RawPreFrame]) -> FxHashMap<i64, PlayerMeta> {
    let mut meta: FxHashMap<i64, PlayerMeta> = FxHashMap::default();
    for row in pre {
        let entry = meta.entry(row.nfl_id).or_default();
        if entry.name.is_none() {
            entry.name = row.player_name.clone();
        }
        if entry.position.is_none() {
            entry.position = row.player_position.clone();
        }
        if entry.role.is_none() {
            entry.role = row.player_role.as_deref().map(PlayerRole::parse);
        }
        if entry.side.is_none() {
            entry.side = row.player_side.as_deref().and_then(PlayerSide::parse);
        }
    }
    meta
}

fn with_meta(mut frame: TrackingFrame, meta: Option<&PlayerMeta>) -> TrackingFrame {
    if let Some(m) = meta {
        frame.player_name = m.name.clone();
        frame.player_position = m.position.clone();
        frame.player_role = m.role.clone();
        frame.player_side = m.side;
    }
    frame
}

/// Stitch one play's segments.
pub fn stitch_play(
    key: PlayKey,
    pre: &[RawPreFrame],
    post: &[RawPostFrame],
) -> Result<(Play, StitchReport)> {
    let offset = pre
        .iter()
        .map(|r| r.frame_id)
        .max()
        .ok_or(CoreError::NoPreEventFrames {
            game_id: key.game_id,
            play_id: key.play_id,
        })?;

    let direction = pre
        .iter()
        .find_map(|r| r.play_direction.as_deref().and_then(PlayDirection::parse));
    let ball_land = pre.iter().find_map(|r| match (r.ball_land_x, r.ball_land_y) {
        (Some(x), Some(y)) => Some((x, y)),
        _ => None,
    });
    let meta = collect_metadata(pre);

    let mut rows: BTreeMap<(i64, i32), TrackingFrame> = BTreeMap::new();
    for r in pre {
        let frame = TrackingFrame {
            game_id: key.game_id,
            play_id: key.play_id,
            nfl_id: r.nfl_id,
            frame_id: r.frame_id,
            phase: Phase::PreThrow,
            x: r.x,
            y: r.y,
            speed: r.s,
            acceleration: r.a,
            direction: r.dir,
            orientation: r.o,
            player_name: None,
            player_position: None,
            player_role: None,
            player_side: None,
        };
        rows.insert((r.nfl_id, r.frame_id), with_meta(frame, meta.get(&r.nfl_id)));
    }

    // Seam bookkeeping: last pre position and first post position per player
    let mut last_pre: FxHashMap<i64, (i32, (f64, f64))> = FxHashMap::default();
    for r in pre {
        let e = last_pre.entry(r.nfl_id).or_insert((r.frame_id, (r.x, r.y)));
        if r.frame_id >= e.0 {
            *e = (r.frame_id, (r.x, r.y));
        }
    }
    let mut first_post: FxHashMap<i64, (i32, (f64, f64))> = FxHashMap::default();
    let mut orphans: BTreeSet<i64> = BTreeSet::new();

    for r in post {
        let e = first_post.entry(r.nfl_id).or_insert((r.frame_id, (r.x, r.y)));
        if r.frame_id < e.0 {
            *e = (r.frame_id, (r.x, r.y));
        }
        if !meta.contains_key(&r.nfl_id) {
            orphans.insert(r.nfl_id);
        }

        let frame_id = r.frame_id + offset;
        let frame = TrackingFrame {
            game_id: key.game_id,
            play_id: key.play_id,
            nfl_id: r.nfl_id,
            frame_id,
            phase: Phase::PostThrow,
            x: r.x,
            y: r.y,
            speed: None,
            acceleration: None,
            direction: None,
            orientation: None,
            player_name: None,
            player_position: None,
            player_role: None,
            player_side: None,
        };
        rows.insert((r.nfl_id, frame_id), with_meta(frame, meta.get(&r.nfl_id)));
    }

    let max_seam_jump_yd = first_post
        .iter()
        .filter_map(|(id, (_, post_pos))| {
            last_pre
                .get(id)
                .map(|(_, pre_pos)| distance(*pre_pos, *post_pos))
        })
        .fold(None, |acc: Option<f64>, d| Some(acc.map_or(d, |a| a.max(d))));

    let report = StitchReport {
        key,
        offset,
        pre_rows: pre.len(),
        post_rows: post.len(),
        numbering_restarted: post.iter().map(|r| r.frame_id).min().map_or(false, |m| m <= 1),
        max_seam_jump_yd,
        players_without_metadata: orphans.len(),
    };

    let play = Play {
        key,
        direction,
        ball_land,
        info: PlayInfo::default(),
        frames: rows.into_values().collect(),
    };

    Ok((play, report))
}

/// Group a week's raw rows by play and stitch each play.
///
/// Plays with no pre-event rows are dropped and listed in `dropped`.
pub fn stitch_week(pre: Vec<RawPreFrame>, post: Vec<RawPostFrame>) -> StitchedWeek {
    let mut pre_by_play: FxHashMap<PlayKey, Vec<RawPreFrame>> = FxHashMap::default();
    for row in pre {
        pre_by_play.entry(row.key()).or_default().push(row);
    }
    let mut post_by_play: FxHashMap<PlayKey, Vec<RawPostFrame>> = FxHashMap::default();
    for row in post {
        post_by_play.entry(row.key()).or_default().push(row);
    }

    let keys: BTreeSet<PlayKey> = pre_by_play
        .keys()
        .chain(post_by_play.keys())
        .copied()
        .collect();

    let mut week = StitchedWeek::default();
    for key in keys {
        let pre_rows = pre_by_play.get(&key).map(Vec::as_slice).unwrap_or(&[]);
        let post_rows = post_by_play.get(&key).map(Vec::as_slice).unwrap_or(&[]);

        match stitch_play(key, pre_rows, post_rows) {
            Ok((play, report)) => {
                if report.seam_jump_flagged() {
                    warn!(
                        play = %key,
                        jump_yd = report.max_seam_jump_yd.unwrap_or_default(),
                        "position jump across the throw seam"
                    );
                }
                if report.players_without_metadata > 0 {
                    warn!(
                        play = %key,
                        players = report.players_without_metadata,
                        "post-event players missing pre-event metadata"
                    );
                }
                week.plays.push(play);
                week.reports.push(report);
            }
            Err(e) => {
                warn!(play = %key, error = %e, "dropping play");
                week.dropped.push(key);
            }
        }
    }
    week
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pre(nfl_id: i64, frame_id: i32, x: f64, role: &str) -> RawPreFrame {
        RawPreFrame {
            game_id: 1,
            play_id: 7,
            nfl_id,
            frame_id,
            play_direction: Some("right".to_string()),
            player_name: Some(format!("Player {}", nfl_id)),
            player_position: Some("CB".to_string()),
            player_side: Some("Defense".to_string()),
            player_role: Some(role.to_string()),
            x,
            y: 20.0,
            s: Some(1.0),
            a: Some(0.0),
            dir: Some(90.0),
            o: Some(90.0),
            ball_land_x: Some(50.0),
            ball_land_y: Some(20.0),
        }
    }

    fn post(nfl_id: i64, frame_id: i32, x: f64) -> RawPostFrame {
        RawPostFrame {
            game_id: 1,
            play_id: 7,
            nfl_id,
            frame_id,
            x,
            y: 20.0,
        }
    }

    fn key() -> PlayKey {
        PlayKey::new(1, 7)
    }

    #[test]
    fn test_post_frames_continue_after_pre() {
        let pre_rows: Vec<_> = (1..=20)
            .flat_map(|f| {
                vec![
                    pre(100, f, 10.0 + f as f64 * 0.1, "Defensive Coverage"),
                    pre(200, f, 30.0, "Passer"),
                ]
            })
            .collect();
        let post_rows: Vec<_> = (1..=8).map(|f| post(100, f, 12.0 + f as f64 * 0.1)).collect();

        let (play, report) = stitch_play(key(), &pre_rows, &post_rows).unwrap();
        assert_eq!(report.offset, 20);
        assert!(report.numbering_restarted);

        let track = play.track(100);
        let max_pre = track.iter().filter(|f| f.phase == Phase::PreThrow).map(|f| f.frame_id).max().unwrap();
        let min_post = track.iter().filter(|f| f.phase == Phase::PostThrow).map(|f| f.frame_id).min().unwrap();
        assert_eq!(max_pre, 20);
        assert_eq!(min_post, 1 + report.offset);
        assert!(min_post > max_pre);

        // strictly increasing, no duplicate frame ids
        for w in track.windows(2) {
            assert!(w[0].frame_id < w[1].frame_id);
        }
    }

    #[test]
    fn test_metadata_broadcast_to_post_rows() {
        let pre_rows = vec![pre(100, 1, 10.0, "Defensive Coverage"), pre(100, 2, 10.1, "Defensive Coverage")];
        let post_rows = vec![post(100, 1, 10.2), post(100, 2, 10.3)];

        let (play, report) = stitch_play(key(), &pre_rows, &post_rows).unwrap();
        let track = play.track(100);
        assert_eq!(track.len(), 4);
        for f in track {
            assert_eq!(f.player_name.as_deref(), Some("Player 100"));
            assert_eq!(f.player_role, Some(PlayerRole::DefensiveCoverage));
            assert_eq!(f.player_side, Some(PlayerSide::Defense));
        }
        assert_eq!(report.players_without_metadata, 0);
        assert!(!report.seam_jump_flagged());
    }

    #[test]
    fn test_post_row_wins_on_collision() {
        let pre_rows = vec![pre(100, 1, 10.0, "Defensive Coverage"), pre(100, 2, 10.1, "Defensive Coverage")];
        // raw frame 0 lands on stitched frame 2
        let post_rows = vec![post(100, 0, 99.0)];

        let (play, _) = stitch_play(key(), &pre_rows, &post_rows).unwrap();
        let track = play.track(100);
        assert_eq!(track.len(), 2);
        assert_eq!(track[1].frame_id, 2);
        assert_eq!(track[1].phase, Phase::PostThrow);
        assert!((track[1].x - 99.0).abs() < 1e-9);
    }

    #[test]
    fn test_play_without_post_rows_is_valid() {
        let pre_rows = vec![pre(100, 1, 10.0, "Passer")];
        let (play, report) = stitch_play(key(), &pre_rows, &[]).unwrap();
        assert_eq!(play.frames.len(), 1);
        assert_eq!(play.ball_land, Some((50.0, 20.0)));
        assert_eq!(play.direction, Some(PlayDirection::Right));
        assert!(!report.numbering_restarted);
        assert_eq!(report.max_seam_jump_yd, None);
    }

    #[test]
    fn test_play_without_pre_rows_is_dropped() {
        let err = stitch_play(key(), &[], &[post(100, 1, 10.0)]).unwrap_err();
        assert!(matches!(err, CoreError::NoPreEventFrames { game_id: 1, play_id: 7 }));
        assert!(err.is_recoverable());

        let mut orphan = post(100, 1, 10.0);
        orphan.play_id = 8;
        let week = stitch_week(vec![pre(100, 1, 10.0, "Passer")], vec![orphan]);
        assert_eq!(week.plays.len(), 1);
        assert_eq!(week.dropped, vec![PlayKey::new(1, 8)]);
    }

    #[test]
    fn test_seam_jump_and_orphans_reported() {
        let pre_rows = vec![pre(100, 1, 10.0, "Defensive Coverage")];
        let post_rows = vec![post(100, 1, 15.0), post(300, 1, 40.0)];

        let (play, report) = stitch_play(key(), &pre_rows, &post_rows).unwrap();
        assert!(report.seam_jump_flagged());
        assert!((report.max_seam_jump_yd.unwrap() - 5.0).abs() < 1e-9);
        assert_eq!(report.players_without_metadata, 1);
        assert!(report.has_anomaly());
        assert_eq!(play.track(300)[0].player_name, None);
    }
}
