//! Play groups.

use super::frame::{Phase, PlayDirection, TrackingFrame};
use crate::geometry::FieldPos;
use serde::{Deserialize, Serialize};

/// Play identity `(game_id, play_id)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayKey {
    pub game_id: i64,
    pub play_id: i64,
}

impl PlayKey {
    pub fn new(game_id: i64, play_id: i64) -> Self {
        Self { game_id, play_id }
    }
}

impl std::fmt::Display for PlayKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.game_id, self.play_id)
    }
}

/// Externally supplied play context (coverage, outcome).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayInfo {
    pub week: Option<u32>,
    pub pass_result: Option<String>,
    pub coverage_man_zone: Option<String>,
    pub coverage_type: Option<String>,
    pub epa: Option<f64>,
    pub possession_team: Option<String>,
}

/// A stitched play: play-level attributes plus its frames.
///
/// `frames` is sorted by `(nfl_id, frame_id)` with no duplicate keys, so a
/// player's track is one contiguous slice.
#[derive(Debug, Clone, PartialEq)]
pub struct Play {
    pub key: PlayKey,
    pub direction: Option<PlayDirection>,
    pub ball_land: Option<FieldPos>,
    pub info: PlayInfo,
    pub frames: Vec<TrackingFrame>,
}

impl Play {
    /// Designated throw frame: max frame id among pre-throw rows.
    pub fn throw_frame(&self) -> Option<i32> {
        self.frames
            .iter()
            .filter(|f| f.phase == Phase::PreThrow)
            .map(|f| f.frame_id)
            .max()
    }

    /// All rows at one frame id.
    pub fn frames_at(&self, frame_id: i32) -> impl Iterator<Item = &TrackingFrame> {
        self.frames.iter().filter(move |f| f.frame_id == frame_id)
    }

    /// One player's track, ordered by frame id.
    pub fn track(&self, nfl_id: i64) -> &[TrackingFrame] {
        let start = self.frames.partition_point(|f| f.nfl_id < nfl_id);
        let end = self.frames.partition_point(|f| f.nfl_id <= nfl_id);
        &self.frames[start..end]
    }

    /// Contiguous `(start, end)` index ranges, one per player.
    pub fn track_ranges(&self) -> Vec<(usize, usize)> {
        let mut ranges = Vec::new();
        let mut start = 0;
        for i in 1..=self.frames.len() {
            if i == self.frames.len() || self.frames[i].nfl_id != self.frames[start].nfl_id {
                if start < i {
                    ranges.push((start, i));
                }
                start = i;
            }
        }
        ranges
    }

    pub fn has_pre_throw(&self) -> bool {
        self.frames.iter().any(|f| f.phase == Phase::PreThrow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(nfl_id: i64, frame_id: i32, phase: Phase) -> TrackingFrame {
        TrackingFrame {
            game_id: 1,
            play_id: 1,
            nfl_id,
            frame_id,
            phase,
            x: 0.0,
            y: 0.0,
            speed: None,
            acceleration: None,
            direction: None,
            orientation: None,
            player_name: None,
            player_position: None,
            player_role: None,
            player_side: None,
        }
    }

    fn play() -> Play {
        Play {
            key: PlayKey::new(1, 1),
            direction: None,
            ball_land: None,
            info: PlayInfo::default(),
            frames: vec![
                frame(10, 1, Phase::PreThrow),
                frame(10, 2, Phase::PreThrow),
                frame(10, 3, Phase::PostThrow),
                frame(20, 1, Phase::PreThrow),
                frame(20, 2, Phase::PreThrow),
                frame(30, 3, Phase::PostThrow),
            ],
        }
    }

    #[test]
    fn test_throw_frame_ignores_post_rows() {
        assert_eq!(play().throw_frame(), Some(2));
    }

    #[test]
    fn test_track_slices() {
        let p = play();
        assert_eq!(p.track(10).len(), 3);
        assert_eq!(p.track(20).len(), 2);
        assert_eq!(p.track(30).len(), 1);
        assert!(p.track(99).is_empty());
        assert_eq!(p.track_ranges(), vec![(0, 3), (3, 5), (5, 6)]);
    }

    #[test]
    fn test_frames_at() {
        assert_eq!(play().frames_at(1).count(), 2);
    }
}
