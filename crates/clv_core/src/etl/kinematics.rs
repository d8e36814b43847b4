//! # Kinematics Recovery
//!
//! Fills missing speed, direction, acceleration and orientation from
//! consecutive positions of the same player within the same play.
//!
//! ## Fallback chain (per field)
//!
//! | Field | Tier 1 | Tier 2 | Tier 3 |
//! |-------|--------|--------|--------|
//! | speed | sensor `s` | `|d| / dt` | undefined |
//! | direction | sensor `dir` | compass heading of `d` | undefined |
//! | acceleration | sensor `a` | `|ds| / dt` | undefined |
//! | orientation | sensor `o` | `dir` when speed > commit speed | last known `o` |
//!
//! `d` is the displacement from the previous frame of the same player and
//! `dt = frame gap * frame interval`. The first frame of a track has no
//! derived values. A present sensor value is never overwritten.

use crate::config::AnalysisConfig;
use crate::geometry::{compass_from_delta, distance};
use crate::models::{Play, TrackingFrame};

/// Where a resolved field value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldSource {
    Sensor,
    Derived,
    CarriedForward,
    Undefined,
}

/// Counts of recovered fields for one play.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecoveryStats {
    pub speed_derived: usize,
    pub direction_derived: usize,
    pub acceleration_derived: usize,
    pub orientation_from_direction: usize,
    pub orientation_carried: usize,
    pub orientation_undefined: usize,
}

impl RecoveryStats {
    pub fn merge(&mut self, other: &RecoveryStats) {
        self.speed_derived += other.speed_derived;
        self.direction_derived += other.direction_derived;
        self.acceleration_derived += other.acceleration_derived;
        self.orientation_from_direction += other.orientation_from_direction;
        self.orientation_carried += other.orientation_carried;
        self.orientation_undefined += other.orientation_undefined;
    }

    pub fn total_filled(&self) -> usize {
        self.speed_derived
            + self.direction_derived
            + self.acceleration_derived
            + self.orientation_from_direction
            + self.orientation_carried
    }
}

/// Raw value if present, else the derived one.
#[inline]
pub fn resolve_field(raw: Option<f64>, derived: Option<f64>) -> (Option<f64>, FieldSource) {
    match (raw, derived) {
        (Some(v), _) => (Some(v), FieldSource::Sensor),
        (None, Some(v)) => (Some(v), FieldSource::Derived),
        (None, None) => (None, FieldSource::Undefined),
    }
}

/// Orientation chain: sensor, else heading while committed to a run,
/// else the last known orientation.
pub fn resolve_orientation(
    raw: Option<f64>,
    speed: Option<f64>,
    direction: Option<f64>,
    last_known: Option<f64>,
    commit_speed: f64,
) -> (Option<f64>, FieldSource) {
    if let Some(o) = raw {
        return (Some(o), FieldSource::Sensor);
    }
    if let (Some(s), Some(d)) = (speed, direction) {
        if s > commit_speed {
            return (Some(d), FieldSource::Derived);
        }
    }
    match last_known {
        Some(o) => (Some(o), FieldSource::CarriedForward),
        None => (None, FieldSource::Undefined),
    }
}

/// Speed from the displacement between two positions `dt` seconds apart.
#[inline]
pub fn derived_speed(prev: (f64, f64), cur: (f64, f64), dt: f64) -> Option<f64> {
    (dt > 0.0).then(|| distance(prev, cur) / dt)
}

/// Compass heading of the displacement; undefined when the player did not move.
#[inline]
pub fn derived_direction(prev: (f64, f64), cur: (f64, f64), eps: f64) -> Option<f64> {
    let (dx, dy) = (cur.0 - prev.0, cur.1 - prev.1);
    if dx.abs() < eps && dy.abs() < eps {
        return None;
    }
    Some(compass_from_delta(dx, dy))
}

struct PrevState {
    frame_id: i32,
    pos: (f64, f64),
    speed: Option<f64>,
}

fn recover_track(track: &mut [TrackingFrame], config: &AnalysisConfig, stats: &mut RecoveryStats) {
    let interval = config.window.frame_interval_s;
    let commit_speed = config.kinematics.orientation_commit_speed;
    let mut prev: Option<PrevState> = None;
    let mut last_orientation: Option<f64> = None;

    for frame in track.iter_mut() {
        let (speed_derived, dir_derived, accel_derived) = match &prev {
            Some(p) => {
                let dt = (frame.frame_id - p.frame_id) as f64 * interval;
                let s = derived_speed(p.pos, frame.pos(), dt);
                let d = derived_direction(p.pos, frame.pos(), config.epsilon);
                (s, d, dt)
            }
            None => (None, None, 0.0),
        };

        let (speed, src) = resolve_field(frame.speed, speed_derived);
        if src == FieldSource::Derived {
            stats.speed_derived += 1;
        }
        frame.speed = speed;

        let (direction, src) = resolve_field(frame.direction, dir_derived);
        if src == FieldSource::Derived {
            stats.direction_derived += 1;
        }
        frame.direction = direction;

        let accel = match (&prev, speed) {
            (Some(p), Some(s)) if accel_derived > 0.0 => {
                p.speed.map(|ps| (s - ps).abs() / accel_derived)
            }
            _ => None,
        };
        let (acceleration, src) = resolve_field(frame.acceleration, accel);
        if src == FieldSource::Derived {
            stats.acceleration_derived += 1;
        }
        frame.acceleration = acceleration;

        let (orientation, src) = resolve_orientation(
            frame.orientation,
            frame.speed,
            frame.direction,
            last_orientation,
            commit_speed,
        );
        match src {
            FieldSource::Derived => stats.orientation_from_direction += 1,
            FieldSource::CarriedForward => stats.orientation_carried += 1,
            FieldSource::Undefined => stats.orientation_undefined += 1,
            FieldSource::Sensor => {}
        }
        frame.orientation = orientation;
        if orientation.is_some() {
            last_orientation = orientation;
        }

        prev = Some(PrevState {
            frame_id: frame.frame_id,
            pos: frame.pos(),
            speed: frame.speed,
        });
    }
}

/// Recover missing kinematics for every player of a play, in place.
///
/// Tracks are processed independently; no value crosses from one player
/// to another.
pub fn recover_play(play: &mut Play, config: &AnalysisConfig) -> RecoveryStats {
    let mut stats = RecoveryStats::default();
    for (start, end) in play.track_ranges() {
        recover_track(&mut play.frames[start..end], config, &mut stats);
    }
    stats
}
