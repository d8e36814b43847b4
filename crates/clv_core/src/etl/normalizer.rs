//! # Coordinate Normalizer
//!
//! Rewrites plays recorded right-to-left so that the offense always
//! advances toward +x.
//!
//! Mirror rule: `x' = L - x`, `y' = W - y`, angles rotate by 180 degrees.
//! The ball-landing point is mirrored the same way. Plays without a
//! direction flag pass through unchanged.

use crate::config::FieldConfig;
use crate::geometry::flip_angle_deg;
use crate::models::{Play, PlayDirection, TrackingFrame};

fn mirror_frame(frame: &mut TrackingFrame, field: &FieldConfig) {
    frame.x = field.length_yd - frame.x;
    frame.y = field.width_yd - frame.y;
    frame.direction = frame.direction.map(flip_angle_deg);
    frame.orientation = frame.orientation.map(flip_angle_deg);
}

/// Unconditionally mirror every coordinate and angle of a play.
pub fn mirror_play(play: &mut Play, field: &FieldConfig) {
    for frame in &mut play.frames {
        mirror_frame(frame, field);
    }
    play.ball_land = play
        .ball_land
        .map(|(x, y)| (field.length_yd - x, field.width_yd - y));
}

/// Mirror the play if it was recorded moving left. Returns whether it was
/// rewritten. The direction flag is kept as recorded.
pub fn normalize_play(play: &mut Play, field: &FieldConfig) -> bool {
    match play.direction {
        Some(PlayDirection::Left) => {
            mirror_play(play, field);
            true
        }
        Some(PlayDirection::Right) | None => false,
    }
}
