//! Field geometry and angle conventions
//!
//! ## Conventions
//!
//! **Field coordinates** (yards):
//! - x: 0..120 along the field length (end zones included)
//! - y: 0..53.3 across the field width
//!
//! **Compass angles** (tracking `dir` / `o`): 0 = +y, increasing clockwise.
//!
//! **Math angles**: 0 = +x, increasing counter-clockwise.
//!
//! `math = 90 - compass` (mod 360), and the conversion is its own inverse.

/// Position in yards `(x, y)`.
pub type FieldPos = (f64, f64);

/// 2D vector in yards or yards/second.
pub type Vec2 = (f64, f64);

#[inline]
pub fn distance(a: FieldPos, b: FieldPos) -> f64 {
    let dx = b.0 - a.0;
    let dy = b.1 - a.1;
    (dx * dx + dy * dy).sqrt()
}

#[inline]
pub fn norm(v: Vec2) -> f64 {
    (v.0 * v.0 + v.1 * v.1).sqrt()
}

#[inline]
pub fn dot(a: Vec2, b: Vec2) -> f64 {
    a.0 * b.0 + a.1 * b.1
}

/// Unit vector along `v`; the denominator is padded with `eps` so a zero
/// vector maps to (0, 0) instead of NaN.
#[inline]
pub fn unit_or_zero(v: Vec2, eps: f64) -> Vec2 {
    let n = norm(v) + eps;
    (v.0 / n, v.1 / n)
}

/// Unit vector from `from` toward `to` (epsilon-guarded).
#[inline]
pub fn unit_toward(from: FieldPos, to: FieldPos, eps: f64) -> Vec2 {
    unit_or_zero((to.0 - from.0, to.1 - from.1), eps)
}

/// Compass <-> math angle conversion (degrees, result in [0, 360)).
#[inline]
pub fn compass_to_math_deg(deg: f64) -> f64 {
    (90.0 - deg).rem_euclid(360.0)
}

/// Unit heading vector for a compass angle.
#[inline]
pub fn compass_unit(direction_deg: f64) -> Vec2 {
    let rad = (90.0 - direction_deg).to_radians();
    (rad.cos(), rad.sin())
}

/// Velocity vector from speed and compass direction.
#[inline]
pub fn velocity(speed: f64, direction_deg: f64) -> Vec2 {
    let u = compass_unit(direction_deg);
    (speed * u.0, speed * u.1)
}

/// Compass heading of a displacement `(dx, dy)`, in [0, 360).
#[inline]
pub fn compass_from_delta(dx: f64, dy: f64) -> f64 {
    (90.0 - dy.atan2(dx).to_degrees()).rem_euclid(360.0)
}

/// Math-convention bearing from `from` to `to`, in [0, 360).
#[inline]
pub fn math_bearing_deg(from: FieldPos, to: FieldPos) -> f64 {
    (to.1 - from.1).atan2(to.0 - from.0).to_degrees().rem_euclid(360.0)
}

/// Minimal circular difference between two angles, in [0, 180].
#[inline]
pub fn angular_difference_deg(a: f64, b: f64) -> f64 {
    let diff = (a - b).rem_euclid(360.0);
    diff.min(360.0 - diff)
}

/// Angle rotated by half a turn, in [0, 360).
#[inline]
pub fn flip_angle_deg(deg: f64) -> f64 {
    (deg + 180.0).rem_euclid(360.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_compass_unit_cardinals() {
        let north = compass_unit(0.0);
        assert!(north.0.abs() < EPS && (north.1 - 1.0).abs() < EPS);

        let east = compass_unit(90.0);
        assert!((east.0 - 1.0).abs() < EPS && east.1.abs() < EPS);

        let west = compass_unit(270.0);
        assert!((west.0 + 1.0).abs() < EPS && west.1.abs() < EPS);
    }

    #[test]
    fn test_compass_from_delta_matches_unit() {
        for deg in [0.0, 45.0, 90.0, 135.0, 180.0, 270.0, 359.0] {
            let u = compass_unit(deg);
            let back = compass_from_delta(u.0, u.1);
            assert!(angular_difference_deg(back, deg) < 1e-6, "{} -> {}", deg, back);
        }
    }

    #[test]
    fn test_angular_difference_wraps() {
        assert!((angular_difference_deg(350.0, 10.0) - 20.0).abs() < EPS);
        assert!((angular_difference_deg(10.0, 350.0) - 20.0).abs() < EPS);
        assert!((angular_difference_deg(0.0, 180.0) - 180.0).abs() < EPS);
        assert!(angular_difference_deg(725.0, 5.0) < EPS);
    }

    #[test]
    fn test_unit_or_zero_guards_zero_vector() {
        let u = unit_or_zero((0.0, 0.0), 1e-6);
        assert_eq!(u, (0.0, 0.0));
        let u = unit_toward((1.0, 1.0), (4.0, 5.0), 1e-6);
        assert!((norm(u) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_math_bearing() {
        assert!((math_bearing_deg((0.0, 0.0), (-5.0, 0.0)) - 180.0).abs() < EPS);
        assert!((compass_to_math_deg(270.0) - 180.0).abs() < EPS);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: flipping twice restores the angle
            #[test]
            fn prop_flip_involution(deg in 0.0f64..360.0f64) {
                let twice = flip_angle_deg(flip_angle_deg(deg));
                prop_assert!(angular_difference_deg(twice, deg) < 1e-9);
            }

            /// Property: angular difference is symmetric and bounded
            #[test]
            fn prop_angular_difference_bounded(a in -720.0f64..720.0f64, b in -720.0f64..720.0f64) {
                let d = angular_difference_deg(a, b);
                prop_assert!((0.0..=180.0).contains(&d));
                prop_assert!((d - angular_difference_deg(b, a)).abs() < 1e-9);
            }

            /// Property: compass <-> math conversion is an involution
            #[test]
            fn prop_compass_math_involution(deg in 0.0f64..360.0f64) {
                let back = compass_to_math_deg(compass_to_math_deg(deg));
                prop_assert!(angular_difference_deg(back, deg) < 1e-9);
            }
        }
    }
}
