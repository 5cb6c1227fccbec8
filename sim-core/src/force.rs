//! Scalar force shaping between two particles.
//!
//! The force a rule produces is the sum of two terms:
//!
//! - a long-range term that starts at `g` when the particles touch and fades
//!   linearly to zero at `max_distance` (attractive for `g > 0`, repulsive
//!   for `g < 0`);
//! - a short-range term that is always repulsive, worth `-3 |g|` at contact
//!   and fading to zero at `min_distance`.
//!
//! Positive results pull the particle toward its neighbour.

/// Strength of the short-range repulsion relative to `|g|`.
pub const SHORT_RANGE_FACTOR: f32 = 3.0;

/// Linear interpolation with `t` clamped to `[0, 1]`.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t.clamp(0.0, 1.0)
}

/// Force magnitude at `distance` for a rule `(g, min_distance, max_distance)`.
///
/// Total over `distance >= 0` as long as both distances are positive.
#[inline]
pub fn force(distance: f32, g: f32, min_distance: f32, max_distance: f32) -> f32 {
    let long_range = lerp(g, 0.0, distance / max_distance);
    let short_range = lerp(g.abs(), 0.0, distance / min_distance);
    long_range - SHORT_RANGE_FACTOR * short_range
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-6;

    #[test]
    fn lerp_clamps_t() {
        assert_eq!(lerp(1.0, 0.0, -1.0), 1.0);
        assert_eq!(lerp(1.0, 0.0, 2.0), 0.0);
        assert!((lerp(0.1, 1.0, 0.5) - 0.55).abs() < EPS);
    }

    #[test]
    fn contact_is_strongly_repulsive() {
        // g - 3|g| at distance zero
        assert!((force(0.0, 1.0, 0.5, 2.0) - -2.0).abs() < EPS);
        assert!((force(0.0, -1.0, 0.5, 2.0) - -4.0).abs() < EPS);
    }

    #[test]
    fn fades_out_at_max_distance() {
        assert!(force(2.0, 0.8, 0.5, 2.0).abs() < EPS);
        assert!(force(5.0, -0.8, 0.5, 2.0).abs() < EPS);
    }

    #[test]
    fn between_min_and_max_only_long_range_remains() {
        // short-range term has already reached zero at distance 1 > min 0.5
        assert!((force(1.0, 1.0, 0.5, 2.0) - 0.5).abs() < EPS);
        assert!((force(1.0, -1.0, 0.5, 2.0) - -0.5).abs() < EPS);
    }

    #[test]
    fn zero_gain_means_no_force() {
        for d in [0.0, 0.25, 1.0, 3.0] {
            assert_eq!(force(d, 0.0, 0.5, 2.0), 0.0);
        }
    }

    #[test]
    fn short_range_inside_min_distance() {
        // d = 0.25, min = 0.5: long = lerp(1, 0, 0.125) = 0.875, short = 3 * 0.5
        assert!((force(0.25, 1.0, 0.5, 2.0) - (0.875 - 1.5)).abs() < EPS);
    }
}
