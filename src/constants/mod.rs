//! Constants module for geodetic calculations

use std::f64::consts::PI;

// Ellipsoid
/// WGS84 equatorial (semi-major) radius in meters
pub const WGS84_EQUATORIAL_RADIUS: f64 = 6_378_137.0;
/// WGS84 polar (semi-minor) radius in meters
pub const WGS84_POLAR_RADIUS: f64 = 6_356_752.314_245_179_3;
/// Squared ellipsoid-normalized norm below which a point counts as "at the center"
pub const CENTER_TOLERANCE_SQUARED: f64 = 0.1;

// Tolerances
/// Convergence threshold of the surface projection residual
pub const EPSILON12: f64 = 1e-12;
/// Tolerance used to detect points on the polar axis
pub const EPSILON14: f64 = 1e-14;
/// Upper bound on Newton steps when projecting onto the ellipsoid surface
pub const MAX_SURFACE_ITERATIONS: usize = 1000;

// Angles
/// Degrees to radians conversion factor
pub const DEG2RAD: f64 = PI / 180.0;
/// Radians to degrees conversion factor
pub const RAD2DEG: f64 = 180.0 / PI;

/// Compare two values with a combined absolute/relative tolerance
///
/// Returns true when `|left - right| <= epsilon` or when the difference is
/// within `epsilon` relative to the larger magnitude of the two.
pub fn equals_epsilon(left: f64, right: f64, epsilon: f64) -> bool {
    let abs_diff = (left - right).abs();
    abs_diff <= epsilon || abs_diff <= epsilon * left.abs().max(right.abs())
}

/// Sign of a value as -1, 0 or 1
///
/// Unlike `f64::signum`, zero (of either sign) maps to 0.
pub fn sign(value: f64) -> f64 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equals_epsilon_absolute() {
        assert!(equals_epsilon(0.0, 1e-15, EPSILON14));
        assert!(!equals_epsilon(0.0, 1e-13, EPSILON14));
    }

    #[test]
    fn test_equals_epsilon_relative() {
        // Absolute difference of 1e-3 is tiny next to 1e12
        assert!(equals_epsilon(1e12, 1e12 + 1e-3, EPSILON14));
        assert!(!equals_epsilon(1.0, 1.0 + 1e-3, EPSILON14));
    }

    #[test]
    fn test_sign() {
        assert_eq!(sign(3.5), 1.0);
        assert_eq!(sign(-0.1), -1.0);
        assert_eq!(sign(0.0), 0.0);
        assert_eq!(sign(-0.0), 0.0);
    }

    #[test]
    fn test_degree_radian_factors() {
        assert!((180.0 * DEG2RAD - PI).abs() < 1e-15);
        assert!((PI * RAD2DEG - 180.0).abs() < 1e-12);
    }
}
