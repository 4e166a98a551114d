//! Reference ellipsoid and geographic/Cartesian conversion
//!
//! An [`Ellipsoid`] is an explicit value handed to every conversion; nothing in
//! this crate reads an ambient "current ellipsoid". The derived per-axis
//! quantities used by the surface projection are computed once at construction.
//!
//! ```rust
//! use geoframe::coordinates::Geographic;
//! use geoframe::ellipsoid::Ellipsoid;
//!
//! let wgs84 = Ellipsoid::wgs84();
//! let position = wgs84.cartographic_to_cartesian(&Geographic::from_degrees(0.0, 0.0, 0.0));
//! assert_eq!(position.x, 6_378_137.0);
//! ```

pub mod errors;

use log::{debug, trace, warn};

use crate::constants::{
    sign, CENTER_TOLERANCE_SQUARED, EPSILON12, MAX_SURFACE_ITERATIONS, WGS84_EQUATORIAL_RADIUS,
    WGS84_POLAR_RADIUS,
};
use crate::coordinates::{Cartesian3, Geographic};
pub use errors::{GeodesyError, Result};

/// A triaxial reference surface with cached derived quantities
///
/// Earth models use the biaxial form `(a, a, b)`. Radii are validated on
/// construction and never change afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipsoid {
    radii: Cartesian3,
    radii_squared: Cartesian3,
    one_over_radii: Cartesian3,
    one_over_radii_squared: Cartesian3,
    center_tolerance_squared: f64,
}

impl Ellipsoid {
    /// Build an ellipsoid from its three semi-axis radii in meters
    ///
    /// Every radius must be finite and strictly positive.
    pub fn new(x: f64, y: f64, z: f64) -> Result<Self> {
        for (axis, value) in [("x", x), ("y", y), ("z", z)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(GeodesyError::InvalidRadius { axis, value });
            }
        }
        Ok(Self::from_valid_radii(x, y, z))
    }

    /// The WGS84 ellipsoid
    pub fn wgs84() -> Self {
        Self::from_valid_radii(
            WGS84_EQUATORIAL_RADIUS,
            WGS84_EQUATORIAL_RADIUS,
            WGS84_POLAR_RADIUS,
        )
    }

    /// A sphere of radius one, handy for direction-only work and tests
    pub fn unit_sphere() -> Self {
        Self::from_valid_radii(1.0, 1.0, 1.0)
    }

    fn from_valid_radii(x: f64, y: f64, z: f64) -> Self {
        let radii = Cartesian3::new(x, y, z);
        Ellipsoid {
            radii,
            radii_squared: radii.multiply_components(&radii),
            one_over_radii: Cartesian3::new(1.0 / x, 1.0 / y, 1.0 / z),
            one_over_radii_squared: Cartesian3::new(1.0 / (x * x), 1.0 / (y * y), 1.0 / (z * z)),
            center_tolerance_squared: CENTER_TOLERANCE_SQUARED,
        }
    }

    pub fn radii(&self) -> Cartesian3 {
        self.radii
    }

    pub fn radii_squared(&self) -> Cartesian3 {
        self.radii_squared
    }

    pub fn one_over_radii(&self) -> Cartesian3 {
        self.one_over_radii
    }

    pub fn one_over_radii_squared(&self) -> Cartesian3 {
        self.one_over_radii_squared
    }

    pub fn maximum_radius(&self) -> f64 {
        self.radii.x.max(self.radii.y).max(self.radii.z)
    }

    pub fn minimum_radius(&self) -> f64 {
        self.radii.x.min(self.radii.y).min(self.radii.z)
    }

    /// Outward surface normal for a geographic position
    ///
    /// Height is ignored; only longitude and latitude define the direction.
    pub fn geodetic_surface_normal_cartographic(&self, geographic: &Geographic) -> Cartesian3 {
        Cartesian3::from_spherical(geographic.longitude, geographic.latitude)
    }

    /// Outward unit normal of the ellipsoid at (or above) a Cartesian position
    ///
    /// Computed as `normalize(p ⊙ one_over_radii_squared)`. Returns `None` for
    /// the ellipsoid center, which has no defined normal.
    pub fn geodetic_surface_normal(&self, cartesian: &Cartesian3) -> Option<Cartesian3> {
        cartesian
            .multiply_components(&self.one_over_radii_squared)
            .normalize()
    }

    /// Convert longitude, latitude (radians) and height (meters) to a geocentric position
    ///
    /// The surface point along the normal `n` is
    /// `k = (radii² ⊙ n) / sqrt(n · (radii² ⊙ n))`, and the result is `k + height * n`.
    pub fn cartographic_to_cartesian(&self, geographic: &Geographic) -> Cartesian3 {
        let n = self.geodetic_surface_normal_cartographic(geographic);
        let k = self.radii_squared.multiply_components(&n);
        let gamma = n.dot(&k).sqrt();
        k / gamma + n * geographic.height
    }

    /// Convert a batch of geographic positions
    pub fn cartographic_array_to_cartesian_array(
        &self,
        geographics: &[Geographic],
    ) -> Vec<Cartesian3> {
        geographics
            .iter()
            .map(|g| self.cartographic_to_cartesian(g))
            .collect()
    }

    /// Project a position onto the ellipsoid surface along the geodetic normal
    ///
    /// Returns `Ok(None)` when the point is so close to the center that the
    /// initial scale ratio is not finite. See
    /// [`scale_to_geodetic_surface_bounded`](Self::scale_to_geodetic_surface_bounded).
    pub fn scale_to_geodetic_surface(&self, cartesian: &Cartesian3) -> Result<Option<Cartesian3>> {
        self.scale_to_geodetic_surface_bounded(cartesian, MAX_SURFACE_ITERATIONS)
    }

    /// Surface projection with an explicit Newton step limit
    ///
    /// Solves for the Lagrange multiplier `λ` of
    /// `Σ (pᵢ / rᵢ)² / (1 + λ / rᵢ²)² = 1` and returns `pᵢ / (1 + λ / rᵢ²)`.
    ///
    /// Points whose squared ellipsoid-normalized norm is below the center
    /// tolerance skip the iteration and are scaled radially onto the surface.
    ///
    /// # Errors
    ///
    /// [`GeodesyError::NoConvergence`] when the residual does not drop below
    /// `1e-12` within `max_iterations` steps or becomes non-finite, and
    /// [`GeodesyError::NonFinitePosition`] for NaN or infinite input.
    pub fn scale_to_geodetic_surface_bounded(
        &self,
        cartesian: &Cartesian3,
        max_iterations: usize,
    ) -> Result<Option<Cartesian3>> {
        if !cartesian.is_finite() {
            return Err(GeodesyError::NonFinitePosition(*cartesian));
        }

        let Cartesian3 {
            x: position_x,
            y: position_y,
            z: position_z,
        } = *cartesian;
        let oor = self.one_over_radii;
        let oors = self.one_over_radii_squared;

        let x2 = position_x * position_x * oor.x * oor.x;
        let y2 = position_y * position_y * oor.y * oor.y;
        let z2 = position_z * position_z * oor.z * oor.z;

        let squared_norm = x2 + y2 + z2;
        let ratio = (1.0 / squared_norm).sqrt();

        // Initial approximation: radial scaling onto the surface
        let intersection = *cartesian * ratio;

        if squared_norm < self.center_tolerance_squared {
            if !ratio.is_finite() {
                warn!(
                    "Position {:?} is at the ellipsoid center; no surface point",
                    cartesian
                );
                return Ok(None);
            }
            return Ok(Some(intersection));
        }

        let gradient = intersection.multiply_components(&oors) * 2.0;

        let mut lambda = (1.0 - ratio) * cartesian.magnitude() / (0.5 * gradient.magnitude());
        let mut correction = 0.0;
        let mut func = f64::NAN;

        for iteration in 1..=max_iterations {
            lambda -= correction;

            let x_multiplier = 1.0 / (1.0 + lambda * oors.x);
            let y_multiplier = 1.0 / (1.0 + lambda * oors.y);
            let z_multiplier = 1.0 / (1.0 + lambda * oors.z);

            let x_multiplier2 = x_multiplier * x_multiplier;
            let y_multiplier2 = y_multiplier * y_multiplier;
            let z_multiplier2 = z_multiplier * z_multiplier;

            func = x2 * x_multiplier2 + y2 * y_multiplier2 + z2 * z_multiplier2 - 1.0;

            if !func.is_finite() {
                return Err(GeodesyError::NoConvergence {
                    iterations: iteration,
                    residual: func,
                });
            }

            if func.abs() <= EPSILON12 {
                debug!(
                    "Surface projection converged in {} iterations (residual {:e})",
                    iteration, func
                );
                return Ok(Some(Cartesian3::new(
                    position_x * x_multiplier,
                    position_y * y_multiplier,
                    position_z * z_multiplier,
                )));
            }

            let x_multiplier3 = x_multiplier2 * x_multiplier;
            let y_multiplier3 = y_multiplier2 * y_multiplier;
            let z_multiplier3 = z_multiplier2 * z_multiplier;

            let denominator = x2 * x_multiplier3 * oors.x
                + y2 * y_multiplier3 * oors.y
                + z2 * z_multiplier3 * oors.z;
            let derivative = -2.0 * denominator;

            correction = func / derivative;
            trace!(
                "Newton step {}: lambda {:e}, residual {:e}",
                iteration,
                lambda,
                func
            );
        }

        Err(GeodesyError::NoConvergence {
            iterations: max_iterations,
            residual: func,
        })
    }

    /// Convert a geocentric position to longitude, latitude (radians) and height
    ///
    /// Height is signed: positive outside the ellipsoid, negative inside.
    /// `Ok(None)` signals a position too close to the center to have a
    /// surface projection.
    pub fn cartesian_to_cartographic(&self, cartesian: &Cartesian3) -> Result<Option<Geographic>> {
        let surface = match self.scale_to_geodetic_surface(cartesian)? {
            Some(p) => p,
            None => return Ok(None),
        };
        let n = match self.geodetic_surface_normal(&surface) {
            Some(n) => n,
            None => return Ok(None),
        };
        let h = *cartesian - surface;

        let longitude = n.y.atan2(n.x);
        let latitude = n.z.asin();
        let height = sign(h.dot(cartesian)) * h.magnitude();

        Ok(Some(Geographic::new(longitude, latitude, height)))
    }
}

impl Default for Ellipsoid {
    fn default() -> Self {
        Self::wgs84()
    }
}
