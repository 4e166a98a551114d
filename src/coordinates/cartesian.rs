//! # Geocentric Cartesian Coordinates
//!
//! `Cartesian3` is the working representation for every position the engine
//! produces or consumes: ellipsoid surface points, anchor positions, surface
//! normals and the basis vectors of local frames.
//!
//! ## Coordinate System Convention
//!
//! Positions are Earth-centered and Earth-fixed:
//! - **X-axis**: Through the intersection of the equator and the prime meridian
//! - **Y-axis**: Through the equator at 90° east longitude
//! - **Z-axis**: Toward the north pole
//!
//! The system is right-handed and measured in meters. Unit vectors (normals,
//! frame axes) share the same type.
//!
//! ## Examples
//!
//! ```rust
//! use geoframe::coordinates::cartesian::Cartesian3;
//!
//! let east = Cartesian3::new(0.0, 1.0, 0.0);
//! let up = Cartesian3::new(1.0, 0.0, 0.0);
//!
//! // North completes the right-handed (east, north, up) triad
//! let north = up.cross(&east);
//! assert_eq!(north, Cartesian3::new(0.0, 0.0, 1.0));
//! ```

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::constants::equals_epsilon;

/// Three-dimensional geocentric Cartesian coordinate
///
/// Represents either a position in meters or a direction. Components are
/// stored exactly as given; no normalization happens behind the caller's back.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Cartesian3 {
    /// X-component (toward 0° longitude on the equator)
    pub x: f64,
    /// Y-component (toward 90° east on the equator)
    pub y: f64,
    /// Z-component (toward the north pole)
    pub z: f64,
}

impl Cartesian3 {
    /// The zero vector, i.e. the ellipsoid center
    pub const ZERO: Cartesian3 = Cartesian3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Creates a new Cartesian coordinate
    ///
    /// # Examples
    ///
    /// ```rust
    /// use geoframe::coordinates::cartesian::Cartesian3;
    ///
    /// let p = Cartesian3::new(6_378_137.0, 0.0, 0.0);
    /// assert_eq!(p.x, 6_378_137.0);
    /// ```
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Cartesian3 { x, y, z }
    }

    /// Unit direction of a spherical (longitude, latitude) pair in radians
    ///
    /// - `x = cos(lat) * cos(lon)`
    /// - `y = cos(lat) * sin(lon)`
    /// - `z = sin(lat)`
    pub fn from_spherical(longitude: f64, latitude: f64) -> Self {
        let cos_lat = latitude.cos();
        Cartesian3 {
            x: cos_lat * longitude.cos(),
            y: cos_lat * longitude.sin(),
            z: latitude.sin(),
        }
    }

    /// Squared Euclidean length
    pub fn magnitude_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Euclidean length
    ///
    /// ```rust
    /// use geoframe::coordinates::cartesian::Cartesian3;
    ///
    /// assert_eq!(Cartesian3::new(3.0, 4.0, 0.0).magnitude(), 5.0);
    /// ```
    pub fn magnitude(&self) -> f64 {
        self.magnitude_squared().sqrt()
    }

    /// Unit vector in the same direction, or `None` for the zero vector
    pub fn normalize(&self) -> Option<Cartesian3> {
        let mag = self.magnitude();
        if mag == 0.0 {
            None
        } else {
            Some(*self / mag)
        }
    }

    pub fn dot(&self, other: &Cartesian3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Right-handed cross product `self × other`
    pub fn cross(&self, other: &Cartesian3) -> Cartesian3 {
        Cartesian3 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Componentwise (Hadamard) product
    ///
    /// Scaling by per-axis ellipsoid quantities (radii squared, one over
    /// radii squared) is expressed with this.
    pub fn multiply_components(&self, other: &Cartesian3) -> Cartesian3 {
        Cartesian3 {
            x: self.x * other.x,
            y: self.y * other.y,
            z: self.z * other.z,
        }
    }

    /// Componentwise tolerance comparison, see [`equals_epsilon`]
    pub fn equals_epsilon(&self, other: &Cartesian3, epsilon: f64) -> bool {
        equals_epsilon(self.x, other.x, epsilon)
            && equals_epsilon(self.y, other.y, epsilon)
            && equals_epsilon(self.z, other.z, epsilon)
    }

    /// True when all three components are finite
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    pub fn to_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Converts to nalgebra Vector3 for linear algebra operations
    pub fn to_vector3(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Creates from nalgebra Vector3
    pub fn from_vector3(vec: Vector3<f64>) -> Self {
        Cartesian3 {
            x: vec.x,
            y: vec.y,
            z: vec.z,
        }
    }
}

impl From<[f64; 3]> for Cartesian3 {
    fn from(arr: [f64; 3]) -> Self {
        Cartesian3::new(arr[0], arr[1], arr[2])
    }
}

// Arithmetic operations for convenience
impl std::ops::Add for Cartesian3 {
    type Output = Cartesian3;

    fn add(self, other: Cartesian3) -> Cartesian3 {
        Cartesian3::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl std::ops::Sub for Cartesian3 {
    type Output = Cartesian3;

    fn sub(self, other: Cartesian3) -> Cartesian3 {
        Cartesian3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl std::ops::Neg for Cartesian3 {
    type Output = Cartesian3;

    fn neg(self) -> Cartesian3 {
        Cartesian3::new(-self.x, -self.y, -self.z)
    }
}

impl std::ops::Mul<f64> for Cartesian3 {
    type Output = Cartesian3;

    fn mul(self, scalar: f64) -> Cartesian3 {
        Cartesian3::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }
}

impl std::ops::Div<f64> for Cartesian3 {
    type Output = Cartesian3;

    fn div(self, scalar: f64) -> Cartesian3 {
        Cartesian3::new(self.x / scalar, self.y / scalar, self.z / scalar)
    }
}
