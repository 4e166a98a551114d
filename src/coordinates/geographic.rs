//! Geographic (longitude, latitude, height) coordinates
//!
//! Angles are stored in radians, height in meters above the ellipsoid. Callers
//! that start from degrees go through [`Geographic::from_degrees`]. No range
//! clamping or wrapping is applied.

use serde::{Deserialize, Serialize};

use crate::constants::{DEG2RAD, RAD2DEG};

/// A position given relative to a reference ellipsoid
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Geographic {
    /// Longitude in radians, positive east
    pub longitude: f64,
    /// Geodetic latitude in radians, positive north
    pub latitude: f64,
    /// Height above the ellipsoid surface in meters
    pub height: f64,
}

impl Geographic {
    pub fn new(longitude: f64, latitude: f64, height: f64) -> Self {
        Geographic {
            longitude,
            latitude,
            height,
        }
    }

    /// Create a coordinate from longitude and latitude in degrees
    ///
    /// ```rust
    /// use geoframe::coordinates::geographic::Geographic;
    ///
    /// let g = Geographic::from_degrees(180.0, 0.0, 10.0);
    /// assert!((g.longitude - std::f64::consts::PI).abs() < 1e-15);
    /// assert_eq!(g.height, 10.0);
    /// ```
    pub fn from_degrees(longitude_deg: f64, latitude_deg: f64, height: f64) -> Self {
        Self::new(longitude_deg * DEG2RAD, latitude_deg * DEG2RAD, height)
    }

    /// Get longitude in degrees
    pub fn longitude_degrees(&self) -> f64 {
        self.longitude * RAD2DEG
    }

    /// Get latitude in degrees
    pub fn latitude_degrees(&self) -> f64 {
        self.latitude * RAD2DEG
    }
}

impl std::fmt::Display for Geographic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "lon {:.9}°, lat {:.9}°, h {:.3} m",
            self.longitude_degrees(),
            self.latitude_degrees(),
            self.height
        )
    }
}
