//! East-North-Up frames anchored on the ellipsoid
//!
//! The frame's upper-left 3x3 block holds the East, North and Up unit vectors
//! as columns and its fourth column holds the origin, so multiplying a local
//! ENU position by the frame yields a geocentric position.

use log::warn;

use crate::constants::{equals_epsilon, sign, EPSILON14};
use crate::coordinates::Cartesian3;
use crate::ellipsoid::Ellipsoid;
use crate::transform::{MatrixLayout, Transform};

/// A local East-North-Up frame at a geocentric origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnuFrame {
    origin: Cartesian3,
    transform: Transform,
}

impl EnuFrame {
    /// Build the frame at `origin`, see [`east_north_up_to_fixed_frame`]
    pub fn at(origin: &Cartesian3, ellipsoid: &Ellipsoid) -> Self {
        east_north_up_to_fixed_frame(origin, ellipsoid)
    }

    pub fn origin(&self) -> Cartesian3 {
        self.origin
    }

    /// Local-to-geocentric transform (rotation and translation)
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Orientation only, with the translation column zeroed
    ///
    /// This is what re-orients vertex data stored relative to the origin.
    pub fn rotation(&self) -> Transform {
        self.transform.without_translation()
    }

    /// Geocentric-to-local transform
    ///
    /// Uses the transposed basis, which is exact for every non-degenerate frame.
    pub fn inverse(&self) -> Transform {
        self.transform.rigid_inverse()
    }

    pub fn east(&self) -> Cartesian3 {
        self.transform.column3(0)
    }

    pub fn north(&self) -> Cartesian3 {
        self.transform.column3(1)
    }

    pub fn up(&self) -> Cartesian3 {
        self.transform.column3(2)
    }

    /// True when the basis collapsed (origin at the ellipsoid center)
    pub fn is_degenerate(&self) -> bool {
        self.up().magnitude_squared() == 0.0
    }

    pub fn to_array(&self, layout: MatrixLayout) -> [f64; 16] {
        self.transform.to_array(layout)
    }

    fn polar(origin: &Cartesian3) -> Self {
        let s = sign(origin.z);
        if s == 0.0 {
            warn!(
                "ENU frame requested at {:?}: origin lies on the polar axis with z = 0, basis collapses",
                origin
            );
        }
        let transform = Transform::from_rows([
            [0.0, -s, 0.0, origin.x],
            [1.0, 0.0, 0.0, origin.y],
            [0.0, 0.0, s, origin.z],
            [0.0, 0.0, 0.0, 1.0],
        ]);
        EnuFrame {
            origin: *origin,
            transform,
        }
    }
}

/// Compute the East-North-Up frame whose origin is `origin`
///
/// - Up is the geodetic surface normal at `origin`
/// - East is `normalize((-y, x, 0))`, perpendicular to the meridian plane
/// - North is `Up × East`
///
/// Origins whose x and y are both within `1e-14` of zero sit on the polar
/// axis, where East is undefined. They get a fixed frame driven by the sign
/// of z: East is `(0, 1, 0)`, North is `(-s, 0, 0)` and Up is `(0, 0, s)`.
/// With `z == 0` the sign is zero and North and Up collapse to zero vectors.
pub fn east_north_up_to_fixed_frame(origin: &Cartesian3, ellipsoid: &Ellipsoid) -> EnuFrame {
    if equals_epsilon(origin.x, 0.0, EPSILON14) && equals_epsilon(origin.y, 0.0, EPSILON14) {
        return EnuFrame::polar(origin);
    }

    let normal = ellipsoid.geodetic_surface_normal(origin);
    let tangent = Cartesian3::new(-origin.y, origin.x, 0.0).normalize();
    let (normal, tangent) = match (normal, tangent) {
        (Some(n), Some(t)) => (n, t),
        _ => return EnuFrame::polar(origin),
    };
    let bitangent = normal.cross(&tangent);

    let transform = Transform::from_rows([
        [tangent.x, bitangent.x, normal.x, origin.x],
        [tangent.y, bitangent.y, normal.y, origin.y],
        [tangent.z, bitangent.z, normal.z, origin.z],
        [0.0, 0.0, 0.0, 1.0],
    ]);

    EnuFrame {
        origin: *origin,
        transform,
    }
}
