//! Geoframe: geodetic coordinates and frame transforms for geo-referenced glTF
//!
//! This crate provides the numerical core used when converting glTF scenes to
//! Binary glTF / b3dm tiles anchored on the Earth: geographic/geocentric
//! conversion on a reference ellipsoid, East-North-Up frames, and 4x4
//! homogeneous transform composition for re-orienting vertex data.
//!
//! ```rust
//! use geoframe::prelude::*;
//!
//! let wgs84 = Ellipsoid::wgs84();
//! let anchor = GeoAnchor::from_degrees(-75.6, 40.0, 0.0, wgs84);
//!
//! let back = wgs84
//!     .cartesian_to_cartographic(&anchor.position())
//!     .unwrap()
//!     .unwrap();
//! assert!((back.longitude_degrees() + 75.6).abs() < 1e-9);
//! ```

use thiserror::Error;

pub mod anchor;
pub mod constants;
pub mod coordinates;
pub mod ellipsoid;
pub mod framelib;
pub mod mesh;
pub mod region;
pub mod transform;

// Re-export commonly used types
pub use coordinates::{Cartesian3, Geographic};
pub use ellipsoid::Ellipsoid;
pub use transform::{MatrixLayout, RotationWinding, Transform};

/// Main error type for the geoframe library
#[derive(Debug, Error)]
pub enum GeoframeError {
    #[error("Geodesy error: {0}")]
    Geodesy(#[from] ellipsoid::GeodesyError),

    #[error("Transform error: {0}")]
    Transform(#[from] transform::TransformError),

    #[error("Mesh error: {0}")]
    Mesh(#[from] mesh::MeshError),

    #[error("Region error: {0}")]
    Region(#[from] region::RegionError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No vertices to bound")]
    NoVertices,
}

/// Result type for geoframe operations
pub type Result<T> = std::result::Result<T, GeoframeError>;

/// Glob-importable set of the types most callers need
pub mod prelude {
    pub use crate::anchor::{GeoAnchor, RtcCenter};
    pub use crate::coordinates::{Cartesian3, Geographic};
    pub use crate::ellipsoid::Ellipsoid;
    pub use crate::framelib::{east_north_up_to_fixed_frame, EnuFrame};
    pub use crate::region::BoundingRegion;
    pub use crate::transform::{MatrixLayout, RotationWinding, Transform};
}
