//! Model anchoring on the ellipsoid
//!
//! A [`GeoAnchor`] ties a model to a geographic position. Vertex data stays
//! relative to the anchor ("relative to center", RTC): the anchor position is
//! written once into the scene's RTC extension and only the ENU orientation is
//! baked into the vertices.
//!
//! ```rust
//! use geoframe::anchor::GeoAnchor;
//! use geoframe::ellipsoid::Ellipsoid;
//!
//! let anchor = GeoAnchor::from_degrees(0.0, 0.0, 0.0, Ellipsoid::wgs84());
//! assert_eq!(anchor.rtc_center().center, [6_378_137.0, 0.0, 0.0]);
//! ```

use log::debug;
use serde::{Deserialize, Serialize};

use crate::coordinates::{Cartesian3, Geographic};
use crate::ellipsoid::Ellipsoid;
use crate::framelib::EnuFrame;
use crate::mesh::{self, PositionBounds};
use crate::region::BoundingRegion;
use crate::transform::Transform;
use crate::{GeoframeError, Result};

/// Scene extension name carrying the RTC center
pub const RTC_EXTENSION: &str = "CESIUM_RTC";

/// Payload of the RTC scene extension
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RtcCenter {
    pub center: [f64; 3],
}

/// A geographic anchor with its geocentric position and ENU frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoAnchor {
    ellipsoid: Ellipsoid,
    geographic: Geographic,
    position: Cartesian3,
    frame: EnuFrame,
}

impl GeoAnchor {
    pub fn new(geographic: Geographic, ellipsoid: Ellipsoid) -> Self {
        let position = ellipsoid.cartographic_to_cartesian(&geographic);
        let frame = EnuFrame::at(&position, &ellipsoid);
        debug!("Anchor at {} -> {:?}", geographic, position);
        GeoAnchor {
            ellipsoid,
            geographic,
            position,
            frame,
        }
    }

    /// Anchor from longitude and latitude in degrees, height in meters
    pub fn from_degrees(longitude: f64, latitude: f64, height: f64, ellipsoid: Ellipsoid) -> Self {
        let geographic = Geographic::from_degrees(longitude, latitude, height);
        Self::new(geographic, ellipsoid)
    }

    pub fn ellipsoid(&self) -> &Ellipsoid {
        &self.ellipsoid
    }

    pub fn geographic(&self) -> Geographic {
        self.geographic
    }

    pub fn position(&self) -> Cartesian3 {
        self.position
    }

    pub fn frame(&self) -> &EnuFrame {
        &self.frame
    }

    pub fn rtc_center(&self) -> RtcCenter {
        RtcCenter {
            center: self.position.to_array(),
        }
    }

    /// `{"CESIUM_RTC": {"center": [x, y, z]}}`, ready to merge into `extensions`
    pub fn extension_json(&self) -> Result<serde_json::Value> {
        let mut extensions = serde_json::Map::new();
        extensions.insert(
            RTC_EXTENSION.to_string(),
            serde_json::to_value(self.rtc_center())?,
        );
        Ok(serde_json::Value::Object(extensions))
    }

    /// Transform for RTC-relative vertices: `local` first, then the ENU orientation
    pub fn vertex_transform(&self, local: &Transform) -> Transform {
        local.then(&self.frame.rotation())
    }

    /// Transform from model space to absolute geocentric coordinates
    pub fn world_transform(&self, local: &Transform) -> Transform {
        local.then(self.frame.transform())
    }

    /// Re-orient packed `f32` positions in place, returning the vertex count
    pub fn reproject_positions(&self, positions: &mut [f32], local: &Transform) -> Result<usize> {
        let transform = self.vertex_transform(local);
        Ok(mesh::rotate_positions(positions, &transform)?)
    }

    /// Geographic region covered by already re-oriented RTC-relative positions
    pub fn bounding_region(&self, positions: &[f32]) -> Result<BoundingRegion> {
        let bounds = PositionBounds::from_positions(positions)
            .ok_or(GeoframeError::NoVertices)?
            .translated(&self.position);
        Ok(BoundingRegion::from_bounds(&bounds, &self.ellipsoid)?)
    }
}
