//! Geographic bounding regions
//!
//! A region is the `[west, south, east, north, minimum height, maximum height]`
//! box (radians, radians, meters) recovered from geocentric box corners. It
//! does not handle boxes straddling the antimeridian; west is simply the
//! smallest longitude seen.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::coordinates::{Cartesian3, Geographic};
use crate::ellipsoid::{Ellipsoid, GeodesyError};
use crate::mesh::PositionBounds;

#[derive(Error, Debug)]
pub enum RegionError {
    #[error("No corner points supplied")]
    NoCorners,

    #[error("Corner {index} at {point:?} is too close to the ellipsoid center")]
    DegenerateCorner { index: usize, point: Cartesian3 },

    #[error("Geodesy error: {0}")]
    Geodesy(#[from] GeodesyError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RegionError>;

/// Geographic extent in radians and meters
///
/// Serializes as the six-element array used by 3D Tiles `region` volumes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(into = "[f64; 6]", from = "[f64; 6]")]
pub struct BoundingRegion {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
    pub minimum_height: f64,
    pub maximum_height: f64,
}

impl BoundingRegion {
    /// Region spanned by a set of geocentric points, typically 8 box corners
    ///
    /// Longitudes and latitudes are sorted independently; heights are tracked
    /// as a running minimum and maximum.
    pub fn from_corners(corners: &[Cartesian3], ellipsoid: &Ellipsoid) -> Result<Self> {
        if corners.is_empty() {
            return Err(RegionError::NoCorners);
        }

        let mut longitudes = Vec::with_capacity(corners.len());
        let mut latitudes = Vec::with_capacity(corners.len());
        let mut minimum_height = f64::INFINITY;
        let mut maximum_height = f64::NEG_INFINITY;

        for (index, &point) in corners.iter().enumerate() {
            let geographic = ellipsoid
                .cartesian_to_cartographic(&point)?
                .ok_or(RegionError::DegenerateCorner { index, point })?;
            longitudes.push(geographic.longitude);
            latitudes.push(geographic.latitude);
            minimum_height = minimum_height.min(geographic.height);
            maximum_height = maximum_height.max(geographic.height);
        }

        longitudes.sort_by(f64::total_cmp);
        latitudes.sort_by(f64::total_cmp);

        Ok(BoundingRegion {
            west: longitudes[0],
            south: latitudes[0],
            east: longitudes[longitudes.len() - 1],
            north: latitudes[latitudes.len() - 1],
            minimum_height,
            maximum_height,
        })
    }

    /// Region of an axis-aligned geocentric box
    pub fn from_bounds(bounds: &PositionBounds, ellipsoid: &Ellipsoid) -> Result<Self> {
        Self::from_corners(&bounds.corners(), ellipsoid)
    }

    pub fn to_array(&self) -> [f64; 6] {
        [
            self.west,
            self.south,
            self.east,
            self.north,
            self.minimum_height,
            self.maximum_height,
        ]
    }

    pub fn contains(&self, geographic: &Geographic) -> bool {
        (self.west..=self.east).contains(&geographic.longitude)
            && (self.south..=self.north).contains(&geographic.latitude)
            && (self.minimum_height..=self.maximum_height).contains(&geographic.height)
    }

    /// Serialize as `{"region": [...]}`
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({ "region": self.to_array() })
    }

    /// Write the region as an auxiliary JSON file next to the converted model
    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, &self.to_json())?;
        writer.flush()?;
        info!("Wrote bounding region to {}", path.display());
        Ok(())
    }
}

impl From<BoundingRegion> for [f64; 6] {
    fn from(region: BoundingRegion) -> Self {
        region.to_array()
    }
}

impl From<[f64; 6]> for BoundingRegion {
    fn from(values: [f64; 6]) -> Self {
        BoundingRegion {
            west: values[0],
            south: values[1],
            east: values[2],
            north: values[3],
            minimum_height: values[4],
            maximum_height: values[5],
        }
    }
}
