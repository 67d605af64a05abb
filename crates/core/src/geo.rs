//! Geographic point and bounding box types

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};

/// A WGS84 location (EPSG:4326), latitude and longitude in degrees.
///
/// Deserialization applies the same range checks as [`Coordinate::new`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate")]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Deserialize)]
struct RawCoordinate {
    lat: f64,
    lon: f64,
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = Error;

    fn try_from(raw: RawCoordinate) -> Result<Self> {
        Coordinate::new(raw.lat, raw.lon)
    }
}

impl Coordinate {
    /// Create a coordinate, rejecting values outside the valid lat/lon ranges
    pub fn new(lat: f64, lon: f64) -> Result<Self> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(Error::InvalidParameter {
                name: "lat",
                value: lat.to_string(),
                reason: "must be within [-90, 90]".into(),
            });
        }
        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
            return Err(Error::InvalidParameter {
                name: "lon",
                value: lon.to_string(),
                reason: "must be within [-180, 180]".into(),
            });
        }
        Ok(Self { lat, lon })
    }

    /// Re-check the ranges, for values assembled field by field
    pub fn validate(&self) -> Result<()> {
        Coordinate::new(self.lat, self.lon).map(|_| ())
    }

    /// Square box of `half_extent` degrees on each side of the point
    pub fn bbox(&self, half_extent: f64) -> BBox {
        BBox::new(
            self.lon - half_extent,
            self.lat - half_extent,
            self.lon + half_extent,
            self.lat + half_extent,
        )
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.lat, self.lon)
    }
}

/// A geographic bounding box (x = longitude, y = latitude).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BBox {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self { min_x, min_y, max_x, max_y }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// WMS 1.1.1 ordering: `minx,miny,maxx,maxy`
    pub fn to_wms(&self) -> String {
        format!("{},{},{},{}", self.min_x, self.min_y, self.max_x, self.max_y)
    }
}
