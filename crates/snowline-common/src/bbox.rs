//! Bounding box types and operations.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// A geographic bounding box in WGS84 degrees.
///
/// The same window constrains both observation filtering and the
/// extent of the interpolation grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lon: f64,
    pub max_lon: f64,
    pub min_lat: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    /// Create a new bounding box. No validation is performed; see [`BoundingBox::validate`].
    pub fn new(min_lon: f64, max_lon: f64, min_lat: f64, max_lat: f64) -> Self {
        Self {
            min_lon,
            max_lon,
            min_lat,
            max_lat,
        }
    }

    /// Create a bounding box and validate it in one step.
    pub fn try_new(
        min_lon: f64,
        max_lon: f64,
        min_lat: f64,
        max_lat: f64,
    ) -> Result<Self, ConfigError> {
        let bbox = Self::new(min_lon, max_lon, min_lat, max_lat);
        bbox.validate()?;
        Ok(bbox)
    }

    /// Check ordering and coordinate domains.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.min_lon < self.max_lon) {
            return Err(ConfigError::invalid_bbox(format!(
                "min_lon ({}) must be less than max_lon ({})",
                self.min_lon, self.max_lon
            )));
        }
        if !(self.min_lat < self.max_lat) {
            return Err(ConfigError::invalid_bbox(format!(
                "min_lat ({}) must be less than max_lat ({})",
                self.min_lat, self.max_lat
            )));
        }
        for (name, value) in [("min_lon", self.min_lon), ("max_lon", self.max_lon)] {
            if !(-180.0..=180.0).contains(&value) {
                return Err(ConfigError::invalid_bbox(format!(
                    "{} ({}) must be in range [-180, 180]",
                    name, value
                )));
            }
        }
        for (name, value) in [("min_lat", self.min_lat), ("max_lat", self.max_lat)] {
            if !(-90.0..=90.0).contains(&value) {
                return Err(ConfigError::invalid_bbox(format!(
                    "{} ({}) must be in range [-90, 90]",
                    name, value
                )));
            }
        }
        Ok(())
    }

    /// Width of the bounding box in degrees.
    pub fn width(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    /// Height of the bounding box in degrees.
    pub fn height(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    /// Check if a point is contained within this bbox. Both bounds are inclusive.
    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        lon >= self.min_lon && lon <= self.max_lon && lat >= self.min_lat && lat <= self.max_lat
    }

    /// Get the center point of the bounding box.
    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_lon + self.max_lon) / 2.0,
            (self.min_lat + self.max_lat) / 2.0,
        )
    }
}
