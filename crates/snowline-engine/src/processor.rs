//! Snowline extraction strategies.

use chrono::NaiveDate;
use grid_processor::{build_grid, extract_contours, interpolate, smooth, InterpolationMethod};
use serde::{Deserialize, Serialize};
use snowline_common::{BoundingBox, ConfigError, ObservationSet, SnowlineGeometry, SnowlineResult};
use tracing::debug;

use crate::classifier::{classify, Classification};
use crate::error::Result;
use crate::geometry::to_geometry;

/// Iso-level traced through the smoothed snow field.
pub const CONTOUR_LEVEL: f64 = 0.5;

/// Numeric parameters for interpolation-based extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Grid step in degrees.
    pub grid_resolution: f64,
    pub interpolation_method: InterpolationMethod,
    /// Gaussian standard deviation in grid cells; 0 disables smoothing.
    pub smoothing_sigma: f64,
    /// Extract dates concurrently.
    pub parallel: bool,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            grid_resolution: 0.01,
            interpolation_method: InterpolationMethod::Linear,
            smoothing_sigma: 1.0,
            parallel: false,
        }
    }
}

impl ProcessingConfig {
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if !(self.grid_resolution > 0.0) || !self.grid_resolution.is_finite() {
            return Err(ConfigError::invalid_processing(format!(
                "grid_resolution must be a positive number, got {}",
                self.grid_resolution
            )));
        }
        if !(self.smoothing_sigma >= 0.0) || !self.smoothing_sigma.is_finite() {
            return Err(ConfigError::invalid_processing(format!(
                "smoothing_sigma must be a non-negative number, got {}",
                self.smoothing_sigma
            )));
        }
        Ok(())
    }
}

/// Turns one date's observations into at most one result row.
pub trait SnowlineProcessor: Send + Sync {
    /// `Ok(None)` means the date has no observations and contributes zero rows.
    fn extract_snowline(
        &self,
        date: NaiveDate,
        observations: &ObservationSet<'_>,
    ) -> Result<Option<SnowlineResult>>;
}

/// Interpolate the 0/1 snow state onto a grid, smooth it and trace the 0.5 contour.
#[derive(Debug, Clone)]
pub struct InterpolationProcessor {
    config: ProcessingConfig,
    bbox: BoundingBox,
}

impl InterpolationProcessor {
    pub fn new(config: ProcessingConfig, bbox: BoundingBox) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        bbox.validate()?;
        Ok(Self { config, bbox })
    }

    pub fn config(&self) -> &ProcessingConfig {
        &self.config
    }

    pub fn bbox(&self) -> &BoundingBox {
        &self.bbox
    }

    fn extract_geometry(
        &self,
        date: NaiveDate,
        observations: &ObservationSet<'_>,
    ) -> Result<Option<SnowlineGeometry>> {
        let grid = build_grid(&self.bbox, self.config.grid_resolution)?;
        let field = interpolate(
            &grid,
            &observations.points(),
            &observations.values(),
            self.config.interpolation_method,
        )?;

        if field.finite_range().is_none() {
            debug!(%date, "Interpolated field has no finite values");
            return Ok(None);
        }

        let field = smooth(&field, self.config.smoothing_sigma)?;
        let contours = extract_contours(&field, CONTOUR_LEVEL);
        let geometry = to_geometry(&contours, &grid);

        debug!(
            %date,
            observations = observations.len(),
            rows = grid.height(),
            cols = grid.width(),
            contours = contours.len(),
            lines = geometry.as_ref().map_or(0, SnowlineGeometry::line_count),
            "Extracted snowline"
        );

        Ok(geometry)
    }
}

impl SnowlineProcessor for InterpolationProcessor {
    fn extract_snowline(
        &self,
        date: NaiveDate,
        observations: &ObservationSet<'_>,
    ) -> Result<Option<SnowlineResult>> {
        let count = observations.len();
        match classify(observations) {
            Classification::Empty => {
                debug!(%date, "No observations for date");
                Ok(None)
            }
            Classification::Labeled(reason) => {
                debug!(%date, count, %reason, "Skipping extraction");
                Ok(Some(SnowlineResult::labeled(date, reason, count)))
            }
            Classification::Extract => {
                let geometry = self.extract_geometry(date, observations)?;
                Ok(Some(SnowlineResult::extracted(date, geometry, count)))
            }
        }
    }
}
