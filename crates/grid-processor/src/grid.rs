//! Regular lon/lat lattice covering a bounding box.

use snowline_common::BoundingBox;

use crate::error::{GridProcessorError, Result};
use crate::types::GridValues;

/// A regular lattice of sample points.
///
/// Stored as the two 1-D axes; the full 2-D coordinate arrays are their
/// outer product (`x[row][col] = lons[col]`, `y[row][col] = lats[row]`).
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    lons: Vec<f64>,
    lats: Vec<f64>,
    resolution: f64,
}

impl Grid {
    /// Longitude of every column, ascending.
    pub fn lons(&self) -> &[f64] {
        &self.lons
    }

    /// Latitude of every row, ascending.
    pub fn lats(&self) -> &[f64] {
        &self.lats
    }

    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.lons.len()
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.lats.len()
    }

    /// Shape as (rows, cols).
    pub fn shape(&self) -> (usize, usize) {
        (self.height(), self.width())
    }

    pub fn is_empty(&self) -> bool {
        self.lons.is_empty() || self.lats.is_empty()
    }

    /// Longitude of a column.
    pub fn lon(&self, col: usize) -> Option<f64> {
        self.lons.get(col).copied()
    }

    /// Latitude of a row.
    pub fn lat(&self, row: usize) -> Option<f64> {
        self.lats.get(row).copied()
    }

    /// (lon, lat) of a lattice node.
    pub fn coord(&self, row: usize, col: usize) -> Option<(f64, f64)> {
        Some((self.lon(col)?, self.lat(row)?))
    }

    /// The 2-D longitude array, one row per latitude.
    pub fn x(&self) -> GridValues {
        let mut data = Vec::with_capacity(self.width() * self.height());
        for _ in 0..self.height() {
            data.extend_from_slice(&self.lons);
        }
        GridValues {
            data,
            width: self.width(),
            height: self.height(),
        }
    }

    /// The 2-D latitude array, constant along each row.
    pub fn y(&self) -> GridValues {
        let mut data = Vec::with_capacity(self.width() * self.height());
        for &lat in &self.lats {
            data.extend(std::iter::repeat(lat).take(self.width()));
        }
        GridValues {
            data,
            width: self.width(),
            height: self.height(),
        }
    }

    /// A values array shaped like this grid.
    pub fn values_filled(&self, value: f64) -> GridValues {
        GridValues::filled(self.width(), self.height(), value)
    }
}

/// Build the lattice for a bounding box at a fixed step (degrees).
///
/// Each axis steps from the minimum towards the maximum, excluding the
/// stop bound. Axis values are computed from the first two samples the
/// same way on every call, so rebuilding a grid from the same inputs is
/// bit-identical.
pub fn build_grid(bbox: &BoundingBox, resolution: f64) -> Result<Grid> {
    if !(resolution > 0.0) || !resolution.is_finite() {
        return Err(GridProcessorError::InvalidResolution(resolution));
    }

    let lons = arange(bbox.min_lon, bbox.max_lon, resolution);
    let lats = arange(bbox.min_lat, bbox.max_lat, resolution);

    tracing::trace!(
        width = lons.len(),
        height = lats.len(),
        resolution,
        "Built interpolation grid"
    );

    Ok(Grid {
        lons,
        lats,
        resolution,
    })
}

/// Half-open range stepping: `ceil((stop - start) / step)` samples.
///
/// The effective increment is `(start + step) - start`, applied as
/// `start + i * delta`.
fn arange(start: f64, stop: f64, step: f64) -> Vec<f64> {
    let len = ((stop - start) / step).ceil();
    if !(len > 0.0) || !len.is_finite() {
        return Vec::new();
    }
    let len = len as usize;

    let mut out = Vec::with_capacity(len);
    out.push(start);
    if len > 1 {
        let second = start + step;
        let delta = second - start;
        out.push(second);
        for i in 2..len {
            out.push(start + i as f64 * delta);
        }
    }
    out
}
