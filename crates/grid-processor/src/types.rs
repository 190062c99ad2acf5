//! Core types for grid processing.

use serde::{Deserialize, Serialize};

/// A dense 2-D array of scalar values in row-major order.
///
/// Row 0 is the southernmost grid row; column 0 the westernmost.
#[derive(Debug, Clone, PartialEq)]
pub struct GridValues {
    /// Values, `height` rows of `width` columns.
    pub data: Vec<f64>,
    /// Number of columns.
    pub width: usize,
    /// Number of rows.
    pub height: usize,
}

impl GridValues {
    /// Create an array of the given shape filled with `value`.
    pub fn filled(width: usize, height: usize, value: f64) -> Self {
        Self {
            data: vec![value; width * height],
            width,
            height,
        }
    }

    /// Wrap existing row-major data. Returns `None` if the length does not match the shape.
    pub fn from_vec(data: Vec<f64>, width: usize, height: usize) -> Option<Self> {
        if data.len() != width * height {
            return None;
        }
        Some(Self {
            data,
            width,
            height,
        })
    }

    /// Shape as (rows, cols).
    pub fn shape(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    /// Get the value at a specific grid coordinate.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.height || col >= self.width {
            return None;
        }
        self.data.get(row * self.width + col).copied()
    }

    /// Set the value at a specific grid coordinate. Out-of-range writes are ignored.
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        if row < self.height && col < self.width {
            self.data[row * self.width + col] = value;
        }
    }

    /// One row as a slice.
    pub fn row(&self, row: usize) -> &[f64] {
        let start = row * self.width;
        &self.data[start..start + self.width]
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// (min, max) over finite values, `None` if there are none.
    pub fn finite_range(&self) -> Option<(f64, f64)> {
        self.data
            .iter()
            .filter(|v| v.is_finite())
            .fold(None, |acc, &v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

/// Scattered-point interpolation method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterpolationMethod {
    /// Value of the nearest observation; defined everywhere.
    Nearest,
    /// Piecewise-linear over the Delaunay triangulation.
    #[default]
    Linear,
    /// Piecewise-cubic over the Delaunay triangulation; may overshoot [0, 1].
    Cubic,
}

impl InterpolationMethod {
    /// Parse from string (case-insensitive). Unknown names return `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "nearest" => Some(Self::Nearest),
            "linear" => Some(Self::Linear),
            "cubic" => Some(Self::Cubic),
            _ => None,
        }
    }

    /// Whether cells outside the convex hull of the input receive the fill value.
    pub fn uses_fill_value(&self) -> bool {
        !matches!(self, Self::Nearest)
    }
}

impl std::fmt::Display for InterpolationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Nearest => write!(f, "nearest"),
            Self::Linear => write!(f, "linear"),
            Self::Cubic => write!(f, "cubic"),
        }
    }
}
