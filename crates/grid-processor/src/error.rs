//! Error types for grid processing.

use thiserror::Error;

/// Errors that can occur while building, filling or contouring a grid.
#[derive(Error, Debug)]
pub enum GridProcessorError {
    /// Grid step is zero, negative or not finite.
    #[error("invalid grid resolution: {0}")]
    InvalidResolution(f64),

    /// Gaussian sigma is negative or not finite.
    #[error("invalid smoothing sigma: {0}")]
    InvalidSigma(f64),

    /// Two inputs that must align do not.
    #[error("shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    /// Interpolation could not run on the given points.
    #[error("interpolation error: {0}")]
    InterpolationError(String),
}

impl GridProcessorError {
    /// Create a ShapeMismatch error.
    pub fn shape_mismatch(expected: usize, actual: usize) -> Self {
        Self::ShapeMismatch { expected, actual }
    }

    /// Create an InterpolationError.
    pub fn interpolation(msg: impl Into<String>) -> Self {
        Self::InterpolationError(msg.into())
    }
}

/// Result type for grid processor operations.
pub type Result<T> = std::result::Result<T, GridProcessorError>;
