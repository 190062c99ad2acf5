//! Configuration and validity errors.
//!
//! These are surfaced before the extraction engine runs. Degenerate
//! observation sets are not errors; see [`crate::EmptyReason`].

use thiserror::Error;

/// Result type alias using ConfigError.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// A configuration file or value that cannot be used.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse configuration: {0}")]
    Parse(String),

    #[error("Configuration file is empty")]
    Empty,

    #[error("{0}")]
    InvalidBoundingBox(String),

    #[error("{0}")]
    InvalidDateRange(String),

    #[error("{0}")]
    InvalidColor(String),

    #[error("{0}")]
    InvalidStyle(String),

    #[error("invalid processing setting: {0}")]
    InvalidProcessing(String),
}

impl ConfigError {
    /// Create an InvalidBoundingBox error.
    pub fn invalid_bbox(msg: impl Into<String>) -> Self {
        Self::InvalidBoundingBox(msg.into())
    }

    /// Create an InvalidColor error.
    pub fn invalid_color(msg: impl Into<String>) -> Self {
        Self::InvalidColor(msg.into())
    }

    /// Create an InvalidStyle error.
    pub fn invalid_style(msg: impl Into<String>) -> Self {
        Self::InvalidStyle(msg.into())
    }

    /// Create an InvalidProcessing error.
    pub fn invalid_processing(msg: impl Into<String>) -> Self {
        Self::InvalidProcessing(msg.into())
    }
}
