//! Error types for the ingestion crate.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading an observation table.
#[derive(Error, Debug)]
pub enum IngestionError {
    #[error("Data file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Failed to read file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing required columns: {0}")]
    MissingColumns(String),

    #[error("Invalid latitude values detected (must be in range [-90, 90])")]
    InvalidLatitude,

    #[error("Invalid longitude values detected (must be in range [-180, 180])")]
    InvalidLongitude,

    #[error("Invalid record on line {line}: {message}")]
    InvalidRecord { line: u64, message: String },
}

impl IngestionError {
    /// Create an InvalidRecord error.
    pub fn invalid_record(line: u64, message: impl Into<String>) -> Self {
        Self::InvalidRecord {
            line,
            message: message.into(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestionError>;
