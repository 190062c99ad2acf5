//! Error types for snowline extraction.

use grid_processor::GridProcessorError;
use ingestion::IngestionError;
use snowline_common::ConfigError;
use thiserror::Error;

/// A failure while extracting one date. Never used for degenerate inputs,
/// which are classified instead.
#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("grid processing failed: {0}")]
    Grid(#[from] GridProcessorError),
}

/// A failure that stops a whole pipeline run before any date is processed.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("failed to load observations: {0}")]
    Ingest(#[from] IngestionError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ProcessingError>;
