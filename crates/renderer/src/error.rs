//! Error types for map rendering.

use snowline_common::ConfigError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("failed to write map: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid map style: {0}")]
    InvalidStyle(#[from] ConfigError),

    #[error("failed to rasterize map: {0}")]
    Rasterize(String),

    #[error("failed to read basemap: {0}")]
    Basemap(String),

    #[error("failed to format map: {0}")]
    Format(#[from] std::fmt::Error),
}

pub type Result<T> = std::result::Result<T, RenderError>;
