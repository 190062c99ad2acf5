//! Snowline map rendering.
//!
//! Turns a [`SnowlineSeries`](snowline_common::SnowlineSeries) into one map
//! file per date:
//!
//! ```text
//! SnowlineSeries ──► MapGenerator ──► MapRenderer ──► {prefix}{date}.svg|png
//!                     (naming)         SvgMapRenderer
//!                                      PngMapRenderer (resvg)
//! ```

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use snowline_common::SnowlineResult;

pub mod basemap;
pub mod error;
pub mod frame;
pub mod generator;
pub mod raster;
pub mod svg;

pub use basemap::Basemap;
pub use error::{RenderError, Result};
pub use frame::MapFrame;
pub use generator::MapGenerator;
pub use raster::PngMapRenderer;
pub use svg::SvgMapRenderer;

/// Anything that can draw one day's snowline to a file.
pub trait MapRenderer: Send + Sync {
    /// Render `snowline` for `date` to `output_path`, returning the path written.
    ///
    /// `None`, or a result without geometry, still produces a map with no
    /// overlay.
    fn render(
        &self,
        snowline: Option<&SnowlineResult>,
        date: NaiveDate,
        output_path: &Path,
    ) -> Result<PathBuf>;
}

/// Map file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Svg,
    Png,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Svg => "svg",
            OutputFormat::Png => "png",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}
