//! Run configuration loaded from YAML.
//!
//! Everything is validated here, before any observation is read, so a bad
//! bounding box or colour never reaches the engine.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use renderer::OutputFormat;
use serde::{Deserialize, Serialize};
use snowline_common::{BoundingBox, ConfigError, DateRange, StyleConfig};
use snowline_engine::{PipelineConfig, ProcessingConfig};
use tracing::warn;

// ============================================================================
// Configuration sections
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub input: InputConfig,
    pub region: RegionConfig,
    pub time: TimeConfig,
    pub output: OutputConfig,
    #[serde(default)]
    pub processing: ProcessingConfig,
    #[serde(default)]
    pub postprocess: PostprocessConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Snow Survey CSV export.
    pub snow_cover_data: PathBuf,
    /// GeoJSON outlines drawn under the snowline.
    #[serde(default)]
    pub basemap_data: Option<PathBuf>,
}

impl InputConfig {
    /// The basemap path, if one is configured and present on disk.
    pub fn existing_basemap(&self) -> Option<&Path> {
        self.basemap_data.as_deref().filter(|path| path.exists())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionConfig {
    pub bounding_box: BoundingBox,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeConfig {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl TimeConfig {
    pub fn date_range(&self) -> DateRange {
        DateRange::new(self.start_date, self.end_date)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub directory: PathBuf,
    #[serde(default = "default_filename_prefix")]
    pub filename_prefix: String,
    #[serde(default)]
    pub format: OutputFormat,
    #[serde(default)]
    pub style: StyleConfig,
}

fn default_filename_prefix() -> String {
    "snowline_".to_string()
}

/// Optional geometry clean-up applied after extraction, in field order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostprocessConfig {
    pub merge_segments: bool,
    pub simplify_tolerance: Option<f64>,
    pub smooth_buffer: Option<f64>,
}

impl PostprocessConfig {
    pub fn is_enabled(&self) -> bool {
        self.merge_segments || self.simplify_tolerance.is_some() || self.smooth_buffer.is_some()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("simplify_tolerance", self.simplify_tolerance),
            ("smooth_buffer", self.smooth_buffer),
        ] {
            if let Some(v) = value {
                if !(v > 0.0) || !v.is_finite() {
                    return Err(ConfigError::invalid_processing(format!(
                        "{} must be a positive number, got {}",
                        name, v
                    )));
                }
            }
        }
        Ok(())
    }
}

// ============================================================================
// Loading and validation
// ============================================================================

/// Read, parse and validate a configuration file.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let contents = fs::read_to_string(path)?;
    parse_config(&contents)
}

/// Parse and validate configuration text.
pub fn parse_config(contents: &str) -> Result<Config, ConfigError> {
    if contents.trim().is_empty() {
        return Err(ConfigError::Empty);
    }
    let config: Config =
        serde_yaml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
    config.validate()?;
    Ok(config)
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.region.bounding_box.validate()?;
        self.time.date_range().validate()?;
        self.output.style.validate()?;
        self.processing.validate()?;
        self.postprocess.validate()?;

        if !self.input.snow_cover_data.exists() {
            warn!(
                path = %self.input.snow_cover_data.display(),
                "Input data file does not exist"
            );
        }
        if let Some(basemap) = &self.input.basemap_data {
            if !basemap.exists() {
                warn!(
                    path = %basemap.display(),
                    "Basemap file does not exist, maps will be drawn without it"
                );
            }
        }
        Ok(())
    }

    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            date_range: self.time.date_range(),
            bbox: self.region.bounding_box,
            parallel: self.processing.parallel,
        }
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bbox = &self.region.bounding_box;
        let range = self.time.date_range();
        writeln!(f, "Configuration Summary:")?;
        writeln!(f, "  Input data: {}", self.input.snow_cover_data.display())?;
        if let Some(basemap) = &self.input.basemap_data {
            writeln!(f, "  Input basemap data: {}", basemap.display())?;
        }
        writeln!(
            f,
            "  Region: lon [{}, {}], lat [{}, {}]",
            bbox.min_lon, bbox.max_lon, bbox.min_lat, bbox.max_lat
        )?;
        writeln!(
            f,
            "  Time period: {} to {} ({} days)",
            range.start,
            range.end,
            range.num_days()
        )?;
        writeln!(
            f,
            "  Output: {}/{}YYYY-MM-DD.{}",
            self.output.directory.display(),
            self.output.filename_prefix,
            self.output.format
        )?;
        write!(
            f,
            "  Processing: {} interpolation at {}° resolution, sigma {}{}",
            self.processing.interpolation_method,
            self.processing.grid_resolution,
            self.processing.smoothing_sigma,
            if self.processing.parallel { ", parallel" } else { "" }
        )
    }
}
