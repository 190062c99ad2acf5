//! Output file naming and batch rendering of a snowline series.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use snowline_common::{DailyOutcome, SnowlineResult, SnowlineSeries};
use tracing::{info, warn};

use crate::error::Result;
use crate::{MapRenderer, OutputFormat};

/// Writes one map per date into an output directory.
pub struct MapGenerator {
    directory: PathBuf,
    filename_prefix: String,
    format: OutputFormat,
    renderer: Box<dyn MapRenderer>,
}

impl MapGenerator {
    pub fn new(
        directory: impl Into<PathBuf>,
        filename_prefix: impl Into<String>,
        format: OutputFormat,
        renderer: Box<dyn MapRenderer>,
    ) -> Self {
        Self {
            directory: directory.into(),
            filename_prefix: filename_prefix.into(),
            format,
            renderer,
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// `{prefix}{YYYY-MM-DD}.{ext}` inside the output directory.
    pub fn output_path(&self, date: NaiveDate) -> PathBuf {
        self.directory.join(format!(
            "{}{}.{}",
            self.filename_prefix,
            date.format("%Y-%m-%d"),
            self.format.extension()
        ))
    }

    /// Render a single date.
    pub fn generate_single(
        &self,
        snowline: Option<&SnowlineResult>,
        date: NaiveDate,
    ) -> Result<PathBuf> {
        self.renderer.render(snowline, date, &self.output_path(date))
    }

    /// Render every date of a series in ascending order.
    ///
    /// Dates whose extraction failed produce no map. The first write error
    /// aborts the batch.
    pub fn generate_all(&self, series: &SnowlineSeries) -> Result<Vec<PathBuf>> {
        let mut written = Vec::with_capacity(series.len());

        for (date, outcome) in series {
            if let DailyOutcome::Failed(message) = outcome {
                warn!(date = %date, error = %message, "Skipping map for failed date");
                continue;
            }
            written.push(self.generate_single(outcome.result(), *date)?);
        }

        info!(
            maps = written.len(),
            directory = %self.directory.display(),
            "Generated snowline maps"
        );
        Ok(written)
    }
}
