//! Date-range orchestration.
//!
//! Every date is selected from the full, untouched observation table, so
//! dates are independent and can be extracted in any order or concurrently.

use chrono::NaiveDate;
use ingestion::{ObservationSource, ObservationSummary};
use rayon::prelude::*;
use snowline_common::{
    BoundingBox, DailyOutcome, DateRange, Observation, ObservationSet, SnowlineSeries,
};
use tracing::{error, info};

use crate::error::PipelineError;
use crate::processor::SnowlineProcessor;

/// Extract every date from `start` to `end` inclusive, one after another.
pub fn run_date_range<P>(
    start: NaiveDate,
    end: NaiveDate,
    observations: &[Observation],
    bbox: &BoundingBox,
    processor: &P,
) -> SnowlineSeries
where
    P: SnowlineProcessor + ?Sized,
{
    DateRange::new(start, end)
        .iter()
        .map(|date| (date, extract_date(date, observations, bbox, processor)))
        .collect()
}

/// Same as [`run_date_range`], extracting dates on the rayon thread pool.
pub fn run_date_range_parallel<P>(
    start: NaiveDate,
    end: NaiveDate,
    observations: &[Observation],
    bbox: &BoundingBox,
    processor: &P,
) -> SnowlineSeries
where
    P: SnowlineProcessor + ?Sized,
{
    let dates: Vec<NaiveDate> = DateRange::new(start, end).iter().collect();
    dates
        .into_par_iter()
        .map(|date| (date, extract_date(date, observations, bbox, processor)))
        .collect()
}

fn extract_date<P>(
    date: NaiveDate,
    observations: &[Observation],
    bbox: &BoundingBox,
    processor: &P,
) -> DailyOutcome
where
    P: SnowlineProcessor + ?Sized,
{
    let selected = ObservationSet::select(observations, date, bbox);
    match processor.extract_snowline(date, &selected) {
        Ok(Some(result)) => DailyOutcome::Extracted(result),
        Ok(None) => DailyOutcome::Empty,
        Err(e) => {
            error!(%date, observations = selected.len(), error = %e, "Snowline extraction failed");
            DailyOutcome::Failed(e.to_string())
        }
    }
}

/// Per-status date counts of a finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeriesSummary {
    pub dates: usize,
    pub snowlines: usize,
    pub no_crossing: usize,
    pub labeled: usize,
    pub empty: usize,
    pub failed: usize,
}

impl SeriesSummary {
    pub fn from_series(series: &SnowlineSeries) -> Self {
        let mut summary = Self {
            dates: series.len(),
            ..Default::default()
        };
        for outcome in series.values() {
            match outcome.status() {
                "snowline" => summary.snowlines += 1,
                "no_crossing" => summary.no_crossing += 1,
                "labeled" => summary.labeled += 1,
                "empty" => summary.empty += 1,
                _ => summary.failed += 1,
            }
        }
        summary
    }
}

/// What a pipeline run covers.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub date_range: DateRange,
    pub bbox: BoundingBox,
    pub parallel: bool,
}

/// Load once, then extract every date of the configured range.
pub struct SnowlinePipeline<S, P> {
    config: PipelineConfig,
    source: S,
    processor: P,
}

impl<S, P> SnowlinePipeline<S, P>
where
    S: ObservationSource,
    P: SnowlineProcessor,
{
    pub fn new(config: PipelineConfig, source: S, processor: P) -> Result<Self, PipelineError> {
        config.date_range.validate()?;
        config.bbox.validate()?;
        Ok(Self {
            config,
            source,
            processor,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Load the observation table once and log what it covers.
    pub fn load(&self) -> Result<Vec<Observation>, PipelineError> {
        let observations = self.source.load()?;
        let summary = ObservationSummary::from_observations(&observations);
        info!(
            source = %self.source.describe(),
            rows = summary.rows,
            sites = summary.sites,
            "Loaded observations: {}",
            summary
        );
        Ok(observations)
    }

    /// Load the table from the source and run every date.
    pub fn run(&self) -> Result<SnowlineSeries, PipelineError> {
        let observations = self.load()?;
        Ok(self.run_with(&observations))
    }

    /// Run every date against an already-loaded table.
    pub fn run_with(&self, observations: &[Observation]) -> SnowlineSeries {
        let DateRange { start, end } = self.config.date_range;
        info!(
            source = %self.source.describe(),
            rows = observations.len(),
            start = %start,
            end = %end,
            parallel = self.config.parallel,
            "Running snowline extraction"
        );

        let series = if self.config.parallel {
            run_date_range_parallel(start, end, observations, &self.config.bbox, &self.processor)
        } else {
            run_date_range(start, end, observations, &self.config.bbox, &self.processor)
        };

        let summary = SeriesSummary::from_series(&series);
        info!(
            dates = summary.dates,
            snowlines = summary.snowlines,
            no_crossing = summary.no_crossing,
            labeled = summary.labeled,
            empty = summary.empty,
            failed = summary.failed,
            "Snowline extraction complete"
        );
        series
    }
}
