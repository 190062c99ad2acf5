//! End-to-end tests for per-date extraction and date-range orchestration.

use chrono::{Duration, NaiveDate};
use grid_processor::{build_grid, extract_contours, GridValues, InterpolationMethod};
use ingestion::{MemorySource, ObservationSummary};
use snowline_common::{
    BoundingBox, DailyOutcome, DateRange, EmptyReason, Observation, ObservationSet,
    SnowlineResult,
};
use snowline_engine::{
    run_date_range, run_date_range_parallel, to_geometry, InterpolationProcessor, PipelineConfig,
    ProcessingConfig, ProcessingError, SeriesSummary, SnowlinePipeline, SnowlineProcessor,
    CONTOUR_LEVEL,
};
use test_utils::fixtures::{bbox, dates};
use test_utils::{lattice_observations, multi_day_observations, sparse_observations, step_field};

fn processor(resolution: f64) -> InterpolationProcessor {
    let config = ProcessingConfig {
        grid_resolution: resolution,
        ..Default::default()
    };
    InterpolationProcessor::new(config, bbox::cairngorms()).unwrap()
}

fn extract(processor: &InterpolationProcessor, obs: &[Observation]) -> Option<SnowlineResult> {
    let set = ObservationSet::select(obs, dates::reference(), &bbox::cairngorms());
    processor.extract_snowline(dates::reference(), &set).unwrap()
}

// ============================================================================
// Scenario: 5x5 lattice, southern row snow-free
// ============================================================================

#[test]
fn test_mixed_lattice_extracts_geometry() {
    let obs = lattice_observations(dates::reference(), &bbox::cairngorms(), 5, 5, 56.5);
    let result = extract(&processor(0.1), &obs).unwrap();

    assert_eq!(result.observation_count, 25);
    assert_eq!(result.reason, None);
    let geometry = result.geometry.expect("mixed lattice has a snowline");
    assert!(geometry.is_valid());
    for c in geometry.coords() {
        assert!(c.y >= 56.0 && c.y <= 56.6, "vertex latitude {}", c.y);
    }
}

#[test]
fn test_uniform_lattice_is_labeled() {
    let obs = lattice_observations(dates::reference(), &bbox::cairngorms(), 5, 5, 50.0);
    let result = extract(&processor(0.1), &obs).unwrap();
    assert_eq!(result.reason, Some(EmptyReason::CompleteSnow));
    assert!(result.geometry.is_none());
    assert_eq!(result.observation_count, 25);
}

#[test]
fn test_every_method_extracts() {
    let obs = lattice_observations(dates::reference(), &bbox::cairngorms(), 5, 5, 57.0);
    for method in [
        InterpolationMethod::Nearest,
        InterpolationMethod::Linear,
        InterpolationMethod::Cubic,
    ] {
        let config = ProcessingConfig {
            grid_resolution: 0.1,
            interpolation_method: method,
            ..Default::default()
        };
        let processor = InterpolationProcessor::new(config, bbox::cairngorms()).unwrap();
        let result = extract(&processor, &obs).unwrap();
        assert!(result.has_geometry(), "{method} produced no snowline");
    }
}

// ============================================================================
// Scenario: two observations only
// ============================================================================

#[test]
fn test_two_observations_are_insufficient() {
    let obs = sparse_observations(dates::reference(), &bbox::cairngorms(), &[true, false]);
    let series = run_date_range(
        dates::reference(),
        dates::reference(),
        &obs,
        &bbox::cairngorms(),
        &processor(0.1),
    );

    assert_eq!(series.len(), 1);
    let outcome = &series[&dates::reference()];
    assert_eq!(outcome.row_count(), 1);
    let result = outcome.result().unwrap();
    assert_eq!(result.reason, Some(EmptyReason::InsufficientData));
    assert!(result.geometry.is_none());
}

// ============================================================================
// Scenario: forced step field
// ============================================================================

#[test]
fn test_step_field_maps_to_midline() {
    let area = bbox::cairngorms();
    let grid = build_grid(&area, 0.1).unwrap();
    let (rows, cols) = grid.shape();
    let field = GridValues::from_vec(step_field(cols, rows), cols, rows).unwrap();

    let contours = extract_contours(&field, CONTOUR_LEVEL);
    let geometry = to_geometry(&contours, &grid).unwrap();

    let midline = (grid.lats()[rows / 2 - 1] + grid.lats()[rows / 2]) / 2.0;
    let lats: Vec<f64> = geometry.coords().map(|c| c.y).collect();
    assert_eq!(lats.len(), cols);
    for lat in lats {
        assert!((lat - midline).abs() <= grid.resolution(), "lat {lat} vs midline {midline}");
    }
}

// ============================================================================
// Date-range orchestration
// ============================================================================

#[test]
fn test_every_date_has_an_entry() {
    let start = dates::ymd(2005, 1, 10);
    let end = dates::ymd(2005, 1, 20);
    // Observations on two dates only.
    let mut obs = lattice_observations(dates::ymd(2005, 1, 12), &bbox::cairngorms(), 4, 4, 57.0);
    obs.extend(lattice_observations(dates::ymd(2005, 1, 15), &bbox::cairngorms(), 4, 4, 57.0));

    let series = run_date_range(start, end, &obs, &bbox::cairngorms(), &processor(0.1));

    assert_eq!(series.len(), DateRange::new(start, end).num_days());
    let keys: Vec<NaiveDate> = series.keys().copied().collect();
    let expected: Vec<NaiveDate> = DateRange::new(start, end).iter().collect();
    assert_eq!(keys, expected);

    for (date, outcome) in &series {
        if *date == dates::ymd(2005, 1, 12) || *date == dates::ymd(2005, 1, 15) {
            assert_eq!(outcome.row_count(), 1);
        } else {
            assert_eq!(outcome, &DailyOutcome::Empty);
            assert_eq!(outcome.row_count(), 0);
        }
    }
}

#[test]
fn test_observations_outside_bbox_are_ignored() {
    let mut obs = lattice_observations(dates::reference(), &bbox::cairngorms(), 3, 3, 50.0);
    // Snow-free sites just outside the window would make the date mixed.
    let outside = BoundingBox::new(-7.0, -5.5, 56.0, 58.0);
    obs.extend(lattice_observations(dates::reference(), &outside, 3, 3, 90.0));

    let series = run_date_range(
        dates::reference(),
        dates::reference(),
        &obs,
        &bbox::cairngorms(),
        &processor(0.1),
    );
    let result = series[&dates::reference()].result().unwrap();
    assert_eq!(result.reason, Some(EmptyReason::CompleteSnow));
    assert_eq!(result.observation_count, 9);
}

#[test]
fn test_bbox_bounds_are_inclusive() {
    let obs = vec![
        Observation::new(dates::reference(), "SW", 56.0, -5.0, true),
        Observation::new(dates::reference(), "NE", 58.0, -3.0, true),
    ];
    let set = ObservationSet::select(&obs, dates::reference(), &bbox::cairngorms());
    assert_eq!(set.len(), 2);
}

#[test]
fn test_parallel_matches_sequential() {
    let start = dates::reference();
    let obs = multi_day_observations(start, 5, &bbox::cairngorms(), 56.5, 0.2);
    let end = start + Duration::days(6);

    let p = processor(0.1);
    let sequential = run_date_range(start, end, &obs, &bbox::cairngorms(), &p);
    let parallel = run_date_range_parallel(start, end, &obs, &bbox::cairngorms(), &p);
    assert_eq!(sequential, parallel);
    assert_eq!(SeriesSummary::from_series(&sequential).empty, 2);
}

#[test]
fn test_inverted_range_is_empty() {
    let series = run_date_range(
        dates::ymd(2005, 1, 20),
        dates::ymd(2005, 1, 10),
        &[],
        &bbox::cairngorms(),
        &processor(0.1),
    );
    assert!(series.is_empty());
}

// ============================================================================
// Failure isolation
// ============================================================================

/// Fails on one chosen date and labels every other date.
struct FlakyProcessor {
    fail_on: NaiveDate,
}

impl SnowlineProcessor for FlakyProcessor {
    fn extract_snowline(
        &self,
        date: NaiveDate,
        observations: &ObservationSet<'_>,
    ) -> snowline_engine::Result<Option<SnowlineResult>> {
        if date == self.fail_on {
            return Err(ProcessingError::Grid(
                grid_processor::GridProcessorError::interpolation("synthetic failure"),
            ));
        }
        Ok(Some(SnowlineResult::labeled(
            date,
            EmptyReason::NoSnow,
            observations.len(),
        )))
    }
}

#[test]
fn test_failure_is_isolated_to_one_date() {
    let start = dates::ymd(2005, 1, 14);
    let end = dates::ymd(2005, 1, 16);
    let processor = FlakyProcessor {
        fail_on: dates::reference(),
    };

    let series = run_date_range(start, end, &[], &bbox::cairngorms(), &processor);
    assert_eq!(series.len(), 3);
    assert!(series[&dates::reference()].is_failed());
    assert!(!series[&start].is_failed());
    assert!(!series[&end].is_failed());

    let summary = SeriesSummary::from_series(&series);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.labeled, 2);
}

// ============================================================================
// Pipeline wrapper
// ============================================================================

#[test]
fn test_pipeline_runs_from_source() {
    let start = dates::reference();
    let obs = multi_day_observations(start, 3, &bbox::cairngorms(), 56.5, 0.3);
    let config = PipelineConfig {
        date_range: DateRange::new(start, start + Duration::days(2)),
        bbox: bbox::cairngorms(),
        parallel: true,
    };
    let pipeline = SnowlinePipeline::new(config, MemorySource::new(obs), processor(0.1)).unwrap();

    let series = pipeline.run().unwrap();
    assert_eq!(series.len(), 3);
    assert!(series.values().all(|o| o.result().is_some_and(|r| r.has_geometry())));
}

#[test]
fn test_pipeline_rejects_inverted_range() {
    let config = PipelineConfig {
        date_range: DateRange::new(dates::ymd(2005, 1, 20), dates::ymd(2005, 1, 10)),
        bbox: bbox::cairngorms(),
        parallel: false,
    };
    assert!(SnowlinePipeline::new(config, MemorySource::default(), processor(0.1)).is_err());
}

#[test]
fn test_pipeline_load_returns_source_table() {
    let start = dates::reference();
    let obs = multi_day_observations(start, 2, &bbox::cairngorms(), 56.5, 0.3);
    let config = PipelineConfig {
        date_range: DateRange::new(start, start + Duration::days(1)),
        bbox: bbox::cairngorms(),
        parallel: false,
    };
    let pipeline =
        SnowlinePipeline::new(config, MemorySource::new(obs.clone()), processor(0.1)).unwrap();

    let loaded = pipeline.load().unwrap();
    assert_eq!(loaded, obs);

    let summary = ObservationSummary::from_observations(&loaded);
    assert_eq!(summary.rows, 72);
    assert_eq!(summary.first_date, Some(start));
    assert_eq!(summary.last_date, Some(start + Duration::days(1)));
}
