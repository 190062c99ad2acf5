//! Integration tests for loading observation tables from disk.

use chrono::NaiveDate;
use ingestion::{CsvObservationSource, IngestionError, ObservationSource};
use test_utils::fixtures::csv;
use test_utils::{require_test_file, temp_test_dir, write_test_file};

fn load_str(contents: &str) -> ingestion::Result<Vec<snowline_common::Observation>> {
    let dir = temp_test_dir();
    let path = write_test_file(dir.path(), "snow.csv", contents);
    CsvObservationSource::new(path).load()
}

// ============================================================================
// Valid tables
// ============================================================================

#[test]
fn test_load_valid_csv() {
    let obs = load_str(csv::VALID).unwrap();
    assert_eq!(obs.len(), 3);
    assert_eq!(obs[0].site_id, "SITE001");
    assert_eq!(obs[0].date, NaiveDate::from_ymd_opt(2005, 1, 15).unwrap());
    assert_eq!(obs[0].snow_depth, Some(15.5));
    assert_eq!(obs[0].elevation, Some(820.0));
    assert!(!obs[1].snow_present);
    assert!(obs[2].snow_present, "'yes' parses as snow present");
}

#[test]
fn test_load_sample_file() {
    let path = require_test_file!("ssgb_sample.csv");
    let obs = CsvObservationSource::new(path).load().unwrap();
    assert_eq!(obs.len(), 8);

    let jan15 = NaiveDate::from_ymd_opt(2005, 1, 15).unwrap();
    let jan16 = NaiveDate::from_ymd_opt(2005, 1, 16).unwrap();
    let in_range = obs.iter().filter(|o| o.date >= jan15 && o.date <= jan16).count();
    assert_eq!(in_range, 4);
}

#[test]
fn test_load_is_repeatable() {
    let dir = temp_test_dir();
    let path = write_test_file(dir.path(), "snow.csv", csv::VALID);
    let source = CsvObservationSource::new(&path);
    assert_eq!(source.load().unwrap(), source.load().unwrap());
    assert_eq!(source.path(), path.as_path());
}

// ============================================================================
// Invalid tables
// ============================================================================

#[test]
fn test_missing_file() {
    let source = CsvObservationSource::new("/nonexistent/path.csv");
    assert!(matches!(source.load(), Err(IngestionError::FileNotFound(_))));
}

#[test]
fn test_missing_columns() {
    match load_str(csv::MISSING_COLUMNS) {
        Err(IngestionError::MissingColumns(cols)) => {
            assert!(cols.contains("date"));
            assert!(cols.contains("snow_present"));
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn test_invalid_coordinates() {
    assert!(matches!(load_str(csv::BAD_LATITUDE), Err(IngestionError::InvalidLatitude)));
    assert!(matches!(load_str(csv::BAD_LONGITUDE), Err(IngestionError::InvalidLongitude)));
}

#[test]
fn test_invalid_snow_state() {
    let err = load_str(csv::BAD_SNOW_STATE).unwrap_err();
    assert!(err.to_string().contains("snow_present"));
}
