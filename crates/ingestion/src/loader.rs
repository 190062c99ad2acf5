//! Observation sources.

use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use csv::StringRecord;
use snowline_common::Observation;
use tracing::{debug, info};

use crate::error::{IngestionError, Result};
use crate::validation::{validate_headers, validate_observations};

/// Something that can produce the full, validated observation table.
pub trait ObservationSource: Send + Sync {
    /// Load every observation. Called once per run.
    fn load(&self) -> Result<Vec<Observation>>;

    /// Human-readable description for logs.
    fn describe(&self) -> String;
}

/// Reads the Snow Survey of Great Britain CSV layout.
#[derive(Debug, Clone)]
pub struct CsvObservationSource {
    path: PathBuf,
}

impl CsvObservationSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ObservationSource for CsvObservationSource {
    fn load(&self) -> Result<Vec<Observation>> {
        if !self.path.exists() {
            return Err(IngestionError::FileNotFound(self.path.clone()));
        }
        let file = std::fs::File::open(&self.path)?;
        let observations = read_observations(file)?;

        info!(
            path = %self.path.display(),
            rows = observations.len(),
            "Loaded snow observations"
        );
        Ok(observations)
    }

    fn describe(&self) -> String {
        format!("csv:{}", self.path.display())
    }
}

/// An already-loaded table.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    observations: Vec<Observation>,
}

impl MemorySource {
    pub fn new(observations: Vec<Observation>) -> Self {
        Self { observations }
    }
}

impl ObservationSource for MemorySource {
    fn load(&self) -> Result<Vec<Observation>> {
        validate_observations(&self.observations)?;
        Ok(self.observations.clone())
    }

    fn describe(&self) -> String {
        format!("memory:{} rows", self.observations.len())
    }
}

/// Column positions resolved from the header row.
struct Columns {
    date: usize,
    site_id: usize,
    latitude: usize,
    longitude: usize,
    snow_present: usize,
    snow_depth: Option<usize>,
    elevation: Option<usize>,
}

impl Columns {
    fn resolve(headers: &StringRecord) -> Result<Self> {
        validate_headers(headers.iter())?;
        let find = |name: &str| headers.iter().position(|h| h == name);
        let required = |name: &str| {
            find(name).ok_or_else(|| IngestionError::MissingColumns(name.to_string()))
        };
        Ok(Self {
            date: required("date")?,
            site_id: required("site_id")?,
            latitude: required("latitude")?,
            longitude: required("longitude")?,
            snow_present: required("snow_present")?,
            snow_depth: find("snow_depth"),
            elevation: find("elevation"),
        })
    }
}

/// Parse and validate an observation table from CSV text.
///
/// Requires a header row naming at least the required columns. Optional
/// `snow_depth` and `elevation` cells may be empty.
pub fn read_observations<R: Read>(reader: R) -> Result<Vec<Observation>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let columns = Columns::resolve(&headers)?;
    debug!(columns = headers.len(), "Resolved CSV header");

    let mut observations = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        observations.push(parse_record(&record, &columns, line)?);
    }

    validate_observations(&observations)?;
    Ok(observations)
}

fn parse_record(record: &StringRecord, columns: &Columns, line: u64) -> Result<Observation> {
    let field = |idx: usize| record.get(idx).unwrap_or("");

    let date = parse_date(field(columns.date))
        .ok_or_else(|| IngestionError::invalid_record(line, format!("bad date '{}'", field(columns.date))))?;
    let latitude = parse_f64(field(columns.latitude), "latitude", line)?;
    let longitude = parse_f64(field(columns.longitude), "longitude", line)?;
    let snow_present = parse_bool(field(columns.snow_present)).ok_or_else(|| {
        IngestionError::invalid_record(
            line,
            format!("bad snow_present '{}'", field(columns.snow_present)),
        )
    })?;

    let optional = |idx: Option<usize>, name: &str| -> Result<Option<f64>> {
        match idx.map(field) {
            None | Some("") => Ok(None),
            Some(s) => parse_f64(s, name, line).map(Some),
        }
    };

    Ok(Observation {
        date,
        site_id: field(columns.site_id).to_string(),
        latitude,
        longitude,
        snow_present,
        snow_depth: optional(columns.snow_depth, "snow_depth")?,
        elevation: optional(columns.elevation, "elevation")?,
    })
}

/// ISO dates, optionally followed by a time component, or day-first `dd/mm/YYYY`.
fn parse_date(s: &str) -> Option<NaiveDate> {
    let head = s.get(..10).unwrap_or(s);
    NaiveDate::parse_from_str(head, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%d/%m/%Y"))
        .ok()
}

fn parse_f64(s: &str, name: &str, line: u64) -> Result<f64> {
    s.parse::<f64>()
        .map_err(|_| IngestionError::invalid_record(line, format!("bad {name} '{s}'")))
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "y" | "t" => Some(true),
        "false" | "0" | "no" | "n" | "f" => Some(false),
        _ => None,
    }
}
