//! Per-date extraction results.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use geo::{Coord, LineString, MultiLineString};
use serde::{Deserialize, Serialize};

use crate::Crs;

/// Why a date produced a result without a snowline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyReason {
    /// Every observation reports snow.
    CompleteSnow,
    /// No observation reports snow.
    NoSnow,
    /// Mixed states but too few points to interpolate.
    InsufficientData,
}

impl EmptyReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmptyReason::CompleteSnow => "complete_snow",
            EmptyReason::NoSnow => "no_snow",
            EmptyReason::InsufficientData => "insufficient_data",
        }
    }
}

impl fmt::Display for EmptyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A snowline as a single line or a collection of lines, in (lon, lat) order.
#[derive(Debug, Clone, PartialEq)]
pub enum SnowlineGeometry {
    Line(LineString<f64>),
    MultiLine(MultiLineString<f64>),
}

impl SnowlineGeometry {
    /// Build from a list of lines: one line stays a `Line`, several become a `MultiLine`.
    /// Returns `None` for an empty list.
    pub fn from_lines(mut lines: Vec<LineString<f64>>) -> Option<Self> {
        match lines.len() {
            0 => None,
            1 => lines.pop().map(SnowlineGeometry::Line),
            _ => Some(SnowlineGeometry::MultiLine(MultiLineString::new(lines))),
        }
    }

    /// The component lines, borrowed.
    pub fn lines(&self) -> Vec<&LineString<f64>> {
        match self {
            SnowlineGeometry::Line(line) => vec![line],
            SnowlineGeometry::MultiLine(multi) => multi.0.iter().collect(),
        }
    }

    /// The geometry as a multi-line, regardless of variant.
    pub fn to_multi_line(&self) -> MultiLineString<f64> {
        match self {
            SnowlineGeometry::Line(line) => MultiLineString::new(vec![line.clone()]),
            SnowlineGeometry::MultiLine(multi) => multi.clone(),
        }
    }

    pub fn line_count(&self) -> usize {
        match self {
            SnowlineGeometry::Line(_) => 1,
            SnowlineGeometry::MultiLine(multi) => multi.0.len(),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.lines().iter().map(|line| line.0.len()).sum()
    }

    /// Iterate over every vertex of every line.
    pub fn coords(&self) -> impl Iterator<Item = &Coord<f64>> + '_ {
        let lines: Vec<&LineString<f64>> = self.lines();
        lines.into_iter().flat_map(|line| line.0.iter())
    }

    /// Structural validity: every line has at least two vertices and every
    /// coordinate is finite. An empty multi-line is valid.
    pub fn is_valid(&self) -> bool {
        self.lines().iter().all(|line| {
            line.0.len() >= 2 && line.0.iter().all(|c| c.x.is_finite() && c.y.is_finite())
        })
    }
}

/// The unit of output for one date.
///
/// `geometry` is `None` exactly when `reason` is set, or when extraction
/// ran but the surface had no crossing at the contour level.
#[derive(Debug, Clone, PartialEq)]
pub struct SnowlineResult {
    pub date: NaiveDate,
    pub geometry: Option<SnowlineGeometry>,
    pub observation_count: usize,
    pub reason: Option<EmptyReason>,
    pub crs: Crs,
}

impl SnowlineResult {
    /// A result carrying an extracted (possibly absent) geometry.
    pub fn extracted(
        date: NaiveDate,
        geometry: Option<SnowlineGeometry>,
        observation_count: usize,
    ) -> Self {
        Self {
            date,
            geometry,
            observation_count,
            reason: None,
            crs: Crs::Epsg4326,
        }
    }

    /// A labeled result without geometry.
    pub fn labeled(date: NaiveDate, reason: EmptyReason, observation_count: usize) -> Self {
        Self {
            date,
            geometry: None,
            observation_count,
            reason: Some(reason),
            crs: Crs::Epsg4326,
        }
    }

    /// Same metadata, different geometry.
    pub fn with_geometry(&self, geometry: Option<SnowlineGeometry>) -> Self {
        Self {
            geometry,
            ..self.clone()
        }
    }

    pub fn has_geometry(&self) -> bool {
        self.geometry.is_some()
    }
}

/// Outcome of one date in a date-range run.
#[derive(Debug, Clone, PartialEq)]
pub enum DailyOutcome {
    /// No observations for the date: zero rows.
    Empty,
    /// Exactly one row, labeled or extracted.
    Extracted(SnowlineResult),
    /// Extraction failed for this date only.
    Failed(String),
}

impl DailyOutcome {
    /// The result row, if any.
    pub fn result(&self) -> Option<&SnowlineResult> {
        match self {
            DailyOutcome::Extracted(result) => Some(result),
            _ => None,
        }
    }

    /// Number of result rows (0 or 1).
    pub fn row_count(&self) -> usize {
        match self {
            DailyOutcome::Extracted(_) => 1,
            _ => 0,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, DailyOutcome::Failed(_))
    }

    /// Short status label used in logs and summaries.
    pub fn status(&self) -> &'static str {
        match self {
            DailyOutcome::Empty => "empty",
            DailyOutcome::Extracted(result) => match (result.reason, &result.geometry) {
                (Some(_), _) => "labeled",
                (None, Some(_)) => "snowline",
                (None, None) => "no_crossing",
            },
            DailyOutcome::Failed(_) => "failed",
        }
    }
}

/// Date-keyed outcomes of a run, in ascending date order.
pub type SnowlineSeries = BTreeMap<NaiveDate, DailyOutcome>;

#[cfg(test)]
mod tests {
    use super::*;

    fn line(points: &[(f64, f64)]) -> LineString<f64> {
        LineString::from(points.to_vec())
    }

    #[test]
    fn test_from_lines_variants() {
        assert!(SnowlineGeometry::from_lines(vec![]).is_none());

        let single = SnowlineGeometry::from_lines(vec![line(&[(0.0, 0.0), (1.0, 1.0)])]).unwrap();
        assert!(matches!(single, SnowlineGeometry::Line(_)));

        let multi = SnowlineGeometry::from_lines(vec![
            line(&[(0.0, 0.0), (1.0, 1.0)]),
            line(&[(2.0, 2.0), (3.0, 3.0), (4.0, 4.0)]),
        ])
        .unwrap();
        assert_eq!(multi.line_count(), 2);
        assert_eq!(multi.vertex_count(), 5);
        assert!(multi.is_valid());
    }

    #[test]
    fn test_outcome_status() {
        let date = NaiveDate::from_ymd_opt(2005, 1, 15).unwrap();
        assert_eq!(DailyOutcome::Empty.row_count(), 0);

        let labeled = DailyOutcome::Extracted(SnowlineResult::labeled(date, EmptyReason::NoSnow, 4));
        assert_eq!(labeled.status(), "labeled");
        assert_eq!(labeled.row_count(), 1);

        let crossing = DailyOutcome::Extracted(SnowlineResult::extracted(date, None, 10));
        assert_eq!(crossing.status(), "no_crossing");
    }

    #[test]
    fn test_reason_strings() {
        assert_eq!(EmptyReason::CompleteSnow.to_string(), "complete_snow");
        assert_eq!(EmptyReason::InsufficientData.as_str(), "insufficient_data");
        assert_eq!(
            serde_json::to_string(&EmptyReason::NoSnow).unwrap(),
            "\"no_snow\""
        );
    }
}
