//! Point observations of snow state and per-date selections over them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::BoundingBox;

/// A single snow observation at a specific site and date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub date: NaiveDate,
    pub site_id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub snow_present: bool,
    #[serde(default)]
    pub snow_depth: Option<f64>,
    #[serde(default)]
    pub elevation: Option<f64>,
}

impl Observation {
    /// Create an observation without the optional depth/elevation fields.
    pub fn new(
        date: NaiveDate,
        site_id: impl Into<String>,
        latitude: f64,
        longitude: f64,
        snow_present: bool,
    ) -> Self {
        Self {
            date,
            site_id: site_id.into(),
            latitude,
            longitude,
            snow_present,
            snow_depth: None,
            elevation: None,
        }
    }

    /// (longitude, latitude) pair, the order used by the interpolation grid.
    pub fn lon_lat(&self) -> (f64, f64) {
        (self.longitude, self.latitude)
    }

    /// Snow state as a real number: 1.0 when present, 0.0 otherwise.
    pub fn state_value(&self) -> f64 {
        if self.snow_present {
            1.0
        } else {
            0.0
        }
    }
}

/// The observations for one date inside one bounding box.
///
/// Borrowed from the loaded table; building a set never mutates or
/// narrows the source, so every date is selected from the full table.
#[derive(Debug, Clone, Default)]
pub struct ObservationSet<'a> {
    observations: Vec<&'a Observation>,
}

impl<'a> ObservationSet<'a> {
    /// Select observations whose date equals `date` and whose coordinates
    /// fall inside `bbox` (inclusive on both bounds).
    pub fn select(all: &'a [Observation], date: NaiveDate, bbox: &BoundingBox) -> Self {
        let observations = all
            .iter()
            .filter(|obs| obs.date == date && bbox.contains(obs.longitude, obs.latitude))
            .collect();
        Self { observations }
    }

    /// Wrap an already-filtered slice.
    pub fn from_filtered(observations: impl IntoIterator<Item = &'a Observation>) -> Self {
        Self {
            observations: observations.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Observation> + '_ {
        self.observations.iter().copied()
    }

    /// True if every observation reports snow. Vacuously true when empty.
    pub fn all_snow(&self) -> bool {
        self.observations.iter().all(|obs| obs.snow_present)
    }

    /// True if at least one observation reports snow.
    pub fn any_snow(&self) -> bool {
        self.observations.iter().any(|obs| obs.snow_present)
    }

    /// Observation locations as (longitude, latitude) pairs.
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.observations.iter().map(|obs| obs.lon_lat()).collect()
    }

    /// Snow states cast to 0.0 / 1.0, aligned with [`ObservationSet::points`].
    pub fn values(&self) -> Vec<f64> {
        self.observations.iter().map(|obs| obs.state_value()).collect()
    }
}
