//! Descriptive statistics for a loaded observation table.

use std::collections::HashSet;
use std::fmt;

use chrono::NaiveDate;
use snowline_common::Observation;

/// Row, site and date coverage of an observation table.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationSummary {
    pub rows: usize,
    pub sites: usize,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    /// Share of rows reporting snow, 0.0 for an empty table.
    pub snow_fraction: f64,
}

impl ObservationSummary {
    pub fn from_observations(observations: &[Observation]) -> Self {
        let sites: HashSet<&str> = observations.iter().map(|o| o.site_id.as_str()).collect();
        let snow = observations.iter().filter(|o| o.snow_present).count();
        Self {
            rows: observations.len(),
            sites: sites.len(),
            first_date: observations.iter().map(|o| o.date).min(),
            last_date: observations.iter().map(|o| o.date).max(),
            snow_fraction: if observations.is_empty() {
                0.0
            } else {
                snow as f64 / observations.len() as f64
            },
        }
    }
}

impl fmt::Display for ObservationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} rows from {} sites", self.rows, self.sites)?;
        if let (Some(first), Some(last)) = (self.first_date, self.last_date) {
            write!(f, ", {first} to {last}")?;
        }
        write!(f, ", {:.0}% snow", self.snow_fraction * 100.0)
    }
}
