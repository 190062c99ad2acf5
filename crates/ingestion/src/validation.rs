//! Validation of observation tables.

use snowline_common::Observation;

use crate::error::{IngestionError, Result};

/// Columns every observation table must carry.
pub const REQUIRED_COLUMNS: [&str; 5] = ["date", "site_id", "latitude", "longitude", "snow_present"];

/// Check that every required column is present, reporting all missing ones at once.
pub fn validate_headers<'a>(headers: impl IntoIterator<Item = &'a str>) -> Result<()> {
    let present: Vec<&str> = headers.into_iter().collect();
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|col| !present.contains(col))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(IngestionError::MissingColumns(missing.join(", ")))
    }
}

/// Check coordinate domains: |latitude| <= 90 and |longitude| <= 180.
pub fn validate_observations(observations: &[Observation]) -> Result<()> {
    if observations.iter().any(|o| !(o.latitude.abs() <= 90.0)) {
        return Err(IngestionError::InvalidLatitude);
    }
    if observations.iter().any(|o| !(o.longitude.abs() <= 180.0)) {
        return Err(IngestionError::InvalidLongitude);
    }
    Ok(())
}
