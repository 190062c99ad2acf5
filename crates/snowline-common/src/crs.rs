//! Coordinate reference system tag carried by snowline geometries.

use serde::{Deserialize, Serialize};
use std::fmt;

/// CRS of a snowline geometry. Extraction maps grid indices back through
/// lon/lat axes, so every geometry is geographic WGS84.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Crs {
    /// WGS84 Geographic (lon/lat in degrees)
    #[default]
    Epsg4326,
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Crs::Epsg4326 => f.write_str("EPSG:4326"),
        }
    }
}
