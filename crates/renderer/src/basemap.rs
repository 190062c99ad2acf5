//! Basemap outlines read from GeoJSON.
//!
//! Only the outline of each geometry is kept: polygon rings and line
//! strings become polylines, points are ignored.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::{RenderError, Result};

/// A GeoJSON position; anything past longitude and latitude is ignored.
type Position = Vec<f64>;

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum GeoJson {
    FeatureCollection {
        features: Vec<GeoJson>,
    },
    Feature {
        geometry: Option<Box<GeoJson>>,
    },
    GeometryCollection {
        geometries: Vec<GeoJson>,
    },
    Point {},
    MultiPoint {},
    LineString {
        coordinates: Vec<Position>,
    },
    MultiLineString {
        coordinates: Vec<Vec<Position>>,
    },
    Polygon {
        coordinates: Vec<Vec<Position>>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Vec<Position>>>,
    },
}

impl GeoJson {
    fn collect_outlines(&self, out: &mut Vec<Vec<(f64, f64)>>) {
        match self {
            GeoJson::FeatureCollection { features } => {
                features.iter().for_each(|f| f.collect_outlines(out))
            }
            GeoJson::Feature { geometry } => {
                if let Some(geometry) = geometry {
                    geometry.collect_outlines(out);
                }
            }
            GeoJson::GeometryCollection { geometries } => {
                geometries.iter().for_each(|g| g.collect_outlines(out))
            }
            GeoJson::Point { .. } | GeoJson::MultiPoint { .. } => {}
            GeoJson::LineString { coordinates } => push_path(coordinates, out),
            GeoJson::MultiLineString { coordinates } | GeoJson::Polygon { coordinates } => {
                coordinates.iter().for_each(|path| push_path(path, out))
            }
            GeoJson::MultiPolygon { coordinates } => coordinates
                .iter()
                .flatten()
                .for_each(|ring| push_path(ring, out)),
        }
    }
}

fn push_path(positions: &[Position], out: &mut Vec<Vec<(f64, f64)>>) {
    let path: Vec<(f64, f64)> = positions
        .iter()
        .filter(|p| p.len() >= 2 && p[0].is_finite() && p[1].is_finite())
        .map(|p| (p[0], p[1]))
        .collect();
    if path.len() >= 2 {
        out.push(path);
    }
}

/// Outlines drawn underneath the snowline, in (lon, lat).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Basemap {
    outlines: Vec<Vec<(f64, f64)>>,
}

impl Basemap {
    /// Parse a GeoJSON document (feature collection, feature or bare geometry).
    pub fn from_geojson(text: &str) -> Result<Self> {
        let document: GeoJson =
            serde_json::from_str(text).map_err(|e| RenderError::Basemap(e.to_string()))?;
        let mut outlines = Vec::new();
        document.collect_outlines(&mut outlines);
        Ok(Self { outlines })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let basemap = Self::from_geojson(&text)?;
        debug!(
            path = %path.display(),
            outlines = basemap.outlines.len(),
            "Loaded basemap"
        );
        Ok(basemap)
    }

    pub fn outlines(&self) -> &[Vec<(f64, f64)>] {
        &self.outlines
    }

    pub fn is_empty(&self) -> bool {
        self.outlines.is_empty()
    }
}
