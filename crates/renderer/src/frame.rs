//! Page layout and the equirectangular lon/lat to pixel transform.

use snowline_common::BoundingBox;

/// Fixed page width in pixels.
pub const MAP_WIDTH_PX: f64 = 1200.0;

const MARGIN_LEFT: f64 = 80.0;
const MARGIN_RIGHT: f64 = 30.0;
const MARGIN_TOP: f64 = 60.0;
const MARGIN_BOTTOM: f64 = 50.0;

/// Graticule steps tried in order, in degrees.
const NICE_STEPS: [f64; 14] = [
    0.01, 0.02, 0.05, 0.1, 0.2, 0.25, 0.5, 1.0, 2.0, 5.0, 10.0, 15.0, 30.0, 45.0,
];

/// Most graticule lines drawn along one axis.
const MAX_GRATICULE_LINES: f64 = 8.0;

/// Where the map panel sits on the page and how degrees map to pixels.
///
/// One degree of longitude and one of latitude get the same pixel length,
/// so the panel's aspect ratio follows the bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapFrame {
    pub bbox: BoundingBox,
    pub page_width: f64,
    pub page_height: f64,
    /// Panel origin (top-left) and size in pixels.
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl MapFrame {
    pub fn new(bbox: BoundingBox) -> Self {
        let width = MAP_WIDTH_PX - MARGIN_LEFT - MARGIN_RIGHT;
        let height = width * bbox.height() / bbox.width();
        Self {
            bbox,
            page_width: MAP_WIDTH_PX,
            page_height: height + MARGIN_TOP + MARGIN_BOTTOM,
            left: MARGIN_LEFT,
            top: MARGIN_TOP,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Pixel position of a (lon, lat) point; north is up.
    pub fn project(&self, lon: f64, lat: f64) -> (f64, f64) {
        let x = self.left + (lon - self.bbox.min_lon) / self.bbox.width() * self.width;
        let y = self.top + (self.bbox.max_lat - lat) / self.bbox.height() * self.height;
        (x, y)
    }

    /// Meridians to draw, in ascending order.
    pub fn meridians(&self) -> Vec<f64> {
        graticule_values(self.bbox.min_lon, self.bbox.max_lon)
    }

    /// Parallels to draw, in ascending order.
    pub fn parallels(&self) -> Vec<f64> {
        graticule_values(self.bbox.min_lat, self.bbox.max_lat)
    }
}

/// Smallest step from [`NICE_STEPS`] giving at most a handful of lines over `span`.
pub fn nice_step(span: f64) -> f64 {
    NICE_STEPS
        .iter()
        .copied()
        .find(|step| span / step <= MAX_GRATICULE_LINES)
        .unwrap_or(90.0)
}

/// Multiples of the nice step inside `[min, max]`.
fn graticule_values(min: f64, max: f64) -> Vec<f64> {
    let step = nice_step(max - min);
    let first = (min / step).ceil() as i64;
    let last = (max / step).floor() as i64;
    (first..=last)
        .map(|k| round_label(k as f64 * step))
        .collect()
}

/// Trim floating noise from a graticule value (e.g. 0.30000000000000004).
fn round_label(v: f64) -> f64 {
    (v * 1e6).round() / 1e6
}

/// Cartographic label: "4.5°W", "57°N", "0°".
pub fn format_degrees(value: f64, positive: char, negative: char) -> String {
    let v = round_label(value);
    if v == 0.0 {
        return "0°".to_string();
    }
    let hemisphere = if v > 0.0 { positive } else { negative };
    format!("{}°{}", v.abs(), hemisphere)
}
