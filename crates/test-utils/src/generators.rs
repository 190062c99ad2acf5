//! Test data generators for creating synthetic snow observations.
//!
//! These generators create predictable, verifiable observation layouts
//! that can be used across the test suite.

use chrono::{Duration, NaiveDate};
use snowline_common::{BoundingBox, Observation};

/// Creates a `rows` x `cols` lattice of observations spanning `bbox`
/// corner to corner.
///
/// A site reports snow when its latitude is at or above `snow_from_lat`,
/// so the true snowline runs east-west just below that latitude.
/// Site ids are `R{row}C{col}`, with row 0 the southernmost.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use snowline_common::BoundingBox;
/// use test_utils::lattice_observations;
///
/// let date = NaiveDate::from_ymd_opt(2005, 1, 15).unwrap();
/// let bbox = BoundingBox::new(-5.0, -3.0, 56.0, 58.0);
/// let obs = lattice_observations(date, &bbox, 5, 5, 56.5);
/// assert_eq!(obs.len(), 25);
/// assert_eq!(obs.iter().filter(|o| !o.snow_present).count(), 5);
/// ```
pub fn lattice_observations(
    date: NaiveDate,
    bbox: &BoundingBox,
    rows: usize,
    cols: usize,
    snow_from_lat: f64,
) -> Vec<Observation> {
    let mut out = Vec::with_capacity(rows * cols);
    for row in 0..rows {
        let lat = lerp(bbox.min_lat, bbox.max_lat, row, rows);
        for col in 0..cols {
            let lon = lerp(bbox.min_lon, bbox.max_lon, col, cols);
            out.push(Observation::new(
                date,
                format!("R{row}C{col}"),
                lat,
                lon,
                lat >= snow_from_lat,
            ));
        }
    }
    out
}

/// Creates `count` observations inside `bbox` that all share one snow state.
pub fn uniform_observations(
    date: NaiveDate,
    bbox: &BoundingBox,
    count: usize,
    snow_present: bool,
) -> Vec<Observation> {
    scattered_positions(bbox, count, 7)
        .into_iter()
        .enumerate()
        .map(|(i, (lon, lat))| Observation::new(date, format!("U{i:03}"), lat, lon, snow_present))
        .collect()
}

/// Creates one observation per entry of `states`, spread along the
/// south-west to north-east diagonal of `bbox`.
pub fn sparse_observations(date: NaiveDate, bbox: &BoundingBox, states: &[bool]) -> Vec<Observation> {
    let n = states.len();
    states
        .iter()
        .enumerate()
        .map(|(i, &snow)| {
            let t = (i as f64 + 1.0) / (n as f64 + 1.0);
            let lon = bbox.min_lon + t * bbox.width();
            let lat = bbox.min_lat + t * bbox.height();
            Observation::new(date, format!("S{i:03}"), lat, lon, snow)
        })
        .collect()
}

/// Creates `count` pseudo-randomly placed observations inside `bbox`
/// (deterministic for a given `seed`) with snow at or above `snow_from_lat`.
pub fn scattered_observations(
    date: NaiveDate,
    bbox: &BoundingBox,
    count: usize,
    snow_from_lat: f64,
    seed: u32,
) -> Vec<Observation> {
    scattered_positions(bbox, count, seed)
        .into_iter()
        .enumerate()
        .map(|(i, (lon, lat))| {
            Observation::new(date, format!("X{i:04}"), lat, lon, lat >= snow_from_lat)
        })
        .collect()
}

/// Creates a lattice for each of `days` consecutive dates starting at
/// `start`, with the snow edge moving north by `drift` degrees per day.
pub fn multi_day_observations(
    start: NaiveDate,
    days: usize,
    bbox: &BoundingBox,
    snow_from_lat: f64,
    drift: f64,
) -> Vec<Observation> {
    (0..days)
        .flat_map(|d| {
            let date = start + Duration::days(d as i64);
            lattice_observations(date, bbox, 6, 6, snow_from_lat + drift * d as f64)
        })
        .collect()
}

/// Creates a row-major field that is 0.0 in the southern half of the rows
/// and 1.0 in the northern half.
pub fn step_field(width: usize, height: usize) -> Vec<f64> {
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        let value = if row < height / 2 { 0.0 } else { 1.0 };
        data.extend(std::iter::repeat(value).take(width));
    }
    data
}

fn lerp(min: f64, max: f64, i: usize, n: usize) -> f64 {
    if n <= 1 {
        return (min + max) / 2.0;
    }
    min + (max - min) * i as f64 / (n - 1) as f64
}

fn scattered_positions(bbox: &BoundingBox, count: usize, seed: u32) -> Vec<(f64, f64)> {
    (0..count as u32)
        .map(|i| {
            let hx = simple_hash(i, 0, seed);
            let hy = simple_hash(i, 1, seed);
            let fx = (hx % 10_000) as f64 / 10_000.0;
            let fy = (hy % 10_000) as f64 / 10_000.0;
            (bbox.min_lon + fx * bbox.width(), bbox.min_lat + fy * bbox.height())
        })
        .collect()
}

/// Simple deterministic hash for reproducible test data.
fn simple_hash(x: u32, y: u32, seed: u32) -> u32 {
    let mut h = seed;
    h = h.wrapping_mul(31).wrapping_add(x);
    h = h.wrapping_mul(31).wrapping_add(y);
    h ^= h >> 16;
    h = h.wrapping_mul(0x85ebca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2ae35);
    h ^= h >> 16;
    h
}
