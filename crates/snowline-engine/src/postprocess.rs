//! Optional clean-up of finished snowline geometries.
//!
//! Each transform returns a new result with the same date, CRS, count and
//! reason. Results without a geometry pass through unchanged.

use std::collections::HashMap;

use geo::{Buffer, Coord, LineString, MultiLineString, Simplify};
use snowline_common::{SnowlineGeometry, SnowlineResult};
use tracing::debug;

/// Default Douglas-Peucker tolerance, in degrees.
pub const DEFAULT_SIMPLIFY_TOLERANCE: f64 = 0.001;

/// Default buffer distance for morphological smoothing, in degrees.
pub const DEFAULT_SMOOTH_BUFFER: f64 = 0.005;

/// Reduce vertex count with Douglas-Peucker at `tolerance`.
pub fn simplify_snowline(result: &SnowlineResult, tolerance: f64) -> SnowlineResult {
    let Some(geometry) = &result.geometry else {
        return result.clone();
    };
    let simplified = match geometry {
        SnowlineGeometry::Line(line) => SnowlineGeometry::Line(line.simplify(tolerance)),
        SnowlineGeometry::MultiLine(multi) => SnowlineGeometry::MultiLine(multi.simplify(tolerance)),
    };
    debug!(
        date = %result.date,
        before = geometry.vertex_count(),
        after = simplified.vertex_count(),
        "Simplified snowline"
    );
    result.with_geometry(Some(simplified))
}

/// Buffer out by `buffer_distance`, back in by the same amount, and keep
/// the boundary rings of what remains.
///
/// A line thinner than the buffer can erode away completely; the input
/// geometry is kept in that case.
pub fn smooth_snowline(result: &SnowlineResult, buffer_distance: f64) -> SnowlineResult {
    let Some(geometry) = &result.geometry else {
        return result.clone();
    };
    if !(buffer_distance > 0.0) || !buffer_distance.is_finite() {
        return result.clone();
    }

    let expanded = geometry.to_multi_line().buffer(buffer_distance);
    let contracted = expanded.buffer(-buffer_distance);

    let rings: Vec<LineString<f64>> = contracted
        .0
        .iter()
        .flat_map(|polygon| std::iter::once(polygon.exterior()).chain(polygon.interiors()))
        .filter(|ring| ring.0.len() >= 2)
        .cloned()
        .collect();

    match SnowlineGeometry::from_lines(rings) {
        Some(smoothed) => {
            debug!(
                date = %result.date,
                rings = smoothed.line_count(),
                "Smoothed snowline"
            );
            result.with_geometry(Some(smoothed))
        }
        None => {
            debug!(date = %result.date, buffer_distance, "Smoothing eroded the snowline, keeping input");
            result.clone()
        }
    }
}

/// Join lines that meet end-to-end where exactly two line ends touch.
/// A single line passes through unchanged.
pub fn merge_line_segments(result: &SnowlineResult) -> SnowlineResult {
    match &result.geometry {
        Some(SnowlineGeometry::MultiLine(multi)) => {
            let merged = merge_lines(multi);
            debug!(
                date = %result.date,
                before = multi.0.len(),
                after = merged.len(),
                "Merged snowline segments"
            );
            result.with_geometry(SnowlineGeometry::from_lines(merged))
        }
        _ => result.clone(),
    }
}

type NodeKey = (u64, u64);

fn node_key(c: &Coord<f64>) -> NodeKey {
    // Normalise -0.0 so it shares a node with 0.0.
    ((c.x + 0.0).to_bits(), (c.y + 0.0).to_bits())
}

/// Line ends touching each node, as (line index, is_start).
fn endpoint_index(lines: &[LineString<f64>]) -> HashMap<NodeKey, Vec<(usize, bool)>> {
    let mut nodes: HashMap<NodeKey, Vec<(usize, bool)>> = HashMap::new();
    for (i, line) in lines.iter().enumerate() {
        if let (Some(first), Some(last)) = (line.0.first(), line.0.last()) {
            nodes.entry(node_key(first)).or_default().push((i, true));
            nodes.entry(node_key(last)).or_default().push((i, false));
        }
    }
    nodes
}

fn merge_lines(multi: &MultiLineString<f64>) -> Vec<LineString<f64>> {
    let lines: Vec<LineString<f64>> = multi.0.iter().filter(|l| l.0.len() >= 2).cloned().collect();
    let nodes = endpoint_index(&lines);
    let mut used = vec![false; lines.len()];
    let mut merged = Vec::new();

    // The other unused line end at a degree-two node.
    let partner = |coord: &Coord<f64>, used: &[bool]| -> Option<(usize, bool)> {
        let ends = nodes.get(&node_key(coord))?;
        if ends.len() != 2 {
            return None;
        }
        ends.iter().copied().find(|&(j, _)| !used[j])
    };

    for i in 0..lines.len() {
        if used[i] {
            continue;
        }
        used[i] = true;
        let mut coords = lines[i].0.clone();

        // Grow forward from the tail.
        while let Some((j, at_start)) = coords.last().and_then(|c| partner(c, &used[..])) {
            used[j] = true;
            let next = &lines[j].0;
            if at_start {
                coords.extend(next.iter().skip(1));
            } else {
                coords.extend(next.iter().rev().skip(1));
            }
        }

        // Grow backward from the head.
        while let Some((j, at_start)) = coords.first().and_then(|c| partner(c, &used[..])) {
            used[j] = true;
            let prev = &lines[j].0;
            let mut prefix: Vec<Coord<f64>> = if at_start {
                prev.iter().rev().copied().collect()
            } else {
                prev.clone()
            };
            prefix.pop();
            prefix.extend(coords);
            coords = prefix;
        }

        merged.push(LineString::new(coords));
    }

    merged
}
