//! Iso-line extraction using the marching squares algorithm.
//!
//! Lines are returned in fractional (row, col) grid-index coordinates.
//! Adjacent cells compute the crossing on a shared edge from the same two
//! corner values, so segments are joined by edge identity rather than by
//! comparing coordinates.

use std::collections::{HashMap, VecDeque};

use crate::types::GridValues;

/// A polyline in fractional (row, col) coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct ContourLine {
    pub points: Vec<(f64, f64)>,
    /// First and last points coincide.
    pub closed: bool,
}

impl ContourLine {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// A cell edge: the horizontal edge from (row, col) to (row, col + 1) or
/// the vertical edge from (row, col) to (row + 1, col).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct EdgeKey {
    row: usize,
    col: usize,
    vertical: bool,
}

impl EdgeKey {
    fn horizontal(row: usize, col: usize) -> Self {
        Self { row, col, vertical: false }
    }

    fn vertical(row: usize, col: usize) -> Self {
        Self { row, col, vertical: true }
    }
}

#[derive(Debug, Clone, Copy)]
struct Segment {
    start: EdgeKey,
    end: EdgeKey,
}

/// Extract every iso-line of `values` at `level`.
///
/// Corners compare with `>=`. Cells touching a NaN are skipped. Lines are
/// emitted in order of their first segment in a row-major cell scan.
pub fn extract_contours(values: &GridValues, level: f64) -> Vec<ContourLine> {
    let (segments, crossings) = march_squares(values, level);
    let lines = connect_segments(&segments, &crossings);
    tracing::trace!(
        level,
        segments = segments.len(),
        lines = lines.len(),
        "Contouring complete"
    );
    lines
}

fn march_squares(values: &GridValues, level: f64) -> (Vec<Segment>, HashMap<EdgeKey, (f64, f64)>) {
    let (height, width) = values.shape();
    let mut segments = Vec::new();
    let mut crossings = HashMap::new();
    if width < 2 || height < 2 {
        return (segments, crossings);
    }

    let at = |r: usize, c: usize| values.data[r * width + c];

    for row in 0..(height - 1) {
        for col in 0..(width - 1) {
            let tl = at(row, col);
            let tr = at(row, col + 1);
            let bl = at(row + 1, col);
            let br = at(row + 1, col + 1);

            if tl.is_nan() || tr.is_nan() || bl.is_nan() || br.is_nan() {
                continue;
            }

            let mut cell_index = 0u8;
            if tl >= level { cell_index |= 1; }
            if tr >= level { cell_index |= 2; }
            if br >= level { cell_index |= 4; }
            if bl >= level { cell_index |= 8; }

            let top = EdgeKey::horizontal(row, col);
            let bottom = EdgeKey::horizontal(row + 1, col);
            let left = EdgeKey::vertical(row, col);
            let right = EdgeKey::vertical(row, col + 1);

            let pairs: &[(EdgeKey, EdgeKey)] = match cell_index {
                0 | 15 => &[],
                1 | 14 => &[(left, top)],
                2 | 13 => &[(top, right)],
                3 | 12 => &[(left, right)],
                4 | 11 => &[(right, bottom)],
                // Saddles: two separate segments.
                5 => &[(left, top), (right, bottom)],
                10 => &[(top, right), (left, bottom)],
                6 | 9 => &[(top, bottom)],
                7 | 8 => &[(left, bottom)],
                _ => &[],
            };

            for &(start, end) in pairs {
                for key in [start, end] {
                    crossings.entry(key).or_insert_with(|| {
                        let (r1, c1) = (key.row as f64, key.col as f64);
                        let v1 = at(key.row, key.col);
                        if key.vertical {
                            let v2 = at(key.row + 1, key.col);
                            (r1 + crossing_fraction(v1, v2, level), c1)
                        } else {
                            let v2 = at(key.row, key.col + 1);
                            (r1, c1 + crossing_fraction(v1, v2, level))
                        }
                    });
                }
                segments.push(Segment { start, end });
            }
        }
    }

    (segments, crossings)
}

/// Fraction along an edge where the level is crossed.
fn crossing_fraction(v1: f64, v2: f64, level: f64) -> f64 {
    if v2 == v1 {
        return 0.5;
    }
    ((level - v1) / (v2 - v1)).clamp(0.0, 1.0)
}

/// Join segments sharing an edge into maximal polylines.
fn connect_segments(
    segments: &[Segment],
    crossings: &HashMap<EdgeKey, (f64, f64)>,
) -> Vec<ContourLine> {
    let mut incident: HashMap<EdgeKey, Vec<usize>> = HashMap::new();
    for (i, seg) in segments.iter().enumerate() {
        incident.entry(seg.start).or_default().push(i);
        incident.entry(seg.end).or_default().push(i);
    }

    let mut used = vec![false; segments.len()];
    let mut lines = Vec::new();

    // Take an unused segment at `from`, returning the edge at its far end.
    let step = |from: EdgeKey, used: &mut Vec<bool>| -> Option<EdgeKey> {
        let next = incident.get(&from)?.iter().copied().find(|&i| !used[i])?;
        used[next] = true;
        let seg = segments[next];
        Some(if seg.start == from { seg.end } else { seg.start })
    };

    for i in 0..segments.len() {
        if used[i] {
            continue;
        }
        used[i] = true;

        let mut chain = VecDeque::from([segments[i].start, segments[i].end]);
        while let Some(&tail) = chain.back() {
            match step(tail, &mut used) {
                Some(next) => chain.push_back(next),
                None => break,
            }
        }
        while let Some(&head) = chain.front() {
            match step(head, &mut used) {
                Some(prev) => chain.push_front(prev),
                None => break,
            }
        }

        let closed = chain.len() > 2 && chain.front() == chain.back();
        let points: Vec<(f64, f64)> = chain
            .iter()
            .filter_map(|key| crossings.get(key).copied())
            .collect();

        if points.len() >= 2 {
            lines.push(ContourLine { points, closed });
        }
    }

    lines
}
