//! Scattered-point interpolation onto a regular grid.
//!
//! `Linear` and `Cubic` are defined over the Delaunay triangulation of the
//! input points. Cells outside its convex hull, and every cell when the
//! points are collinear, receive [`FILL_VALUE`]. `Nearest` is defined
//! everywhere.

use tracing::debug;

use crate::error::{GridProcessorError, Result};
use crate::grid::Grid;
use crate::triangulation::{barycentric, delaunay, Triangulation};
use crate::types::{GridValues, InterpolationMethod};

/// Value assigned to cells the interpolant does not cover.
pub const FILL_VALUE: f64 = 0.0;

/// Barycentric weights down to this value still count as inside a triangle,
/// so cells on shared edges and hull vertices are covered.
const EDGE_TOLERANCE: f64 = -1e-9;

/// Interpolate `values` observed at `points` (lon, lat) onto every cell of `grid`.
pub fn interpolate(
    grid: &Grid,
    points: &[(f64, f64)],
    values: &[f64],
    method: InterpolationMethod,
) -> Result<GridValues> {
    if points.len() != values.len() {
        return Err(GridProcessorError::shape_mismatch(points.len(), values.len()));
    }
    if points.is_empty() {
        return Err(GridProcessorError::interpolation(
            "cannot interpolate from zero points",
        ));
    }

    debug!(
        method = %method,
        points = points.len(),
        cells = grid.width() * grid.height(),
        "Interpolating onto grid"
    );

    let out = match method {
        InterpolationMethod::Nearest => nearest(grid, points, values),
        InterpolationMethod::Linear => {
            let tri = delaunay(points);
            if tri.is_empty() {
                debug!("Degenerate point set, using fill value everywhere");
            }
            rasterize(grid, &tri, |t, weights| linear_patch(t, values, weights))
        }
        InterpolationMethod::Cubic => {
            let tri = delaunay(points);
            if tri.is_empty() {
                debug!("Degenerate point set, using fill value everywhere");
            }
            let gradients = estimate_gradients(&tri, values);
            rasterize(grid, &tri, |t, weights| {
                cubic_patch(&tri, t, values, &gradients, weights)
            })
        }
    };

    Ok(out)
}

fn nearest(grid: &Grid, points: &[(f64, f64)], values: &[f64]) -> GridValues {
    let mut out = grid.values_filled(FILL_VALUE);
    let candidates: Vec<usize> = (0..points.len())
        .filter(|&i| points[i].0.is_finite() && points[i].1.is_finite())
        .collect();
    if candidates.is_empty() {
        return out;
    }

    for (row, &lat) in grid.lats().iter().enumerate() {
        for (col, &lon) in grid.lons().iter().enumerate() {
            let mut best = candidates[0];
            let mut best_d2 = f64::INFINITY;
            for &i in &candidates {
                let (x, y) = points[i];
                let d2 = (x - lon).powi(2) + (y - lat).powi(2);
                if d2 < best_d2 {
                    best_d2 = d2;
                    best = i;
                }
            }
            out.set(row, col, values[best]);
        }
    }
    out
}

/// Evaluate `eval` at every grid cell covered by a triangle of `tri`.
/// The first triangle to claim a cell wins.
fn rasterize<F>(grid: &Grid, tri: &Triangulation, eval: F) -> GridValues
where
    F: Fn(&[usize; 3], (f64, f64, f64)) -> f64,
{
    let mut out = grid.values_filled(FILL_VALUE);
    let mut filled = vec![false; out.len()];
    let lons = grid.lons();
    let lats = grid.lats();
    let slack = grid.resolution() * 1e-9;

    for t in &tri.triangles {
        let [a, b, c] = tri.corners(t);
        let min_x = a.0.min(b.0).min(c.0) - slack;
        let max_x = a.0.max(b.0).max(c.0) + slack;
        let min_y = a.1.min(b.1).min(c.1) - slack;
        let max_y = a.1.max(b.1).max(c.1) + slack;

        let c0 = lons.partition_point(|&x| x < min_x);
        let c1 = lons.partition_point(|&x| x <= max_x);
        let r0 = lats.partition_point(|&y| y < min_y);
        let r1 = lats.partition_point(|&y| y <= max_y);

        for row in r0..r1 {
            for col in c0..c1 {
                let idx = row * out.width + col;
                if filled[idx] {
                    continue;
                }
                let Some(weights) = barycentric((lons[col], lats[row]), a, b, c) else {
                    continue;
                };
                let (l1, l2, l3) = weights;
                if l1 >= EDGE_TOLERANCE && l2 >= EDGE_TOLERANCE && l3 >= EDGE_TOLERANCE {
                    out.data[idx] = eval(t, weights);
                    filled[idx] = true;
                }
            }
        }
    }

    out
}

/// Planar interpolation inside one triangle.
///
/// Written relative to the first vertex so equal vertex values come back
/// exactly, and clamped to the vertex range, which a convex combination
/// never leaves but rounding can.
fn linear_patch(t: &[usize; 3], values: &[f64], (_, l2, l3): (f64, f64, f64)) -> f64 {
    let (v0, v1, v2) = (values[t[0]], values[t[1]], values[t[2]]);
    let lo = v0.min(v1).min(v2);
    let hi = v0.max(v1).max(v2);
    (v0 + l2 * (v1 - v0) + l3 * (v2 - v0)).clamp(lo, hi)
}

/// Per-vertex gradient by inverse-distance-squared weighted least squares
/// over the vertex's triangulation neighbours. Vertices whose neighbours do
/// not span the plane get a zero gradient.
fn estimate_gradients(tri: &Triangulation, values: &[f64]) -> Vec<(f64, f64)> {
    let neighbors = tri.neighbors();
    let mut gradients = vec![(0.0, 0.0); tri.points.len()];

    for (i, adjacent) in neighbors.iter().enumerate() {
        if adjacent.len() < 2 {
            continue;
        }
        let (px, py) = tri.points[i];
        let (mut sxx, mut sxy, mut syy, mut bx, mut by) = (0.0, 0.0, 0.0, 0.0, 0.0);
        for &j in adjacent {
            let dx = tri.points[j].0 - px;
            let dy = tri.points[j].1 - py;
            let d2 = dx * dx + dy * dy;
            if d2 == 0.0 {
                continue;
            }
            let w = 1.0 / d2;
            let df = values[j] - values[i];
            sxx += w * dx * dx;
            sxy += w * dx * dy;
            syy += w * dy * dy;
            bx += w * dx * df;
            by += w * dy * df;
        }
        let det = sxx * syy - sxy * sxy;
        if det.abs() <= 1e-12 * (sxx * syy).abs().max(f64::MIN_POSITIVE) {
            continue;
        }
        gradients[i] = ((syy * bx - sxy * by) / det, (sxx * by - sxy * bx) / det);
    }

    gradients
}

/// Cubic Bézier triangle through the vertex values whose edge control
/// points follow the vertex gradients. Reproduces quadratics exactly when
/// the gradients are exact.
fn cubic_patch(
    tri: &Triangulation,
    t: &[usize; 3],
    values: &[f64],
    gradients: &[(f64, f64)],
    (u, v, w): (f64, f64, f64),
) -> f64 {
    let [p1, p2, p3] = tri.corners(t);
    let (f1, f2, f3) = (values[t[0]], values[t[1]], values[t[2]]);
    let (g1, g2, g3) = (gradients[t[0]], gradients[t[1]], gradients[t[2]]);

    let toward = |f: f64, g: (f64, f64), from: (f64, f64), to: (f64, f64)| {
        f + (g.0 * (to.0 - from.0) + g.1 * (to.1 - from.1)) / 3.0
    };
    let b210 = toward(f1, g1, p1, p2);
    let b201 = toward(f1, g1, p1, p3);
    let b120 = toward(f2, g2, p2, p1);
    let b021 = toward(f2, g2, p2, p3);
    let b102 = toward(f3, g3, p3, p1);
    let b012 = toward(f3, g3, p3, p2);

    let e = (b210 + b201 + b120 + b021 + b102 + b012) / 6.0;
    let vertex_mean = (f1 + f2 + f3) / 3.0;
    let b111 = e + (e - vertex_mean) / 2.0;

    f1 * u * u * u
        + f2 * v * v * v
        + f3 * w * w * w
        + 3.0 * b210 * u * u * v
        + 3.0 * b120 * u * v * v
        + 3.0 * b201 * u * u * w
        + 3.0 * b102 * u * w * w
        + 3.0 * b021 * v * v * w
        + 3.0 * b012 * v * w * w
        + 6.0 * b111 * u * v * w
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::build_grid;
    use snowline_common::BoundingBox;

    fn unit_grid(resolution: f64) -> Grid {
        build_grid(&BoundingBox::new(0.0, 1.0, 0.0, 1.0), resolution).unwrap()
    }

    fn corners() -> Vec<(f64, f64)> {
        vec![(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (1.0, 1.0)]
    }

    #[test]
    fn test_length_mismatch_is_error() {
        let grid = unit_grid(0.25);
        let result = interpolate(&grid, &corners(), &[1.0, 0.0], InterpolationMethod::Linear);
        assert!(matches!(
            result,
            Err(GridProcessorError::ShapeMismatch { expected: 4, actual: 2 })
        ));
    }

    #[test]
    fn test_empty_points_is_error() {
        let grid = unit_grid(0.25);
        assert!(interpolate(&grid, &[], &[], InterpolationMethod::Nearest).is_err());
    }

    #[test]
    fn test_linear_reproduces_plane() {
        let grid = unit_grid(0.1);
        let points = corners();
        let values: Vec<f64> = points.iter().map(|(x, y)| 0.5 * x + 0.25 * y).collect();
        let out = interpolate(&grid, &points, &values, InterpolationMethod::Linear).unwrap();

        for (row, &lat) in grid.lats().iter().enumerate() {
            for (col, &lon) in grid.lons().iter().enumerate() {
                let expected = 0.5 * lon + 0.25 * lat;
                let got = out.get(row, col).unwrap();
                assert!((got - expected).abs() < 1e-9, "({row},{col}): {got} vs {expected}");
            }
        }
    }

    #[test]
    fn test_linear_uniform_values_are_exact() {
        let grid = unit_grid(0.05);
        let points = vec![(0.03, 0.07), (0.97, 0.11), (0.41, 0.93), (0.77, 0.68), (0.12, 0.55)];
        let out = interpolate(&grid, &points, &[1.0; 5], InterpolationMethod::Linear).unwrap();
        assert!(out.data.iter().all(|&v| v == 1.0 || v == FILL_VALUE));
        assert!(out.data.iter().any(|&v| v == 1.0));
    }

    #[test]
    fn test_linear_covers_near_flat_hull_edge() {
        let grid = unit_grid(0.1);
        let points = vec![(0.0, 0.0), (1.0, 0.0), (0.5, 1e-4), (0.5, 1.0)];
        let out = interpolate(&grid, &points, &[1.0; 4], InterpolationMethod::Linear).unwrap();
        for col in 0..10 {
            assert_eq!(out.get(0, col), Some(1.0), "bottom row, col {col}");
        }
    }

    #[test]
    fn test_linear_fills_outside_hull() {
        let grid = unit_grid(0.1);
        let points = vec![(0.2, 0.2), (0.6, 0.2), (0.2, 0.6)];
        let out = interpolate(&grid, &points, &[1.0, 1.0, 1.0], InterpolationMethod::Linear)
            .unwrap();
        // Far corner lies outside the triangle.
        assert_eq!(out.get(9, 9), Some(FILL_VALUE));
        // A hull vertex is covered.
        assert!((out.get(2, 2).unwrap() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_collinear_points_fill_everything() {
        let grid = unit_grid(0.25);
        let points = vec![(0.0, 0.0), (0.5, 0.5), (1.0, 1.0)];
        for method in [InterpolationMethod::Linear, InterpolationMethod::Cubic] {
            let out = interpolate(&grid, &points, &[1.0, 1.0, 1.0], method).unwrap();
            assert!(out.data.iter().all(|&v| v == FILL_VALUE));
        }
    }

    #[test]
    fn test_nearest_covers_everything() {
        let grid = unit_grid(0.25);
        let points = vec![(0.0, 0.0), (1.0, 1.0)];
        let out = interpolate(&grid, &points, &[0.0, 1.0], InterpolationMethod::Nearest).unwrap();
        assert_eq!(out.get(0, 0), Some(0.0));
        assert_eq!(out.get(3, 3), Some(1.0));
        assert!(out.data.iter().all(|&v| v == 0.0 || v == 1.0));
    }

    #[test]
    fn test_nearest_ties_go_to_first_point() {
        let grid = unit_grid(0.5);
        let points = vec![(0.0, 0.0), (1.0, 0.0)];
        let out = interpolate(&grid, &points, &[3.0, 7.0], InterpolationMethod::Nearest).unwrap();
        // (0.5, 0.0) is equidistant.
        assert_eq!(out.get(0, 1), Some(3.0));
    }

    #[test]
    fn test_cubic_reproduces_plane() {
        let grid = unit_grid(0.1);
        let mut points = Vec::new();
        for i in 0..4 {
            for j in 0..4 {
                points.push((i as f64 / 3.0, j as f64 / 3.0));
            }
        }
        let values: Vec<f64> = points.iter().map(|(x, y)| 2.0 * x - y + 0.3).collect();
        let out = interpolate(&grid, &points, &values, InterpolationMethod::Cubic).unwrap();

        for (row, &lat) in grid.lats().iter().enumerate() {
            for (col, &lon) in grid.lons().iter().enumerate() {
                let expected = 2.0 * lon - lat + 0.3;
                let got = out.get(row, col).unwrap();
                assert!((got - expected).abs() < 1e-6, "({row},{col}): {got} vs {expected}");
            }
        }
    }

    #[test]
    fn test_cubic_matches_vertex_values() {
        let grid = unit_grid(0.5);
        let points = vec![(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (1.0, 1.0), (0.5, 0.5)];
        let values = vec![0.0, 1.0, 0.0, 1.0, 1.0];
        let out = interpolate(&grid, &points, &values, InterpolationMethod::Cubic).unwrap();
        // Grid cells (0, 0) and (1, 1) sit on input points.
        assert!((out.get(0, 0).unwrap() - 0.0).abs() < 1e-9);
        assert!((out.get(1, 1).unwrap() - 1.0).abs() < 1e-9);
    }
}
