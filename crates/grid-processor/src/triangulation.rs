//! Delaunay triangulation of scattered points (Bowyer-Watson).
//!
//! Linear and cubic interpolation are defined piecewise over these
//! triangles; their union is the convex hull of the input, outside of
//! which interpolated cells take the fill value.

use std::collections::{HashMap, HashSet};

/// Relative tolerance for the in-circumcircle test.
const CIRCLE_EPS: f64 = 1e-12;

/// Triangles whose doubled area falls below this (relative to the squared
/// point-set extent) are treated as degenerate.
const AREA_EPS: f64 = 1e-14;

/// A triangulation over an input point slice.
///
/// Triangle vertices index into `points` and are ordered counter-clockwise.
/// Duplicate and non-finite input points never appear in a triangle.
#[derive(Debug, Clone, Default)]
pub struct Triangulation {
    pub points: Vec<(f64, f64)>,
    pub triangles: Vec<[usize; 3]>,
}

#[derive(Debug, Clone, Copy)]
struct Circumcircle {
    cx: f64,
    cy: f64,
    r2: f64,
}

#[derive(Debug, Clone, Copy)]
struct WorkTriangle {
    v: [usize; 3],
    circle: Circumcircle,
}

impl Triangulation {
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Vertex coordinates of a triangle.
    pub fn corners(&self, tri: &[usize; 3]) -> [(f64, f64); 3] {
        [
            self.points[tri[0]],
            self.points[tri[1]],
            self.points[tri[2]],
        ]
    }

    /// For every input point, the points it shares a triangle edge with.
    pub fn neighbors(&self) -> Vec<Vec<usize>> {
        let mut sets: Vec<HashSet<usize>> = vec![HashSet::new(); self.points.len()];
        for tri in &self.triangles {
            for k in 0..3 {
                let a = tri[k];
                let b = tri[(k + 1) % 3];
                sets[a].insert(b);
                sets[b].insert(a);
            }
        }
        sets.into_iter()
            .map(|set| {
                let mut v: Vec<usize> = set.into_iter().collect();
                v.sort_unstable();
                v
            })
            .collect()
    }
}

/// Triangulate `points`. Fewer than three distinct points, or a collinear
/// set, yields an empty triangulation.
pub fn delaunay(points: &[(f64, f64)]) -> Triangulation {
    let mut result = Triangulation {
        points: points.to_vec(),
        triangles: Vec::new(),
    };

    let mut seen = HashSet::new();
    let unique: Vec<usize> = (0..points.len())
        .filter(|&i| {
            let (x, y) = points[i];
            x.is_finite() && y.is_finite() && seen.insert((x.to_bits(), y.to_bits()))
        })
        .collect();
    if unique.len() < 3 {
        return result;
    }

    let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
    let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
    for &i in &unique {
        let (x, y) = points[i];
        min_x = min_x.min(x);
        min_y = min_y.min(y);
        max_x = max_x.max(x);
        max_y = max_y.max(y);
    }
    let extent = (max_x - min_x).max(max_y - min_y);
    if !(extent > 0.0) {
        return result;
    }
    let mid_x = (min_x + max_x) / 2.0;
    let mid_y = (min_y + max_y) / 2.0;

    // Working vertex list: input points followed by the three super-triangle corners.
    let n = points.len();
    let mut verts = points.to_vec();
    verts.push((mid_x - 20.0 * extent, mid_y - extent));
    verts.push((mid_x + 20.0 * extent, mid_y - extent));
    verts.push((mid_x, mid_y + 20.0 * extent));

    let mut triangles = vec![make_triangle(&verts, [n, n + 1, n + 2])];

    for &p in &unique {
        let (px, py) = verts[p];

        let mut bad = Vec::new();
        let mut keep = Vec::with_capacity(triangles.len());
        for tri in triangles.drain(..) {
            let dx = px - tri.circle.cx;
            let dy = py - tri.circle.cy;
            if dx * dx + dy * dy < tri.circle.r2 * (1.0 - CIRCLE_EPS) {
                bad.push(tri);
            } else {
                keep.push(tri);
            }
        }
        triangles = keep;

        // Cavity boundary: edges of bad triangles not shared with another bad triangle.
        let mut edge_count: HashMap<(usize, usize), usize> = HashMap::new();
        for tri in &bad {
            for k in 0..3 {
                let (a, b) = (tri.v[k], tri.v[(k + 1) % 3]);
                *edge_count.entry((a.min(b), a.max(b))).or_insert(0) += 1;
            }
        }
        for tri in &bad {
            for k in 0..3 {
                let (a, b) = (tri.v[k], tri.v[(k + 1) % 3]);
                if edge_count[&(a.min(b), a.max(b))] == 1 {
                    triangles.push(make_triangle(&verts, [a, b, p]));
                }
            }
        }
    }

    let area_floor = AREA_EPS * extent * extent;
    result.triangles = triangles
        .into_iter()
        .filter(|tri| tri.v.iter().all(|&v| v < n))
        .filter(|tri| {
            let [a, b, c] = [verts[tri.v[0]], verts[tri.v[1]], verts[tri.v[2]]];
            cross(a, b, c) > area_floor
        })
        .map(|tri| tri.v)
        .collect();
    fill_hull_pockets(&verts, &unique, &mut result.triangles, area_floor);

    tracing::trace!(
        points = points.len(),
        unique = unique.len(),
        triangles = result.triangles.len(),
        "Delaunay triangulation complete"
    );

    result
}

/// Close the gaps left where triangles through the super-triangle were
/// dropped, so the union of triangles is the convex hull.
///
/// Walks the counter-clockwise boundary and clips every reflex corner
/// `a -> b -> c` with the triangle (a, c, b) until the boundary is convex.
/// Nearly collinear hull points are the usual cause.
fn fill_hull_pockets(
    verts: &[(f64, f64)],
    unique: &[usize],
    triangles: &mut Vec<[usize; 3]>,
    area_floor: f64,
) {
    loop {
        let mut directed: HashSet<(usize, usize)> = HashSet::new();
        for t in triangles.iter() {
            for k in 0..3 {
                directed.insert((t[k], t[(k + 1) % 3]));
            }
        }

        // Boundary successor of each vertex; pinched vertices are skipped.
        let mut next: HashMap<usize, Option<usize>> = HashMap::new();
        for &(a, b) in &directed {
            if !directed.contains(&(b, a)) {
                next.entry(a)
                    .and_modify(|slot| *slot = None)
                    .or_insert(Some(b));
            }
        }

        let mut starts: Vec<usize> = next.keys().copied().collect();
        starts.sort_unstable();

        let ear = starts.into_iter().find_map(|a| {
            let b = next.get(&a).copied().flatten()?;
            let c = next.get(&b).copied().flatten()?;
            if a == c {
                return None;
            }
            let (pa, pb, pc) = (verts[a], verts[b], verts[c]);
            if cross(pa, pc, pb) <= area_floor {
                return None;
            }
            let blocked = unique.iter().any(|&q| {
                q != a
                    && q != b
                    && q != c
                    && cross(pa, pc, verts[q]) >= 0.0
                    && cross(pc, pb, verts[q]) >= 0.0
                    && cross(pb, pa, verts[q]) >= 0.0
            });
            (!blocked).then_some([a, c, b])
        });

        match ear {
            Some(tri) => triangles.push(tri),
            None => break,
        }
    }
}

/// Twice the signed area of (a, b, c); positive when counter-clockwise.
fn cross(a: (f64, f64), b: (f64, f64), c: (f64, f64)) -> f64 {
    (b.0 - a.0) * (c.1 - a.1) - (b.1 - a.1) * (c.0 - a.0)
}

fn make_triangle(verts: &[(f64, f64)], v: [usize; 3]) -> WorkTriangle {
    let (a, b, c) = (verts[v[0]], verts[v[1]], verts[v[2]]);
    WorkTriangle {
        v,
        circle: circumcircle(a, b, c),
    }
}

fn circumcircle(a: (f64, f64), b: (f64, f64), c: (f64, f64)) -> Circumcircle {
    let d = 2.0 * (a.0 * (b.1 - c.1) + b.0 * (c.1 - a.1) + c.0 * (a.1 - b.1));
    if d == 0.0 {
        // Collinear: any later point invalidates this triangle.
        return Circumcircle {
            cx: (a.0 + b.0 + c.0) / 3.0,
            cy: (a.1 + b.1 + c.1) / 3.0,
            r2: f64::INFINITY,
        };
    }
    let a2 = a.0 * a.0 + a.1 * a.1;
    let b2 = b.0 * b.0 + b.1 * b.1;
    let c2 = c.0 * c.0 + c.1 * c.1;
    let cx = (a2 * (b.1 - c.1) + b2 * (c.1 - a.1) + c2 * (a.1 - b.1)) / d;
    let cy = (a2 * (c.0 - b.0) + b2 * (a.0 - c.0) + c2 * (b.0 - a.0)) / d;
    let r2 = (a.0 - cx).powi(2) + (a.1 - cy).powi(2);
    Circumcircle { cx, cy, r2 }
}

/// Barycentric weights of `p` in triangle (a, b, c), or `None` when the
/// triangle is degenerate. Weights sum to one; all are non-negative inside.
pub fn barycentric(
    p: (f64, f64),
    a: (f64, f64),
    b: (f64, f64),
    c: (f64, f64),
) -> Option<(f64, f64, f64)> {
    let det = cross(a, b, c);
    if det == 0.0 {
        return None;
    }
    let l1 = cross(p, b, c) / det;
    let l2 = cross(a, p, c) / det;
    let l3 = 1.0 - l1 - l2;
    Some((l1, l2, l3))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_gives_two_triangles() {
        let points = vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)];
        let tri = delaunay(&points);
        assert_eq!(tri.triangles.len(), 2);
        for t in &tri.triangles {
            let [a, b, c] = tri.corners(t);
            assert!(cross(a, b, c) > 0.0, "triangles are counter-clockwise");
        }
    }

    #[test]
    fn test_collinear_points_are_empty() {
        let points = vec![(0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (3.0, 3.0)];
        assert!(delaunay(&points).is_empty());
    }

    #[test]
    fn test_too_few_and_duplicate_points() {
        assert!(delaunay(&[(0.0, 0.0), (1.0, 0.0)]).is_empty());
        assert!(delaunay(&[(0.0, 0.0), (0.0, 0.0), (1.0, 0.0)]).is_empty());

        let tri = delaunay(&[(0.0, 0.0), (0.0, 0.0), (1.0, 0.0), (0.0, 1.0)]);
        assert_eq!(tri.triangles.len(), 1);
        assert!(!tri.triangles[0].contains(&1), "duplicate index is skipped");
    }

    #[test]
    fn test_lattice_triangle_count() {
        // An n x m lattice triangulates into 2 (n-1)(m-1) triangles.
        let mut points = Vec::new();
        for i in 0..5 {
            for j in 0..4 {
                points.push((i as f64 * 0.5, j as f64 * 0.4));
            }
        }
        let tri = delaunay(&points);
        assert_eq!(tri.triangles.len(), 2 * 4 * 3);
    }

    fn area(tri: &Triangulation) -> f64 {
        tri.triangles
            .iter()
            .map(|t| {
                let [a, b, c] = tri.corners(t);
                cross(a, b, c) / 2.0
            })
            .sum()
    }

    #[test]
    fn test_near_flat_hull_is_fully_covered() {
        let points = vec![(0.0, 0.0), (1.0, 0.0), (0.5, 1e-4), (0.5, 1.0)];
        let tri = delaunay(&points);
        assert_eq!(tri.triangles.len(), 3);
        assert!(tri
            .triangles
            .iter()
            .any(|t| t.contains(&0) && t.contains(&1) && t.contains(&2)));
        // Hull is the triangle (0,0), (1,0), (0.5,1).
        assert!((area(&tri) - 0.5).abs() < 1e-12);
        for t in &tri.triangles {
            let [a, b, c] = tri.corners(t);
            assert!(cross(a, b, c) > 0.0);
        }
    }

    #[test]
    fn test_shallow_arc_hull_is_fully_covered() {
        // Points on a very flat arc plus one apex: hull area is known exactly
        // from the shoelace formula over the hull vertices.
        let mut points: Vec<(f64, f64)> = (0..=10)
            .map(|i| {
                let x = i as f64 / 10.0;
                (x, -1e-5 * x * (1.0 - x))
            })
            .collect();
        points.push((0.5, 2.0));
        let tri = delaunay(&points);

        let hull: Vec<(f64, f64)> = points.clone();
        let shoelace: f64 = (0..hull.len())
            .map(|i| {
                let (x0, y0) = hull[i];
                let (x1, y1) = hull[(i + 1) % hull.len()];
                x0 * y1 - x1 * y0
            })
            .sum::<f64>()
            / 2.0;
        assert!((area(&tri) - shoelace).abs() < 1e-9);
    }

    #[test]
    fn test_empty_circumcircle_property() {
        let points = vec![
            (0.0, 0.0),
            (2.0, 0.1),
            (1.1, 1.9),
            (3.2, 2.2),
            (0.4, 3.0),
            (2.5, 3.7),
            (1.6, 0.9),
        ];
        let tri = delaunay(&points);
        assert!(!tri.is_empty());
        for t in &tri.triangles {
            let [a, b, c] = tri.corners(t);
            let circle = circumcircle(a, b, c);
            for (i, &(x, y)) in points.iter().enumerate() {
                if t.contains(&i) {
                    continue;
                }
                let d2 = (x - circle.cx).powi(2) + (y - circle.cy).powi(2);
                assert!(d2 >= circle.r2 * (1.0 - 1e-9));
            }
        }
    }

    #[test]
    fn test_barycentric() {
        let (l1, l2, l3) =
            barycentric((0.25, 0.25), (0.0, 0.0), (1.0, 0.0), (0.0, 1.0)).unwrap();
        assert!((l1 - 0.5).abs() < 1e-12);
        assert!((l2 - 0.25).abs() < 1e-12);
        assert!((l3 - 0.25).abs() < 1e-12);
        assert!(barycentric((0.0, 0.0), (0.0, 0.0), (1.0, 1.0), (2.0, 2.0)).is_none());
    }

    #[test]
    fn test_neighbors() {
        let points = vec![(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)];
        let tri = delaunay(&points);
        let neighbors = tri.neighbors();
        assert_eq!(neighbors[0], vec![1, 2]);
        assert_eq!(neighbors[1], vec![0, 2]);
    }
}
