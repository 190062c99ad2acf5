//! Mapping grid-index contour lines back to geographic coordinates.

use geo::{Coord, LineString};
use grid_processor::{ContourLine, Grid};
use snowline_common::SnowlineGeometry;

/// Convert contour lines in (row, col) index space to a (lon, lat) geometry.
///
/// Each index is rounded half-to-even and looked up in the grid's axes.
/// Points that round outside the grid are dropped, then lines left with
/// fewer than two points are discarded. Returns `None` when nothing survives.
pub fn to_geometry(contours: &[ContourLine], grid: &Grid) -> Option<SnowlineGeometry> {
    let lines: Vec<LineString<f64>> = contours
        .iter()
        .filter_map(|contour| {
            let coords: Vec<Coord<f64>> = contour
                .points
                .iter()
                .filter_map(|&(row, col)| {
                    let row = grid_index(row)?;
                    let col = grid_index(col)?;
                    let (lon, lat) = grid.coord(row, col)?;
                    Some(Coord { x: lon, y: lat })
                })
                .collect();
            (coords.len() >= 2).then(|| LineString::new(coords))
        })
        .collect();

    SnowlineGeometry::from_lines(lines)
}

fn grid_index(fractional: f64) -> Option<usize> {
    let rounded = fractional.round_ties_even();
    (rounded.is_finite() && rounded >= 0.0).then_some(rounded as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use grid_processor::build_grid;
    use snowline_common::BoundingBox;

    fn grid() -> Grid {
        build_grid(&BoundingBox::new(-5.0, -3.0, 56.0, 58.0), 0.1).unwrap()
    }

    fn line(points: Vec<(f64, f64)>) -> ContourLine {
        ContourLine {
            points,
            closed: false,
        }
    }

    #[test]
    fn test_integral_indices_round_trip_exactly() {
        let grid = grid();
        let contour = line(vec![(0.0, 0.0), (3.0, 7.0), (19.0, 19.0)]);
        let geometry = to_geometry(&[contour], &grid).unwrap();
        let coords: Vec<_> = geometry.coords().copied().collect();
        assert_eq!(coords[0], Coord { x: grid.lons()[0], y: grid.lats()[0] });
        assert_eq!(coords[1], Coord { x: grid.lons()[7], y: grid.lats()[3] });
        assert_eq!(coords[2], Coord { x: grid.lons()[19], y: grid.lats()[19] });
    }

    #[test]
    fn test_rounding_is_half_to_even() {
        assert_eq!(grid_index(2.5), Some(2));
        assert_eq!(grid_index(3.5), Some(4));
        assert_eq!(grid_index(0.49), Some(0));
        assert_eq!(grid_index(-0.4), Some(0));
        assert_eq!(grid_index(-0.6), None);
        assert_eq!(grid_index(f64::NAN), None);
    }

    #[test]
    fn test_out_of_bounds_points_are_dropped() {
        let grid = grid();
        let contour = line(vec![(0.0, 0.0), (1.0, 1.0), (25.0, 1.0)]);
        let geometry = to_geometry(&[contour], &grid).unwrap();
        assert_eq!(geometry.vertex_count(), 2);
    }

    #[test]
    fn test_degenerate_lines_are_discarded() {
        let grid = grid();
        let short = line(vec![(1.0, 1.0), (40.0, 40.0)]);
        assert!(to_geometry(&[short], &grid).is_none());
        assert!(to_geometry(&[], &grid).is_none());
    }

    #[test]
    fn test_line_or_multiline() {
        let grid = grid();
        let a = line(vec![(1.0, 1.0), (1.0, 2.0)]);
        let b = line(vec![(5.0, 5.0), (6.0, 5.0)]);
        assert!(matches!(
            to_geometry(&[a.clone()], &grid),
            Some(SnowlineGeometry::Line(_))
        ));
        let multi = to_geometry(&[a, b], &grid).unwrap();
        assert!(matches!(multi, SnowlineGeometry::MultiLine(_)));
        assert_eq!(multi.line_count(), 2);
    }
}
