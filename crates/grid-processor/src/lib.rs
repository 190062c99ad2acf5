//! Gridded field processing for snow-state extraction.
//!
//! Turns scattered point values into a regular lon/lat field and traces
//! iso-lines through it:
//!
//! ```text
//! BoundingBox + resolution
//!      │
//!      ▼
//! build_grid ──► Grid (lon/lat axes)
//!      │
//!      ▼
//! interpolate(points, values, method) ──► GridValues
//!      │
//!      ▼
//! smooth(sigma) ──► GridValues
//!      │
//!      ▼
//! extract_contours(level) ──► Vec<ContourLine> in (row, col) index space
//! ```
//!
//! # Example
//!
//! ```ignore
//! use grid_processor::{build_grid, extract_contours, interpolate, smooth, InterpolationMethod};
//!
//! let grid = build_grid(&bbox, 0.01)?;
//! let field = interpolate(&grid, &points, &values, InterpolationMethod::Linear)?;
//! let field = smooth(&field, 1.0)?;
//! let lines = extract_contours(&field, 0.5);
//! ```

pub mod contour;
pub mod error;
pub mod grid;
pub mod interpolation;
pub mod smoothing;
pub mod triangulation;
pub mod types;

// Re-export commonly used types at crate root
pub use contour::{extract_contours, ContourLine};
pub use error::{GridProcessorError, Result};
pub use grid::{build_grid, Grid};
pub use interpolation::{interpolate, FILL_VALUE};
pub use smoothing::smooth;
pub use triangulation::{delaunay, Triangulation};
pub use types::{GridValues, InterpolationMethod};
