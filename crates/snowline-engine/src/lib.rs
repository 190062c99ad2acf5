//! Snowline extraction engine.
//!
//! Classifies each date's observations, and for mixed snow states
//! interpolates, smooths and contours them into a (lon, lat) boundary.
//!
//! ```text
//! run_date_range(start, end, observations, bbox, processor)
//!      │
//!      ├─► for each date: ObservationSet::select(date, bbox)
//!      │         │
//!      │         ├─► classify ──► Empty | Labeled(reason)
//!      │         │
//!      │         └─► Extract: build_grid ─► interpolate ─► smooth
//!      │                        ─► extract_contours(0.5) ─► to_geometry
//!      │
//!      └─► SnowlineSeries (date -> DailyOutcome)
//! ```
//!
//! Clean-up transforms in [`postprocess`] are applied separately by callers.

pub mod classifier;
pub mod error;
pub mod geometry;
pub mod pipeline;
pub mod postprocess;
pub mod processor;

// Re-export commonly used types at crate root
pub use classifier::{classify, Classification, MIN_OBSERVATIONS};
pub use error::{PipelineError, ProcessingError, Result};
pub use geometry::to_geometry;
pub use pipeline::{
    run_date_range, run_date_range_parallel, PipelineConfig, SeriesSummary, SnowlinePipeline,
};
pub use postprocess::{merge_line_segments, simplify_snowline, smooth_snowline};
pub use processor::{InterpolationProcessor, ProcessingConfig, SnowlineProcessor, CONTOUR_LEVEL};
