//! Snow observation ingestion library.
//!
//! Loads point observations of snow presence from storage and validates
//! them before they reach the extraction engine.
//!
//! # Architecture
//!
//! - [`ObservationSource`]: the loading interface, one `load` operation
//! - [`CsvObservationSource`]: Snow Survey of Great Britain CSV exports
//! - [`MemorySource`]: an in-memory table for tests and embedding
//! - [`validation`]: header and coordinate-domain checks
//!
//! Sources load the full table once; callers filter it per date without
//! mutating it.

pub mod error;
pub mod loader;
pub mod summary;
pub mod validation;

// Re-exports
pub use error::{IngestionError, Result};
pub use loader::{read_observations, CsvObservationSource, MemorySource, ObservationSource};
pub use summary::ObservationSummary;
pub use validation::{validate_headers, validate_observations, REQUIRED_COLUMNS};
