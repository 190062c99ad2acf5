//! Common types shared across the snowline workspace.

pub mod bbox;
pub mod crs;
pub mod error;
pub mod observation;
pub mod result;
pub mod style;
pub mod time;

pub use bbox::BoundingBox;
pub use crs::Crs;
pub use error::{ConfigError, ConfigResult};
pub use observation::{Observation, ObservationSet};
pub use result::{DailyOutcome, EmptyReason, SnowlineGeometry, SnowlineResult, SnowlineSeries};
pub use style::{Color, LineStyle, StyleConfig};
pub use time::DateRange;
