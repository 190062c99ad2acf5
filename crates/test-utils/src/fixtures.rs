//! Common test fixtures for snowline tests.
//!
//! This module provides pre-defined test data that represents common
//! scenarios in snow survey processing.

/// Common bounding box definitions for testing.
pub mod bbox {
    use snowline_common::BoundingBox;

    /// Cairngorms window used by the end-to-end scenarios.
    pub fn cairngorms() -> BoundingBox {
        BoundingBox::new(-5.0, -3.0, 56.0, 58.0)
    }

    /// Mainland Scotland.
    pub fn scotland() -> BoundingBox {
        BoundingBox::new(-8.0, -1.0, 54.5, 59.0)
    }

    /// One degree square at the origin.
    pub fn unit() -> BoundingBox {
        BoundingBox::new(0.0, 1.0, 0.0, 1.0)
    }

    /// Invalid bbox (min > max)
    pub fn inverted() -> BoundingBox {
        BoundingBox::new(10.0, 5.0, 10.0, 5.0)
    }
}

/// Common dates for testing.
pub mod dates {
    use chrono::NaiveDate;

    /// A fixed reference date for tests (2005-01-15).
    pub fn reference() -> NaiveDate {
        ymd(2005, 1, 15)
    }

    pub fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid fixture date")
    }
}

/// Observation tables in the Snow Survey CSV layout.
pub mod csv {
    /// Three sites on one date with every column present.
    pub const VALID: &str = "\
date,site_id,latitude,longitude,snow_present,snow_depth,elevation
2005-01-15,SITE001,57.10,-3.80,true,15.5,820
2005-01-15,SITE002,56.40,-4.20,false,,150
2005-01-15,SITE003,57.60,-4.60,yes,,540
";

    /// No `date` or `snow_present` column.
    pub const MISSING_COLUMNS: &str = "\
site_id,latitude,longitude
SITE001,57.10,-3.80
";

    /// Latitude outside [-90, 90].
    pub const BAD_LATITUDE: &str = "\
date,site_id,latitude,longitude,snow_present
2005-01-15,SITE001,95.0,-3.80,true
";

    /// Longitude outside [-180, 180].
    pub const BAD_LONGITUDE: &str = "\
date,site_id,latitude,longitude,snow_present
2005-01-15,SITE001,57.1,200.0,true
";

    /// Unparseable snow state.
    pub const BAD_SNOW_STATE: &str = "\
date,site_id,latitude,longitude,snow_present
2005-01-15,SITE001,57.1,-3.8,maybe
";
}

/// Run configurations in YAML.
pub mod config {
    /// Smallest valid configuration; everything optional is defaulted.
    pub const MINIMAL_YAML: &str = r#"
input:
  snow_cover_data: ./data/snow.csv
region:
  bounding_box:
    min_lon: -5.0
    max_lon: -3.0
    min_lat: 56.0
    max_lat: 58.0
time:
  start_date: 2005-01-15
  end_date: 2005-01-16
output:
  directory: ./output
  filename_prefix: snowline_
"#;

    /// Every section present with non-default values.
    pub const FULL_YAML: &str = r##"
input:
  snow_cover_data: ./data/snow.csv
  basemap_data: ./data/coast.geojson
region:
  bounding_box:
    min_lon: -5.0
    max_lon: -3.0
    min_lat: 56.0
    max_lat: 58.0
time:
  start_date: 2005-01-15
  end_date: 2005-01-20
output:
  directory: ./maps
  filename_prefix: ssgb_
  style:
    snowline_color: red
    snowline_width: 2.5
    gridline_color: "#999"
    gridline_style: ":"
processing:
  grid_resolution: 0.05
  interpolation_method: cubic
  smoothing_sigma: 2.0
  parallel: true
postprocess:
  merge_segments: true
  simplify_tolerance: 0.001
  smooth_buffer: 0.005
"##;
}
