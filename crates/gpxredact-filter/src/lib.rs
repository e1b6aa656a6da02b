//! Streaming GPX redaction filter
//!
//! This crate rewrites a GPX document in a single pass over its XML token
//! stream, dropping every track point that falls inside an exclusion
//! region and re-serializing everything else:
//!
//! - Zero-copy token streaming using quick-xml; the document is never
//!   materialized in memory
//! - O(1) auxiliary state per run (a suppression flag and a counter)
//! - Lossless pass-through of attributes and token order for surviving
//!   elements, with 2-space indented output
//! - Malformed track-point coordinates are logged and never abort a run
//!
//! # Example
//!
//! ```rust
//! use gpxredact_filter::process;
//! use gpxredact_region::{Point, Region, RegionSet};
//!
//! let region = Region::from_vertices(vec![
//!     Point::new(10.0, 10.0),
//!     Point::new(0.0, 0.0),
//! ]).expect("valid region");
//! let regions = RegionSet::new(vec![region]);
//!
//! let input = br#"<gpx><trk><trkseg>
//!   <trkpt lat="5.0" lon="5.0"><ele>100.0</ele></trkpt>
//!   <trkpt lat="20.0" lon="20.0"><ele>101.0</ele></trkpt>
//! </trkseg></trk></gpx>"#;
//!
//! let mut output = Vec::new();
//! let report = process(&input[..], &mut output, &regions).expect("filtering succeeds");
//! assert_eq!(report.suppressed_points, 1);
//! ```

pub mod stream;

// Re-export commonly used types
pub use stream::{process, FilterError, FilterReport};
