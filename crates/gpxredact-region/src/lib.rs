//! Geographic exclusion regions for GPX redaction
//!
//! This crate provides the region model used to decide which track points
//! must be removed from a GPS track log:
//!
//! - Polygonal regions in lat/lon space with a point-in-polygon
//!   containment test (even-odd ray casting, boundary counts as inside)
//! - Two-corner rectangle specifications expanded to explicit polygons
//! - Region sets with OR semantics across member regions
//! - Region specifications parsed from flat `lat1,lon1,...` strings or
//!   loaded from YAML configuration files
//!
//! A `RegionSet` is immutable after construction and safe to share
//! read-only across concurrent filtering runs.
//!
//! # Example
//!
//! ```rust
//! use gpxredact_region::{Point, Region, RegionSet};
//!
//! // Two vertices are rectangle corners, expanded to a four-corner polygon.
//! let region = Region::from_vertices(vec![
//!     Point::new(10.0, 10.0),
//!     Point::new(0.0, 0.0),
//! ]).expect("valid region");
//! let regions = RegionSet::new(vec![region]);
//!
//! assert!(regions.contains(Point::new(5.0, 5.0)));
//! assert!(!regions.contains(Point::new(20.0, 20.0)));
//! ```

pub mod config;
pub mod region;

// Re-export commonly used types
pub use config::{parse_skip_area, RegionsConfig};
pub use region::{Point, Region, RegionError, RegionSet};
