//! Region model and point-in-polygon containment

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Tolerance for the collinearity test in the on-boundary check.
const COLLINEAR_EPS: f64 = 1e-12;

/// Errors raised while building regions from raw vertex lists
#[derive(Debug, Error)]
pub enum RegionError {
    /// A region needs at least two vertices to enclose any area
    #[error("cannot form a region from a single point")]
    SinglePoint,

    /// A flat coordinate list with an unpaired trailing value
    #[error("odd number of coordinates in region specification ({count})")]
    OddCoordinateCount { count: usize },

    /// A coordinate failed to parse as a number
    #[error("invalid coordinate '{value}': {reason}")]
    InvalidCoordinate { value: String, reason: String },
}

/// Geographic point in signed decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Latitude in decimal degrees (-90 to 90)
    pub lat: f64,
    /// Longitude in decimal degrees (-180 to 180)
    pub lon: f64,
}

impl Point {
    /// Create a new point
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{:.6} {:.6}}}", self.lat, self.lon)
    }
}

/// A simple polygon in lat/lon space used for exclusion testing
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    vertices: Vec<Point>,
}

impl Region {
    /// Build a region from raw vertices.
    ///
    /// Exactly two vertices are read as the top-left and bottom-right
    /// corners of an axis-aligned rectangle and expanded to the explicit
    /// four-corner polygon; the containment test only understands general
    /// polygons. Three or more vertices are used as-is in the given order,
    /// with no simplicity or convexity validation. Fewer than two vertices
    /// cannot enclose any area and are rejected.
    pub fn from_vertices(vertices: Vec<Point>) -> Result<Self, RegionError> {
        match vertices.len() {
            0 | 1 => Err(RegionError::SinglePoint),
            2 => {
                let top_left = vertices[0];
                let bottom_right = vertices[1];
                let top_right = Point::new(top_left.lat, bottom_right.lon);
                let bottom_left = Point::new(bottom_right.lat, top_left.lon);
                Ok(Self {
                    vertices: vec![top_left, top_right, bottom_right, bottom_left],
                })
            }
            _ => Ok(Self { vertices }),
        }
    }

    /// Polygon vertices in order
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Even-odd ray-casting containment test.
    ///
    /// A point exactly on an edge or vertex counts as inside; the explicit
    /// on-boundary check runs first so the rule does not depend on how the
    /// crossing count lands for degenerate rays.
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        if self.on_boundary(point) {
            return true;
        }

        let mut inside = false;
        let n = self.vertices.len();
        let mut j = n - 1;
        for i in 0..n {
            let a = self.vertices[i];
            let b = self.vertices[j];
            if (a.lat > point.lat) != (b.lat > point.lat) {
                let crossing_lon =
                    a.lon + (point.lat - a.lat) * (b.lon - a.lon) / (b.lat - a.lat);
                if point.lon < crossing_lon {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }

    fn on_boundary(&self, point: Point) -> bool {
        let n = self.vertices.len();
        let mut j = n - 1;
        for i in 0..n {
            if on_segment(self.vertices[j], self.vertices[i], point) {
                return true;
            }
            j = i;
        }
        false
    }
}

fn on_segment(a: Point, b: Point, p: Point) -> bool {
    let cross = (b.lon - a.lon) * (p.lat - a.lat) - (b.lat - a.lat) * (p.lon - a.lon);
    if cross.abs() > COLLINEAR_EPS {
        return false;
    }
    p.lat >= a.lat.min(b.lat)
        && p.lat <= a.lat.max(b.lat)
        && p.lon >= a.lon.min(b.lon)
        && p.lon <= a.lon.max(b.lon)
}

/// An immutable set of exclusion regions with OR semantics
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegionSet {
    regions: Vec<Region>,
}

impl RegionSet {
    /// Create a region set from already-constructed regions
    pub fn new(regions: Vec<Region>) -> Self {
        Self { regions }
    }

    /// Number of member regions
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// True if the set holds no regions
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Member regions in order
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// True iff the point lies inside or on the boundary of at least one
    /// member region. Short-circuits on the first match; the empty set
    /// contains nothing.
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        self.regions.iter().any(|region| region.contains(point))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rectangle() -> Region {
        Region::from_vertices(vec![Point::new(10.0, 10.0), Point::new(0.0, 0.0)])
            .expect("rectangle region")
    }

    #[test]
    fn test_rectangle_expansion() {
        let region = rectangle();
        assert_eq!(
            region.vertices(),
            &[
                Point::new(10.0, 10.0),
                Point::new(10.0, 0.0),
                Point::new(0.0, 0.0),
                Point::new(0.0, 10.0),
            ]
        );
    }

    #[test]
    fn test_rectangle_matches_explicit_polygon() {
        let expanded = rectangle();
        let explicit = Region::from_vertices(vec![
            Point::new(10.0, 10.0),
            Point::new(10.0, 0.0),
            Point::new(0.0, 0.0),
            Point::new(0.0, 10.0),
        ])
        .expect("explicit polygon");

        let samples = [
            Point::new(5.0, 5.0),
            Point::new(20.0, 20.0),
            Point::new(-1.0, 5.0),
            Point::new(0.0, 0.0),
            Point::new(10.0, 5.0),
        ];
        for point in samples {
            assert_eq!(
                expanded.contains(point),
                explicit.contains(point),
                "containment differs for {point}"
            );
        }
    }

    #[test]
    fn test_single_point_rejected() {
        let result = Region::from_vertices(vec![Point::new(1.0, 1.0)]);
        assert!(matches!(result, Err(RegionError::SinglePoint)));

        let result = Region::from_vertices(Vec::new());
        assert!(matches!(result, Err(RegionError::SinglePoint)));
    }

    #[test]
    fn test_contains_inside_and_outside() {
        let region = rectangle();
        assert!(region.contains(Point::new(5.0, 5.0)));
        assert!(region.contains(Point::new(9.999, 0.001)));
        assert!(!region.contains(Point::new(20.0, 20.0)));
        assert!(!region.contains(Point::new(-0.001, 5.0)));
        assert!(!region.contains(Point::new(5.0, 10.001)));
    }

    #[test]
    fn test_boundary_counts_as_inside() {
        let region = rectangle();
        // Vertices
        assert!(region.contains(Point::new(0.0, 0.0)));
        assert!(region.contains(Point::new(10.0, 10.0)));
        // Edge midpoints
        assert!(region.contains(Point::new(10.0, 5.0)));
        assert!(region.contains(Point::new(5.0, 0.0)));
        assert!(region.contains(Point::new(0.0, 5.0)));
        assert!(region.contains(Point::new(5.0, 10.0)));
    }

    #[test]
    fn test_triangle_containment() {
        let triangle = Region::from_vertices(vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(0.0, 10.0),
        ])
        .expect("triangle region");

        assert!(triangle.contains(Point::new(2.0, 2.0)));
        assert!(!triangle.contains(Point::new(6.0, 6.0)));
        // Hypotenuse midpoint lies on the boundary
        assert!(triangle.contains(Point::new(5.0, 5.0)));
    }

    #[test]
    fn test_negative_coordinates() {
        let region = Region::from_vertices(vec![
            Point::new(-10.0, -10.0),
            Point::new(-20.0, -5.0),
        ])
        .expect("rectangle region");

        assert!(region.contains(Point::new(-15.0, -7.5)));
        assert!(!region.contains(Point::new(-15.0, -11.0)));
    }

    #[test]
    fn test_empty_set_contains_nothing() {
        let set = RegionSet::default();
        assert!(set.is_empty());
        assert!(!set.contains(Point::new(0.0, 0.0)));
        assert!(!set.contains(Point::new(89.9, 179.9)));
    }

    #[test]
    fn test_set_or_semantics() {
        let first = Region::from_vertices(vec![Point::new(10.0, 10.0), Point::new(0.0, 0.0)])
            .expect("first region");
        let second = Region::from_vertices(vec![Point::new(30.0, 30.0), Point::new(20.0, 20.0)])
            .expect("second region");
        let set = RegionSet::new(vec![first, second]);

        assert_eq!(set.len(), 2);
        assert!(set.contains(Point::new(5.0, 5.0)));
        assert!(set.contains(Point::new(25.0, 25.0)));
        assert!(!set.contains(Point::new(15.0, 15.0)));
    }
}
