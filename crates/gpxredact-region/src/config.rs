//! Region specifications from command-line strings and YAML files

use crate::region::{Point, Region, RegionError, RegionSet};
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

/// Parse a flat `lat1,lon1,lat2,lon2,...` specification into vertices.
///
/// Two coordinates denote the top-left and bottom-right corners of a
/// rectangle, three or more an explicit polygon in vertex order; that
/// interpretation happens later, at region construction. An odd number of
/// values or an unparsable number is an error.
pub fn parse_skip_area(spec: &str) -> Result<Vec<Point>, RegionError> {
    let values: Vec<&str> = spec.split(',').map(str::trim).collect();
    if values.len() % 2 != 0 {
        return Err(RegionError::OddCoordinateCount {
            count: values.len(),
        });
    }

    let mut points = Vec::with_capacity(values.len() / 2);
    for pair in values.chunks_exact(2) {
        let lat = parse_coordinate(pair[0])?;
        let lon = parse_coordinate(pair[1])?;
        points.push(Point::new(lat, lon));
    }
    Ok(points)
}

fn parse_coordinate(value: &str) -> Result<f64, RegionError> {
    value
        .parse::<f64>()
        .map_err(|e| RegionError::InvalidCoordinate {
            value: value.to_string(),
            reason: e.to_string(),
        })
}

/// Region lists loadable from a YAML file
///
/// ```yaml
/// regions:
///   - [59.95, 30.30, 59.94, 30.32]
///   - [10.0, 10.0, 10.0, 20.0, 0.0, 20.0, 0.0, 10.0]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionsConfig {
    /// Flat coordinate lists, one per region
    pub regions: Vec<Vec<f64>>,
}

impl RegionsConfig {
    /// Load a region configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read regions file: {}", path.display()))?;

        let config: RegionsConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse regions file: {}", path.display()))?;

        config.validate()?;

        info!(
            path = %path.display(),
            region_count = config.regions.len(),
            "Loaded region configuration"
        );

        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        for (index, coords) in self.regions.iter().enumerate() {
            if coords.len() % 2 != 0 {
                return Err(anyhow!(
                    "region {} has an odd number of coordinates ({})",
                    index,
                    coords.len()
                ));
            }
            if coords.len() < 4 {
                return Err(anyhow!("region {} needs at least two points", index));
            }
        }
        Ok(())
    }

    /// Convert the flat coordinate lists into constructed regions
    pub fn into_regions(self) -> Result<Vec<Region>> {
        let mut regions = Vec::with_capacity(self.regions.len());
        for coords in self.regions {
            let points = coords
                .chunks_exact(2)
                .map(|pair| Point::new(pair[0], pair[1]))
                .collect();
            regions.push(Region::from_vertices(points)?);
        }
        Ok(regions)
    }

    /// Convert to a RegionSet
    pub fn into_region_set(self) -> Result<RegionSet> {
        Ok(RegionSet::new(self.into_regions()?))
    }
}
