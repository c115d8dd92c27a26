use geo::{Distance, Haversine, Point};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Geographic position in WGS84 lon/lat. Altitude in meters where the
/// survey recorded one.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub longitude: f64,
    pub latitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude: Option<f64>,
}

impl Coordinate {
    /// Build a coordinate, validating WGS84 ranges.
    pub fn new(longitude: f64, latitude: f64) -> Result<Self> {
        Self::with_altitude(longitude, latitude, None)
    }

    pub fn with_altitude(longitude: f64, latitude: f64, altitude: Option<f64>) -> Result<Self> {
        if !(-180.0..=180.0).contains(&longitude) || !(-90.0..=90.0).contains(&latitude) {
            return Err(Error::Parse(format!(
                "coordinate out of range: ({longitude}, {latitude})"
            )));
        }
        Ok(Self { longitude, latitude, altitude })
    }

    #[inline]
    pub(crate) fn point(&self) -> Point<f64> {
        Point::new(self.longitude, self.latitude)
    }
}

/// Haversine length of a coordinate path in meters. Zero for fewer than two points.
pub fn path_length_m(path: &[Coordinate]) -> f64 {
    path.windows(2)
        .map(|pair| Haversine.distance(pair[0].point(), pair[1].point()))
        .sum()
}
