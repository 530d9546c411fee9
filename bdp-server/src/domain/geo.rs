//! Geographic helpers for bracket positions.

use geo::{Distance, Haversine, InterpolatePoint, Point};
use serde::{Deserialize, Serialize};

/// A WGS84 longitude/latitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LonLat {
    pub lon: f64,
    pub lat: f64,
}

impl LonLat {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Great-circle midpoint between two positions.
    pub fn midpoint(self, other: LonLat) -> LonLat {
        Haversine
            .point_at_ratio_between(Point::from(self), Point::from(other), 0.5)
            .into()
    }

    /// Great-circle distance to another position, in meters.
    pub fn distance_to(self, other: LonLat) -> f64 {
        Haversine.distance(Point::from(self), Point::from(other))
    }
}

impl From<LonLat> for Point<f64> {
    fn from(value: LonLat) -> Self {
        Point::new(value.lon, value.lat)
    }
}

impl From<Point<f64>> for LonLat {
    fn from(value: Point<f64>) -> Self {
        LonLat::new(value.x(), value.y())
    }
}
