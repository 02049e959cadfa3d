//! Great-circle distance on a spherical Earth

use serde::{Deserialize, Serialize};

/// Mean Earth diameter in kilometres (2 * 6371).
pub const EARTH_DIAMETER_KM: f64 = 12_742.0;

/// Degrees to radians.
const P: f64 = std::f64::consts::PI / 180.0;

/// A point on the globe, in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Haversine distance between two coordinates in kilometres.
///
/// Symmetric in its arguments and zero for identical points.
pub fn distance(a: Coordinates, b: Coordinates) -> f64 {
    let h = 0.5 - ((a.latitude - b.latitude) * P).cos() / 2.0
        + (b.latitude * P).cos()
            * (a.latitude * P).cos()
            * (1.0 - ((a.longitude - b.longitude) * P).cos())
            / 2.0;
    // Rounding can push h a hair outside [0, 1] for (anti)podal pairs
    EARTH_DIAMETER_KM * h.clamp(0.0, 1.0).sqrt().asin()
}
