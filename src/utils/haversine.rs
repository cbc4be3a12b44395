//! Great-circle distance between two points on Earth.

use crate::location::AsLocation;

/// Mean Earth diameter in kilometers (2 × 6371 km).
pub const EARTH_DIAMETER_KM: f64 = 12742.0;

/// π / 180, degrees to radians.
const RADIANS_PER_DEGREE: f64 = 0.017453292519943295;

/// Returns the haversine distance in kilometers between two points
/// given in decimal degrees.
///
/// Symmetric in its two points and never negative. Out-of-range
/// coordinates are not rejected.
pub fn distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let p = RADIANS_PER_DEGREE;
    let hav = 0.5 - ((lat2 - lat1) * p).cos() / 2.0
        + (lat1 * p).cos() * (lat2 * p).cos() * (1.0 - ((lon2 - lon1) * p).cos()) / 2.0;
    // Rounding can push `hav` a hair outside [0, 1].
    EARTH_DIAMETER_KM * hav.clamp(0.0, 1.0).sqrt().asin()
}

/// [`distance`] between two located records.
pub fn distance_between(from: &dyn AsLocation, to: &dyn AsLocation) -> f64 {
    let from = from.as_location();
    let to = to.as_location();
    distance(from.latitude, from.longitude, to.latitude, to.longitude)
}
