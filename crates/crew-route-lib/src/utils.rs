//! Utility functions for distances, rounding and coordinate checks

use geo::Point;

/// Earth radius in miles used by the Haversine distance
pub const EARTH_RADIUS_MILES: f64 = 3959.0;

/// Valid latitude range in degrees
pub const MAX_LATITUDE: f64 = 90.0;

/// Valid longitude range in degrees
pub const MAX_LONGITUDE: f64 = 180.0;

/// Great-circle distance in miles between two WGS84 points, rounded to 2 decimals
///
/// # Arguments
/// * `lat1`, `lon1` - First point in degrees
/// * `lat2`, `lon2` - Second point in degrees
///
/// No range checks are performed; invalid input yields a meaningless (possibly NaN) value.
#[inline]
pub fn haversine_miles(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    round_half_up(EARTH_RADIUS_MILES * c, 2)
}

/// Haversine distance between two `geo` points (x = longitude, y = latitude)
#[inline]
pub fn point_distance_miles(a: Point<f64>, b: Point<f64>) -> f64 {
    haversine_miles(a.y(), a.x(), b.y(), b.x())
}

/// Round to `decimals` places, with halves rounded towards positive infinity
///
/// This keeps negative deltas symmetric with how positive values are rounded
/// (`-0.125` becomes `-0.12`, `0.125` becomes `0.13`).
#[inline]
pub fn round_half_up(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor + 0.5).floor() / factor
}

/// Check if a latitude is a finite value within [-90, 90]
#[inline(always)]
pub fn is_valid_latitude(lat: f64) -> bool {
    (-MAX_LATITUDE..=MAX_LATITUDE).contains(&lat)
}

/// Check if a longitude is a finite value within [-180, 180]
#[inline(always)]
pub fn is_valid_longitude(lon: f64) -> bool {
    (-MAX_LONGITUDE..=MAX_LONGITUDE).contains(&lon)
}
