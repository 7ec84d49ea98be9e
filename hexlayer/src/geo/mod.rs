//! Geographic math module
//!
//! Provides great-circle distance, degree/radian conversion and the
//! deterministic coordinate hash used for entity sampling.

mod hash;
mod types;

pub use hash::{coordinate_key, hash_str, pseudo_random_unit, stable_hash};
pub use types::GeoPoint;

/// Mean Earth radius used for haversine distance (meters).
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Converts degrees to radians.
#[inline]
pub fn to_radians(degrees: f64) -> f64 {
    degrees.to_radians()
}

/// Converts radians to degrees.
#[inline]
pub fn to_degrees(radians: f64) -> f64 {
    radians.to_degrees()
}

/// Great-circle distance between two points using the haversine formula.
///
/// # Arguments
///
/// * `a` - First point in degrees
/// * `b` - Second point in degrees
///
/// # Returns
///
/// Distance in meters on a sphere of radius [`EARTH_RADIUS_METERS`].
/// Non-finite inputs produce `NaN`, which compares false against any radius.
#[inline]
pub fn distance_meters(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1 = to_radians(a.lat);
    let lat2 = to_radians(b.lat);
    let d_lat = to_radians(b.lat - a.lat);
    let d_lon = to_radians(b.lon - a.lon);

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_METERS * c
}
