//! Great-circle distance between two coordinates.
//!
//! See <https://en.wikipedia.org/wiki/Haversine_formula>.

use crate::location::Coordinate;

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Computes the haversine distance between two coordinates.
///
/// Latitude and longitude differences are taken on the raw degree
/// values and converted to radians afterwards.
///
/// # Arguments
/// * `from` - One end.
/// * `to` - The other end.
///
/// # Returns
/// The distance in kilometers. Always non-negative, and exactly `0.0`
/// for identical coordinates.
pub fn distance(from: &Coordinate, to: &Coordinate) -> f64 {
    let d_lat = (to.lat() - from.lat()).to_radians();
    let d_lon = (to.lon() - from.lon()).to_radians();
    let lat1 = from.lat().to_radians();
    let lat2 = to.lat().to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    // rounding can push `a` just past 1 for antipodal points
    let a = a.min(1.0);
    2.0 * EARTH_RADIUS_KM * a.sqrt().atan2((1.0 - a).sqrt())
}

//------------------------------------------------------------------
// Unit Tests
//------------------------------------------------------------------
