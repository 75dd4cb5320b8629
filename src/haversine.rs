//! Great-circle distance between coordinates.
//!
//! Every along-route and station-proximity measurement in the planner goes
//! through [`haversine_miles`].

use crate::coordinate::Coordinate;

/// Earth radius in miles.
pub const EARTH_RADIUS_MILES: f64 = 3956.0;

/// Calculate haversine distance between two points in miles.
///
/// Symmetric, and zero for identical points. Any finite input is accepted.
pub fn haversine_miles(from: Coordinate, to: Coordinate) -> f64 {
    let lat1_rad = from.lat.to_radians();
    let lat2_rad = to.lat.to_radians();
    let delta_lat = lat2_rad - lat1_rad;
    let delta_lng = to.lon.to_radians() - from.lon.to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    // Rounding can push `a` a hair past 1 for near-antipodal points.
    let c = 2.0 * a.min(1.0).sqrt().asin();

    EARTH_RADIUS_MILES * c
}
