//! Collaborator seams for the trip planner.
//!
//! The planning core performs no I/O. Routes, stations and geocodes come in
//! through these traits so the HTTP adapters and the store can be swapped
//! for fixtures.

use crate::coordinate::Coordinate;
use crate::nominatim::GeocodeError;
use crate::ors::RouteError;
use crate::polyline::RouteGeometry;
use crate::station::{FuelStation, GeocodedStation};

/// Provides a driving route between two points.
pub trait RouteProvider {
    /// Any failure to produce a complete route is an error; partial routes
    /// are never returned.
    fn route(&self, origin: Coordinate, destination: Coordinate) -> Result<RouteGeometry, RouteError>;
}

/// Read access to priced stations.
pub trait StationCatalog {
    /// Snapshot of every station with a known location, in scan order.
    fn geocoded_stations(&self) -> Vec<GeocodedStation>;
}

/// Keyed write access used by the price import.
pub trait StationStore: StationCatalog {
    /// Inserts the station, or replaces the one with the same id.
    fn upsert(&mut self, station: FuelStation);
}

/// Resolves free-text addresses to coordinates.
pub trait Geocoder {
    /// `Ok(None)` when the address has no match.
    fn geocode(&self, address: &str) -> Result<Option<Coordinate>, GeocodeError>;
}
