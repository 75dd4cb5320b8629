//! Polyline representation for route geometries.
//!
//! The routing provider returns geometry as `[lon, lat]` pairs; the planner
//! keeps that order internally and only flips to `[lat, lon]` when building
//! the display payload.

use serde::{Deserialize, Serialize};

use crate::coordinate::Coordinate;

/// A polyline representing a route geometry as decoded coordinates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<Coordinate>,
}

impl Polyline {
    /// Creates a new Polyline from decoded coordinate points.
    pub fn new(points: Vec<Coordinate>) -> Self {
        Self { points }
    }

    /// Builds a polyline from `[lon, lat]` pairs as found in GeoJSON.
    pub fn from_lon_lat(pairs: &[[f64; 2]]) -> Self {
        Self {
            points: pairs.iter().map(|[lon, lat]| Coordinate::new(*lon, *lat)).collect(),
        }
    }

    /// Returns a reference to the coordinate points.
    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// First point of the route, if any.
    pub fn origin(&self) -> Option<Coordinate> {
        self.points.first().copied()
    }

    /// The geometry re-expressed as `[lat, lon]` pairs for map display.
    pub fn to_lat_lon(&self) -> Vec<[f64; 2]> {
        self.points.iter().map(Coordinate::lat_lon).collect()
    }

    /// Consumes the polyline and returns the owned coordinate points.
    pub fn into_points(self) -> Vec<Coordinate> {
        self.points
    }
}

/// A driving route as produced by the routing collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteGeometry {
    pub polyline: Polyline,
    pub distance_meters: f64,
    /// Passed through to the trip plan unmodified.
    pub duration_seconds: f64,
}
