//! Test fixtures for fuel-route-planner.
//!
//! Provides an Interstate 40 corridor from Oklahoma City to Albuquerque
//! with truck stops along it, plus stub collaborators.

#![allow(dead_code)]

pub mod i40_corridor;

pub use i40_corridor::*;

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use fuel_route_planner::Coordinate;
use fuel_route_planner::nominatim::GeocodeError;
use fuel_route_planner::ors::RouteError;
use fuel_route_planner::polyline::RouteGeometry;
use fuel_route_planner::traits::{Geocoder, RouteProvider};

/// Returns the same route for every request.
pub struct MockRoutes {
    pub route: RouteGeometry,
    pub calls: Cell<usize>,
}

impl MockRoutes {
    pub fn new(route: RouteGeometry) -> Self {
        Self {
            route,
            calls: Cell::new(0),
        }
    }
}

impl RouteProvider for MockRoutes {
    fn route(&self, _origin: Coordinate, _destination: Coordinate) -> Result<RouteGeometry, RouteError> {
        self.calls.set(self.calls.get() + 1);
        Ok(self.route.clone())
    }
}

/// Always fails, as an unreachable routing service would.
pub struct FailingRoutes;

impl RouteProvider for FailingRoutes {
    fn route(&self, _origin: Coordinate, _destination: Coordinate) -> Result<RouteGeometry, RouteError> {
        Err(RouteError::NoRoute)
    }
}

/// Geocoder backed by a fixed address table, recording every lookup.
#[derive(Default)]
pub struct StubGeocoder {
    pub known: HashMap<String, Coordinate>,
    /// Addresses for which the geocoder reports an error.
    pub broken: Vec<String>,
    pub lookups: RefCell<Vec<String>>,
}

impl StubGeocoder {
    pub fn with(mut self, address: &str, location: Coordinate) -> Self {
        self.known.insert(address.to_string(), location);
        self
    }

    pub fn broken_for(mut self, address: &str) -> Self {
        self.broken.push(address.to_string());
        self
    }

    pub fn lookups_of(&self, address: &str) -> usize {
        self.lookups.borrow().iter().filter(|a| *a == address).count()
    }
}

impl Geocoder for StubGeocoder {
    fn geocode(&self, address: &str) -> Result<Option<Coordinate>, GeocodeError> {
        self.lookups.borrow_mut().push(address.to_string());
        if self.broken.iter().any(|a| a == address) {
            return Err(GeocodeError::Malformed("stub failure".to_string()));
        }
        Ok(self.known.get(address).copied())
    }
}
