//! Interstate 40, Oklahoma City to Albuquerque.
//!
//! Route points follow the interstate through Clinton, Shamrock, Amarillo,
//! Tucumcari, Santa Rosa and Clines Corners (~521 miles great-circle).

use fuel_route_planner::Coordinate;
use fuel_route_planner::haversine::haversine_miles;
use fuel_route_planner::planner::METERS_PER_MILE;
use fuel_route_planner::polyline::{Polyline, RouteGeometry};
use fuel_route_planner::station::{FuelStation, MemoryCatalog};

pub const OKLAHOMA_CITY: Coordinate = Coordinate::new(-97.5164, 35.4676);
pub const ALBUQUERQUE: Coordinate = Coordinate::new(-106.650, 35.084);

pub const ROUTE: &[Coordinate] = &[
    OKLAHOMA_CITY,
    Coordinate::new(-98.2, 35.50),
    Coordinate::new(-98.967, 35.515),
    Coordinate::new(-99.6, 35.40),
    Coordinate::new(-100.249, 35.226),
    Coordinate::new(-101.0, 35.21),
    Coordinate::new(-101.831, 35.222),
    Coordinate::new(-102.8, 35.19),
    Coordinate::new(-103.725, 35.171),
    Coordinate::new(-104.682, 34.938),
    Coordinate::new(-105.668, 35.008),
    ALBUQUERQUE,
];

/// A named, priced truck stop.
#[derive(Debug, Clone)]
pub struct TruckStop {
    pub id: &'static str,
    pub name: &'static str,
    pub city: &'static str,
    pub state: &'static str,
    pub location: Option<(f64, f64)>,
    pub price: f64,
}

impl TruckStop {
    pub const fn new(
        id: &'static str,
        name: &'static str,
        city: &'static str,
        state: &'static str,
        location: Option<(f64, f64)>,
        price: f64,
    ) -> Self {
        Self {
            id,
            name,
            city,
            state,
            location,
            price,
        }
    }

    pub fn to_station(&self) -> FuelStation {
        FuelStation {
            id: self.id.to_string(),
            name: self.name.to_string(),
            address: "I-40".to_string(),
            city: self.city.to_string(),
            state: self.state.to_string(),
            rack_id: "0".to_string(),
            retail_price: self.price,
            location: self.location.map(|(lon, lat)| Coordinate::new(lon, lat)),
        }
    }
}

pub const TRUCK_STOPS: &[TruckStop] = &[
    TruckStop::new("okc-1", "OKC Love's", "Oklahoma City", "OK", Some((-97.60, 35.47)), 3.05),
    TruckStop::new("clinton-1", "Clinton Pilot", "Clinton", "OK", Some((-98.97, 35.52)), 3.29),
    TruckStop::new("clinton-2", "Clinton TA", "Clinton", "OK", Some((-98.95, 35.50)), 3.19),
    TruckStop::new("shamrock-1", "Shamrock Flying J", "Shamrock", "TX", Some((-100.25, 35.23)), 3.09),
    TruckStop::new("amarillo-1", "Amarillo Love's", "Amarillo", "TX", Some((-101.83, 35.23)), 2.99),
    TruckStop::new("amarillo-2", "Amarillo Petro", "Amarillo", "TX", Some((-101.80, 35.20)), 3.15),
    TruckStop::new("tucumcari-1", "Tucumcari Pilot", "Tucumcari", "NM", Some((-103.72, 35.17)), 3.45),
    TruckStop::new("santarosa-1", "Santa Rosa Love's", "Santa Rosa", "NM", Some((-104.68, 34.94)), 3.39),
    TruckStop::new("clines-1", "Clines Corners", "Clines Corners", "NM", Some((-105.67, 35.01)), 3.59),
    // Cheapest in the file but never usable: no location.
    TruckStop::new("nocoords", "Ungeocoded Stop", "Vega", "TX", None, 1.00),
    // Cheap but ~113 miles off the interstate.
    TruckStop::new("lubbock-1", "Lubbock Stop", "Lubbock", "TX", Some((-101.85, 33.58)), 2.50),
];

pub fn route_length_miles() -> f64 {
    ROUTE.windows(2).map(|p| haversine_miles(p[0], p[1])).sum()
}

/// The corridor as the routing provider would report it.
pub fn corridor_route() -> RouteGeometry {
    RouteGeometry {
        polyline: Polyline::new(ROUTE.to_vec()),
        distance_meters: route_length_miles() * METERS_PER_MILE,
        duration_seconds: 27_900.0,
    }
}

pub fn corridor_catalog() -> MemoryCatalog {
    MemoryCatalog::from_stations(TRUCK_STOPS.iter().map(TruckStop::to_station))
}
