//! Trip planning: route, fuel stops and cost in one pass.

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::candidates::CatalogCandidates;
use crate::coordinate::Coordinate;
use crate::cost::{FuelCostOptions, total_fuel_cost};
use crate::ors::RouteError;
use crate::solver::{PlannerOptions, SelectedStop, select_stops};
use crate::traits::{RouteProvider, StationCatalog};

/// Meters in a statute mile.
pub const METERS_PER_MILE: f64 = 1609.34;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("could not plan route: {0}")]
    Routing(#[from] RouteError),
}

/// A priced trip with its fuel stops.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripPlan {
    pub total_distance_miles: f64,
    /// As reported by the routing provider.
    pub total_duration_seconds: f64,
    pub total_fuel_cost_usd: f64,
    /// Ordered by distance from start.
    pub fuel_stops: Vec<SelectedStop>,
    /// `[lat, lon]` pairs.
    pub route_geometry: Vec<[f64; 2]>,
}

pub struct TripPlanner<'a, R, C> {
    routes: &'a R,
    catalog: &'a C,
    options: PlannerOptions,
    cost_options: FuelCostOptions,
}

impl<'a, R, C> TripPlanner<'a, R, C>
where
    R: RouteProvider,
    C: StationCatalog,
{
    pub fn new(routes: &'a R, catalog: &'a C) -> Self {
        Self {
            routes,
            catalog,
            options: PlannerOptions::default(),
            cost_options: FuelCostOptions::default(),
        }
    }

    pub fn with_options(mut self, options: PlannerOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_cost_options(mut self, cost_options: FuelCostOptions) -> Self {
        self.cost_options = cost_options;
        self
    }

    pub fn plan(&self, origin: Coordinate, destination: Coordinate) -> Result<TripPlan, PlanError> {
        let route = self
            .routes
            .route(origin, destination)
            .inspect_err(|err| warn!(%origin, %destination, error = %err, "route lookup failed"))?;
        let total_miles = route.distance_meters / METERS_PER_MILE;
        let points = route.polyline.points();

        // One snapshot for the whole pass keeps candidate sets consistent.
        let stations = self.catalog.geocoded_stations();
        let source = CatalogCandidates::new(&stations);

        let mut stops = select_stops(points, total_miles, &self.options, &source);
        stops.sort_by(|a, b| a.distance_from_start_miles.total_cmp(&b.distance_from_start_miles));

        let fuel_cost = total_fuel_cost(points, total_miles, &stops, &self.cost_options);
        info!(
            miles = total_miles,
            stops = stops.len(),
            stations = stations.len(),
            cost = fuel_cost,
            "planned trip"
        );

        Ok(TripPlan {
            total_distance_miles: round2(total_miles),
            total_duration_seconds: route.duration_seconds,
            total_fuel_cost_usd: round2(fuel_cost),
            fuel_stops: stops,
            route_geometry: route.polyline.to_lat_lon(),
        })
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
