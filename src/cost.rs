//! Fuel cost of a trip, priced segment by segment.
//!
//! The route is split at each selected stop. Fuel for a segment is bought
//! at the price in effect where the segment begins: the default price before
//! the first stop, the stop's own price afterwards.

use crate::coordinate::Coordinate;
use crate::projection::{CumulativeDistances, nearest_point_index};
use crate::solver::SelectedStop;

/// Truck fuel economy, miles per gallon.
pub const DEFAULT_FUEL_EFFICIENCY_MPG: f64 = 10.0;

/// Price assumed for fuel already in the tank at departure, USD per gallon.
pub const DEFAULT_PRICE_PER_GALLON: f64 = 3.00;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuelCostOptions {
    pub fuel_efficiency_mpg: f64,
    pub default_price_per_gallon: f64,
}

impl Default for FuelCostOptions {
    fn default() -> Self {
        Self {
            fuel_efficiency_mpg: DEFAULT_FUEL_EFFICIENCY_MPG,
            default_price_per_gallon: DEFAULT_PRICE_PER_GALLON,
        }
    }
}

/// Sorted along-route distances of start, every stop, and end.
///
/// Each stop is placed at the cumulative distance of its nearest route
/// point. On routes that pass near themselves two stops can map to the same
/// point or swap order; sorting hides the latter.
pub fn waypoint_distances(route: &[Coordinate], total_miles: f64, stops: &[SelectedStop]) -> Vec<f64> {
    let cumulative = CumulativeDistances::from_route(route, total_miles);

    let mut waypoints = Vec::with_capacity(stops.len() + 2);
    waypoints.push(0.0);
    waypoints.extend(stops.iter().map(|stop| {
        nearest_point_index(route, stop.location).map_or(0.0, |index| cumulative.at(index))
    }));
    waypoints.push(total_miles);
    waypoints.sort_by(f64::total_cmp);
    waypoints
}

/// Total fuel spend in USD for driving `route` with the given stops.
pub fn total_fuel_cost(
    route: &[Coordinate],
    total_miles: f64,
    stops: &[SelectedStop],
    options: &FuelCostOptions,
) -> f64 {
    let waypoints = waypoint_distances(route, total_miles, stops);

    waypoints
        .windows(2)
        .enumerate()
        .map(|(segment, pair)| {
            let segment_miles = pair[1] - pair[0];
            let price = segment_price(segment, stops, options.default_price_per_gallon);
            segment_miles / options.fuel_efficiency_mpg * price
        })
        .sum()
}

fn segment_price(segment: usize, stops: &[SelectedStop], default_price: f64) -> f64 {
    if segment == 0 {
        return default_price;
    }
    stops
        .get(segment - 1)
        .or_else(|| stops.last())
        .map_or(default_price, |stop| stop.price_per_gallon)
}
