//! Fuel stop selection (greedy, range-constrained).
//!
//! Walks the route once. At each point where the remaining range can cover
//! neither the rest of the trip nor the gap to the next stop target, the
//! stations reachable on the current range are searched and the cheapest
//! one is taken. This is a local heuristic: it neither guarantees the
//! cheapest overall plan nor feasibility when no station is found.

use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, trace};

use crate::candidates::{CandidateSource, CandidateStop, SearchWindow};
use crate::coordinate::Coordinate;
use crate::projection::CumulativeDistances;

/// Truck range on a full tank, in miles.
pub const DEFAULT_MAX_RANGE_MILES: f64 = 500.0;

/// Stations farther than this from every point of a window are ignored.
pub const DEFAULT_PROXIMITY_THRESHOLD_MILES: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlannerOptions {
    pub max_range_miles: f64,
    pub proximity_threshold_miles: f64,
}

impl Default for PlannerOptions {
    fn default() -> Self {
        Self {
            max_range_miles: DEFAULT_MAX_RANGE_MILES,
            proximity_threshold_miles: DEFAULT_PROXIMITY_THRESHOLD_MILES,
        }
    }
}

/// A fuel stop chosen for the trip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectedStop {
    #[serde(serialize_with = "serialize_lat_lon")]
    pub location: Coordinate,
    #[serde(rename = "fuel_price_per_gallon")]
    pub price_per_gallon: f64,
    /// Along-route distance of the point that triggered the search.
    pub distance_from_start_miles: f64,
    pub station_id: String,
    pub station_name: String,
}

fn serialize_lat_lon<S: serde::Serializer>(location: &Coordinate, serializer: S) -> Result<S::Ok, S::Error> {
    location.lat_lon().serialize(serializer)
}

/// Range bookkeeping at one route index, derived from the last stop only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeState {
    pub current_distance: f64,
    /// Miles left before refuelling is mandatory.
    pub current_range: f64,
    pub remaining_total: f64,
    /// Route index at or after `last_stop + max_range`.
    pub target_index: usize,
    pub distance_to_target: f64,
}

impl RangeState {
    /// Computes the state at `index` for a vehicle that last refuelled at
    /// `last_stop_miles`.
    pub fn at(
        cumulative: &CumulativeDistances,
        index: usize,
        last_stop_miles: f64,
        total_miles: f64,
        max_range_miles: f64,
    ) -> Self {
        let current_distance = cumulative.at(index);
        let distance_since_last_stop = current_distance - last_stop_miles;
        let current_range = max_range_miles - distance_since_last_stop;
        let remaining_total = total_miles - current_distance;

        let target_index = cumulative.index_at_or_after(last_stop_miles + max_range_miles, index);
        let distance_to_target = cumulative.at(target_index) - current_distance;

        Self {
            current_distance,
            current_range,
            remaining_total,
            target_index,
            distance_to_target,
        }
    }

    /// Whether a stop search must run here: current range covers neither
    /// the rest of the trip nor the gap to the stop target.
    pub fn needs_stop(&self) -> bool {
        self.remaining_total > self.current_range && self.distance_to_target > self.current_range
    }

    /// Last route index still reachable on the current range.
    pub fn lookahead_index(&self, cumulative: &CumulativeDistances, index: usize) -> usize {
        cumulative.index_at_or_after(self.current_distance + self.current_range, index)
    }
}

/// Cheapest candidate; on equal prices the first one encountered wins.
pub fn select_cheapest(candidates: &[CandidateStop]) -> Option<&CandidateStop> {
    candidates.iter().fold(None, |best, candidate| match best {
        Some(current) if candidate.price_per_gallon >= current.price_per_gallon => Some(current),
        _ => Some(candidate),
    })
}

/// Drops stops whose location repeats an earlier one.
pub fn dedupe_by_location(stops: Vec<SelectedStop>) -> Vec<SelectedStop> {
    let mut seen = HashSet::new();
    stops
        .into_iter()
        .filter(|stop| seen.insert(stop.location.key()))
        .collect()
}

/// Selects fuel stops along `route`.
///
/// The result is deduplicated by location; it is in route order but callers
/// presenting it should still sort by distance from start.
pub fn select_stops<S: CandidateSource>(
    route: &[Coordinate],
    total_miles: f64,
    options: &PlannerOptions,
    source: &S,
) -> Vec<SelectedStop> {
    let cumulative = CumulativeDistances::from_route(route, total_miles);
    select_stops_with_table(route, &cumulative, total_miles, options, source)
}

/// [`select_stops`] over a precomputed cumulative-distance table.
pub fn select_stops_with_table<S: CandidateSource>(
    route: &[Coordinate],
    cumulative: &CumulativeDistances,
    total_miles: f64,
    options: &PlannerOptions,
    source: &S,
) -> Vec<SelectedStop> {
    let mut stops = Vec::new();
    let mut last_stop_miles = 0.0;

    for index in 0..route.len().min(cumulative.len()) {
        let state = RangeState::at(cumulative, index, last_stop_miles, total_miles, options.max_range_miles);
        if !state.needs_stop() {
            continue;
        }

        let window = SearchWindow {
            start: index,
            end: state.lookahead_index(cumulative, index),
            proximity_miles: options.proximity_threshold_miles,
            last_stop_miles,
        };
        trace!(?window, current_range = state.current_range, "searching for fuel stop");

        let candidates = source.candidates(route, cumulative, window);
        let Some(cheapest) = select_cheapest(&candidates) else {
            debug!(index, distance = state.current_distance, "no fuel station in reach");
            continue;
        };

        debug!(
            station = %cheapest.station_id,
            price = cheapest.price_per_gallon,
            distance = state.current_distance,
            "selected fuel stop"
        );
        stops.push(SelectedStop {
            location: cheapest.location,
            price_per_gallon: cheapest.price_per_gallon,
            distance_from_start_miles: state.current_distance,
            station_id: cheapest.station_id.clone(),
            station_name: cheapest.station_name.clone(),
        });
        last_stop_miles = state.current_distance;
    }

    dedupe_by_location(stops)
}
