//! Station candidate search around a stretch of route.

use crate::coordinate::Coordinate;
use crate::haversine::haversine_miles;
use crate::projection::CumulativeDistances;
use crate::station::GeocodedStation;

/// The part of the route searched once a stop becomes necessary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchWindow {
    /// First route-point index, inclusive.
    pub start: usize,
    /// Last route-point index, inclusive.
    pub end: usize,
    /// Stations must be strictly closer than this to some point in the window.
    pub proximity_miles: f64,
    /// Stations must lie strictly farther than this (straight line) from
    /// the route origin.
    pub last_stop_miles: f64,
}

/// A station projected onto the current planning pass.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateStop {
    pub location: Coordinate,
    pub price_per_gallon: f64,
    /// Straight-line distance from the route's first point.
    pub straight_line_from_start_miles: f64,
    pub station_id: String,
    pub station_name: String,
}

/// Source of candidate stations for a search window.
pub trait CandidateSource {
    fn candidates(
        &self,
        route: &[Coordinate],
        cumulative: &CumulativeDistances,
        window: SearchWindow,
    ) -> Vec<CandidateStop>;
}

/// Candidates drawn from a snapshot of the station catalog.
#[derive(Debug, Clone, Copy)]
pub struct CatalogCandidates<'a> {
    stations: &'a [GeocodedStation],
}

impl<'a> CatalogCandidates<'a> {
    pub fn new(stations: &'a [GeocodedStation]) -> Self {
        Self { stations }
    }
}

impl CandidateSource for CatalogCandidates<'_> {
    fn candidates(
        &self,
        route: &[Coordinate],
        _cumulative: &CumulativeDistances,
        window: SearchWindow,
    ) -> Vec<CandidateStop> {
        find_candidates(route, window, self.stations)
    }
}

/// Stations near `route[window.start..=window.end]` that lie ahead of the
/// last stop, in catalog order.
///
/// "Ahead" is judged by straight-line distance from the route origin, not
/// along-route distance, so sharply turning routes can misjudge it.
pub fn find_candidates(
    route: &[Coordinate],
    window: SearchWindow,
    stations: &[GeocodedStation],
) -> Vec<CandidateStop> {
    let Some(origin) = route.first().copied() else {
        return Vec::new();
    };
    let end = window.end.min(route.len() - 1);
    let segment = route.get(window.start..=end).unwrap_or_default();

    stations
        .iter()
        .filter(|station| {
            segment
                .iter()
                .any(|point| haversine_miles(station.location, *point) < window.proximity_miles)
        })
        .filter_map(|station| {
            let from_start = haversine_miles(origin, station.location);
            (from_start > window.last_stop_miles).then(|| CandidateStop {
                location: station.location,
                price_per_gallon: station.price_per_gallon,
                straight_line_from_start_miles: from_start,
                station_id: station.id.clone(),
                station_name: station.name.clone(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station(id: &str, lon: f64, lat: f64, price: f64) -> GeocodedStation {
        GeocodedStation {
            id: id.to_string(),
            name: format!("Station {}", id),
            location: Coordinate::new(lon, lat),
            price_per_gallon: price,
        }
    }

    // Equator route, one point per degree (~69 mi apart).
    fn route() -> Vec<Coordinate> {
        (0..5).map(|i| Coordinate::new(i as f64, 0.0)).collect()
    }

    fn window(start: usize, end: usize, last_stop_miles: f64) -> SearchWindow {
        SearchWindow {
            start,
            end,
            proximity_miles: 10.0,
            last_stop_miles,
        }
    }

    #[test]
    fn test_finds_stations_near_window_in_catalog_order() {
        let stations = [
            station("far", 2.0, 1.0, 2.50),
            station("b", 2.05, 0.05, 3.10),
            station("a", 1.0, 0.1, 3.00),
            station("outside", 4.0, 0.0, 2.00),
        ];

        let found = find_candidates(&route(), window(1, 2, 0.0), &stations);
        let ids: Vec<_> = found.iter().map(|c| c.station_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(found[1].price_per_gallon, 3.00);
    }

    #[test]
    fn test_excludes_stations_not_ahead_of_last_stop() {
        let stations = [station("behind", 1.0, 0.0, 3.00), station("ahead", 2.0, 0.0, 3.10)];

        // Station "behind" is ~69 mi from the origin.
        let found = find_candidates(&route(), window(0, 4, 100.0), &stations);
        let ids: Vec<_> = found.iter().map(|c| c.station_id.as_str()).collect();
        assert_eq!(ids, vec!["ahead"]);
        assert!(found[0].straight_line_from_start_miles > 100.0);
    }

    #[test]
    fn test_last_stop_comparison_is_strict() {
        let stations = [station("origin", 0.0, 0.0, 3.00)];
        assert!(find_candidates(&route(), window(0, 1, 0.0), &stations).is_empty());
    }

    #[test]
    fn test_proximity_comparison_is_strict() {
        // Exactly at the threshold distance from the only point in the window.
        let stations = [station("edge", 3.0, 0.0, 3.00)];
        let mut exact = window(2, 2, 0.0);
        exact.proximity_miles = haversine_miles(Coordinate::new(2.0, 0.0), Coordinate::new(3.0, 0.0));
        assert!(find_candidates(&route(), exact, &stations).is_empty());
    }

    #[test]
    fn test_window_end_is_clamped_to_route() {
        let stations = [station("end", 4.0, 0.05, 3.00)];
        let found = find_candidates(&route(), window(3, 99, 0.0), &stations);
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn test_empty_route_or_catalog_yields_nothing() {
        assert!(find_candidates(&[], window(0, 0, 0.0), &[station("x", 0.0, 0.0, 3.0)]).is_empty());
        assert!(find_candidates(&route(), window(0, 4, 0.0), &[]).is_empty());
    }
}
