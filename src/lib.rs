//! fuel-route-planner
//!
//! Plans fuel stops for a truck trip along a driving route and prices the
//! trip segment by segment. The planning core is pure; routing, geocoding
//! and the station store sit behind the traits in [`traits`].

pub mod config;
pub mod coordinate;
pub mod haversine;
pub mod polyline;
pub mod projection;
pub mod station;
pub mod candidates;
pub mod solver;
pub mod cost;
pub mod planner;
pub mod traits;
pub mod ors;
pub mod nominatim;
pub mod ingest;

pub use coordinate::Coordinate;
pub use planner::{PlanError, TripPlan, TripPlanner};
