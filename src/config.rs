//! Configuration from environment.

use std::env;

use crate::cost::FuelCostOptions;
use crate::nominatim::NominatimConfig;
use crate::ors::OrsConfig;
use crate::solver::PlannerOptions;

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub ors: OrsConfig,
    pub nominatim: NominatimConfig,
    pub planner: PlannerOptions,
    pub cost: FuelCostOptions,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup; unset or unparseable
    /// values keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let number = |key: &str, default: f64| {
            lookup(key)
                .and_then(|s| s.trim().parse::<f64>().ok())
                .filter(|value| value.is_finite() && *value > 0.0)
                .unwrap_or(default)
        };
        let timeout_secs = lookup("HTTP_TIMEOUT_SECS")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(defaults.ors.timeout_secs);

        Self {
            ors: OrsConfig {
                base_url: lookup("ORS_BASE_URL").unwrap_or(defaults.ors.base_url),
                profile: lookup("ORS_PROFILE").unwrap_or(defaults.ors.profile),
                api_key: lookup("ORS_API_KEY").unwrap_or(defaults.ors.api_key),
                timeout_secs,
            },
            nominatim: NominatimConfig {
                base_url: lookup("NOMINATIM_URL").unwrap_or(defaults.nominatim.base_url),
                user_agent: lookup("NOMINATIM_USER_AGENT").unwrap_or(defaults.nominatim.user_agent),
                timeout_secs,
            },
            planner: PlannerOptions {
                max_range_miles: number("FUEL_MAX_RANGE_MILES", defaults.planner.max_range_miles),
                ..defaults.planner
            },
            cost: FuelCostOptions {
                fuel_efficiency_mpg: number("FUEL_MPG", defaults.cost.fuel_efficiency_mpg),
                ..defaults.cost
            },
        }
    }
}
