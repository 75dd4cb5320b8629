//! Nominatim search adapter used to geocode station addresses at import time.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::coordinate::Coordinate;
use crate::traits::Geocoder;

#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("geocoding request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("malformed geocoding response: {0}")]
    Malformed(String),
}

#[derive(Debug, Clone)]
pub struct NominatimConfig {
    pub base_url: String,
    /// Nominatim's usage policy requires an identifying user agent.
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            base_url: "https://nominatim.openstreetmap.org".to_string(),
            user_agent: concat!("fuel-route-planner/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NominatimClient {
    config: NominatimConfig,
    client: reqwest::blocking::Client,
}

impl NominatimClient {
    pub fn new(config: NominatimConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { config, client })
    }
}

impl Geocoder for NominatimClient {
    fn geocode(&self, address: &str) -> Result<Option<Coordinate>, GeocodeError> {
        let url = format!("{}/search", self.config.base_url.trim_end_matches('/'));
        let body = self
            .client
            .get(url)
            .query(&[("q", address), ("format", "json"), ("limit", "1")])
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.text())?;

        let hit = parse_search(&body)?;
        debug!(address, found = hit.is_some(), "geocoded address");
        Ok(hit)
    }
}

/// First hit of a Nominatim `format=json` search, if any.
pub fn parse_search(body: &str) -> Result<Option<Coordinate>, GeocodeError> {
    let places: Vec<Place> =
        serde_json::from_str(body).map_err(|err| GeocodeError::Malformed(err.to_string()))?;

    let Some(place) = places.into_iter().next() else {
        return Ok(None);
    };
    let lat: f64 = place
        .lat
        .parse()
        .map_err(|_| GeocodeError::Malformed(format!("bad latitude '{}'", place.lat)))?;
    let lon: f64 = place
        .lon
        .parse()
        .map_err(|_| GeocodeError::Malformed(format!("bad longitude '{}'", place.lon)))?;

    Ok(Some(Coordinate::new(lon, lat)))
}

/// Nominatim returns coordinates as strings.
#[derive(Debug, Deserialize)]
struct Place {
    lat: String,
    lon: String,
}
