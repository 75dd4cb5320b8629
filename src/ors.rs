//! OpenRouteService HTTP adapter for driving directions.

use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::coordinate::Coordinate;
use crate::polyline::{Polyline, RouteGeometry};
use crate::traits::RouteProvider;

#[derive(Debug, Error)]
pub enum RouteError {
    /// Carries no URL, so credentials never reach messages or logs.
    #[error("routing request failed: {0}")]
    Http(reqwest::Error),
    #[error("no route features found in routing response")]
    NoRoute,
    #[error("malformed routing response: {0}")]
    Malformed(String),
    #[error("routing response contained no geometry")]
    EmptyGeometry,
}

impl From<reqwest::Error> for RouteError {
    fn from(err: reqwest::Error) -> Self {
        RouteError::Http(err.without_url())
    }
}

#[derive(Debug, Clone)]
pub struct OrsConfig {
    pub base_url: String,
    pub profile: String,
    pub api_key: String,
    pub timeout_secs: u64,
}

impl Default for OrsConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openrouteservice.org".to_string(),
            profile: "driving-car".to_string(),
            api_key: String::new(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OrsClient {
    config: OrsConfig,
    client: reqwest::blocking::Client,
}

impl OrsClient {
    pub fn new(config: OrsConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    fn directions_url(&self) -> String {
        format!(
            "{}/v2/directions/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.profile
        )
    }
}

impl RouteProvider for OrsClient {
    fn route(&self, origin: Coordinate, destination: Coordinate) -> Result<RouteGeometry, RouteError> {
        let start = origin.to_string();
        let end = destination.to_string();
        debug!(%start, %end, "requesting driving route");

        let body = self
            .client
            .get(self.directions_url())
            .header(AUTHORIZATION, self.config.api_key.as_str())
            .query(&[("start", start.as_str()), ("end", end.as_str())])
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.text())
            .map_err(RouteError::from)
            .inspect_err(|err| warn!(error = %err, "routing request failed"))?;

        parse_directions(&body)
    }
}

/// Extracts the first route from a GeoJSON directions response.
pub fn parse_directions(body: &str) -> Result<RouteGeometry, RouteError> {
    let response: DirectionsResponse =
        serde_json::from_str(body).map_err(|err| RouteError::Malformed(err.to_string()))?;

    let feature = response.features.into_iter().next().ok_or(RouteError::NoRoute)?;
    let geometry = feature
        .geometry
        .ok_or_else(|| RouteError::Malformed("missing geometry".to_string()))?;
    let summary = feature
        .properties
        .and_then(|properties| properties.summary)
        .ok_or_else(|| RouteError::Malformed("missing summary".to_string()))?;
    let distance_meters = summary
        .distance
        .ok_or_else(|| RouteError::Malformed("missing summary distance".to_string()))?;
    let duration_seconds = summary
        .duration
        .ok_or_else(|| RouteError::Malformed("missing summary duration".to_string()))?;

    if geometry.coordinates.is_empty() {
        return Err(RouteError::EmptyGeometry);
    }

    Ok(RouteGeometry {
        polyline: Polyline::from_lon_lat(&geometry.coordinates),
        distance_meters,
        duration_seconds,
    })
}

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    geometry: Option<Geometry>,
    properties: Option<Properties>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    coordinates: Vec<[f64; 2]>,
}

#[derive(Debug, Deserialize)]
struct Properties {
    summary: Option<Summary>,
}

#[derive(Debug, Deserialize)]
struct Summary {
    distance: Option<f64>,
    duration: Option<f64>,
}
