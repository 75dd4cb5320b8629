//! Geographic coordinate value type.
//!
//! Coordinates are stored as (longitude, latitude) in degrees, matching the
//! order used by the routing provider. Display payloads use `[lat, lon]`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A point on the Earth's surface in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lon: f64,
    pub lat: f64,
}

impl Coordinate {
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Returns the point as a `[latitude, longitude]` pair for display.
    pub fn lat_lon(&self) -> [f64; 2] {
        [self.lat, self.lon]
    }

    /// Hashable identity of the point, bit-exact.
    pub(crate) fn key(&self) -> (u64, u64) {
        // Adding 0.0 folds -0.0 into 0.0.
        ((self.lon + 0.0).to_bits(), (self.lat + 0.0).to_bits())
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lon, self.lat)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordinateError {
    #[error("invalid coordinate format '{0}', expected 'longitude,latitude'")]
    Format(String),
    #[error("longitude {0} is outside [-180, 180]")]
    Longitude(f64),
    #[error("latitude {0} is outside [-90, 90]")]
    Latitude(f64),
}

impl FromStr for Coordinate {
    type Err = CoordinateError;

    /// Parses `"longitude,latitude"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let format_err = || CoordinateError::Format(s.to_string());

        let (lon_str, lat_str) = s.split_once(',').ok_or_else(format_err)?;
        if lat_str.contains(',') {
            return Err(format_err());
        }
        let lon: f64 = lon_str.trim().parse().map_err(|_| format_err())?;
        let lat: f64 = lat_str.trim().parse().map_err(|_| format_err())?;

        if !(-180.0..=180.0).contains(&lon) {
            return Err(CoordinateError::Longitude(lon));
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(CoordinateError::Latitude(lat));
        }

        Ok(Self { lon, lat })
    }
}
