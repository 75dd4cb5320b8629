//! Fuel station records and the in-memory station catalog.

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::coordinate::Coordinate;
use crate::traits::{StationCatalog, StationStore};

/// A priced truck stop as held by the catalog.
///
/// `location` is absent when geocoding failed; such stations stay in the
/// catalog but are never offered to the planner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelStation {
    pub id: String,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub rack_id: String,
    /// USD per gallon, never negative.
    pub retail_price: f64,
    pub location: Option<Coordinate>,
}

impl FuelStation {
    pub fn has_valid_price(&self) -> bool {
        self.retail_price.is_finite() && self.retail_price >= 0.0
    }

    /// The planning view of this station, if it has been geocoded and
    /// carries a valid price.
    pub fn geocoded(&self) -> Option<GeocodedStation> {
        if !self.has_valid_price() {
            return None;
        }
        self.location.map(|location| GeocodedStation {
            id: self.id.clone(),
            name: self.name.clone(),
            location,
            price_per_gallon: self.retail_price,
        })
    }
}

/// A station with a known location, as seen by a single planning pass.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodedStation {
    pub id: String,
    pub name: String,
    pub location: Coordinate,
    pub price_per_gallon: f64,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("catalog JSON is invalid: {0}")]
    Json(#[from] serde_json::Error),
    #[error("station {id} has invalid price {price}")]
    InvalidPrice { id: String, price: f64 },
}

/// Station store keyed by station id, preserving insertion order.
///
/// Insertion order is the catalog scan order, which decides ties between
/// equally priced candidates.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    stations: Vec<FuelStation>,
    index: HashMap<String, usize>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_stations(stations: impl IntoIterator<Item = FuelStation>) -> Self {
        let mut catalog = Self::new();
        for station in stations {
            catalog.upsert(station);
        }
        catalog
    }

    pub fn get(&self, id: &str) -> Option<&FuelStation> {
        self.index.get(id).and_then(|&i| self.stations.get(i))
    }

    pub fn stations(&self) -> &[FuelStation] {
        &self.stations
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    pub fn load_json(path: &Path) -> Result<Self, CatalogError> {
        let reader = BufReader::new(File::open(path)?);
        let stations: Vec<FuelStation> = serde_json::from_reader(reader)?;
        if let Some(bad) = stations.iter().find(|station| !station.has_valid_price()) {
            return Err(CatalogError::InvalidPrice {
                id: bad.id.clone(),
                price: bad.retail_price,
            });
        }
        debug!(count = stations.len(), path = %path.display(), "loaded station catalog");
        Ok(Self::from_stations(stations))
    }

    pub fn save_json(&self, path: &Path) -> Result<(), CatalogError> {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, &self.stations)?;
        Ok(())
    }
}

impl StationCatalog for MemoryCatalog {
    fn geocoded_stations(&self) -> Vec<GeocodedStation> {
        self.stations.iter().filter_map(FuelStation::geocoded).collect()
    }
}

impl StationStore for MemoryCatalog {
    fn upsert(&mut self, station: FuelStation) {
        match self.index.get(&station.id) {
            Some(&i) => self.stations[i] = station,
            None => {
                self.index.insert(station.id.clone(), self.stations.len());
                self.stations.push(station);
            }
        }
    }
}
