//! Fuel price CSV import.
//!
//! Each row is geocoded from its address and upserted into the station
//! store by OPIS truckstop id. Rows that cannot be geocoded are still
//! stored, without a location.

use std::io::Read;
use std::thread;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::coordinate::Coordinate;
use crate::station::FuelStation;
use crate::traits::{Geocoder, StationStore};

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("could not read price file: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImportOptions {
    /// Geocoding attempts per address while no match is found.
    pub attempts: u32,
    pub retry_delay: Duration,
    /// Pause after every geocoding call, for provider rate limits.
    pub request_interval: Duration,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            attempts: 1,
            retry_delay: Duration::from_secs(2),
            request_interval: Duration::from_secs(1),
        }
    }
}

impl ImportOptions {
    /// No sleeping; for local geocoders and tests.
    pub fn immediate() -> Self {
        Self {
            retry_delay: Duration::ZERO,
            request_interval: Duration::ZERO,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub processed: usize,
    pub geocoded: usize,
    pub failed: usize,
}

/// One row of the OPIS price export.
#[derive(Debug, Clone, Deserialize)]
pub struct PriceRow {
    #[serde(rename = "OPIS Truckstop ID", default)]
    pub opis_id: String,
    #[serde(rename = "Truckstop Name", default)]
    pub name: String,
    #[serde(rename = "Address", default)]
    pub address: String,
    #[serde(rename = "City", default)]
    pub city: String,
    #[serde(rename = "State", default)]
    pub state: String,
    #[serde(rename = "Rack ID", default)]
    pub rack_id: String,
    #[serde(rename = "Retail Price", default)]
    pub retail_price: f64,
}

impl PriceRow {
    /// `"Address, City, State, USA"`, skipping empty parts.
    pub fn full_address(&self) -> String {
        [self.address.trim(), self.city.trim(), self.state.trim(), "USA"]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn into_station(self, location: Option<Coordinate>) -> FuelStation {
        FuelStation {
            id: self.opis_id.trim().to_string(),
            name: self.name.trim().to_string(),
            address: self.address.trim().to_string(),
            city: self.city.trim().to_string(),
            state: self.state.trim().to_string(),
            rack_id: self.rack_id.trim().to_string(),
            retail_price: self.retail_price,
            location,
        }
    }
}

/// Imports every row of `reader` into `store`.
///
/// Per-row problems are counted in the summary; only an unreadable header
/// aborts the import.
pub fn import_prices<R, G, S>(
    reader: R,
    geocoder: &G,
    store: &mut S,
    options: &ImportOptions,
) -> Result<ImportSummary, IngestError>
where
    R: Read,
    G: Geocoder,
    S: StationStore,
{
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    csv_reader.headers()?;

    let mut summary = ImportSummary::default();
    for record in csv_reader.deserialize::<PriceRow>() {
        let row = match record {
            Ok(row) => row,
            Err(err) => {
                error!(line = record_line(&err), error = %err, "skipping unreadable price row");
                summary.failed += 1;
                continue;
            }
        };
        if !(row.retail_price >= 0.0) {
            error!(id = %row.opis_id, price = row.retail_price, "skipping row with invalid price");
            summary.failed += 1;
            continue;
        }

        let address = row.full_address();
        let location = geocode_with_retries(geocoder, &address, options);
        if location.is_some() {
            summary.geocoded += 1;
        } else {
            warn!(id = %row.opis_id, %address, "stored station without location");
        }

        store.upsert(row.into_station(location));
        summary.processed += 1;
    }

    info!(
        processed = summary.processed,
        geocoded = summary.geocoded,
        failed = summary.failed,
        "price import finished"
    );
    Ok(summary)
}

/// Retries only on "no match"; a geocoder error gives up on the address.
fn geocode_with_retries<G: Geocoder>(geocoder: &G, address: &str, options: &ImportOptions) -> Option<Coordinate> {
    let attempts = options.attempts.max(1);
    for attempt in 1..=attempts {
        let result = geocoder.geocode(address);
        pause(options.request_interval);

        match result {
            Ok(Some(location)) => return Some(location),
            Ok(None) => {
                warn!(%address, attempt, attempts, "address not found");
                if attempt < attempts {
                    pause(options.retry_delay);
                }
            }
            Err(err) => {
                error!(%address, error = %err, "geocoding failed");
                return None;
            }
        }
    }
    None
}

/// Line on which the failing record starts; quoted fields may span lines.
fn record_line(err: &csv::Error) -> Option<u64> {
    err.position().map(|pos| pos.line())
}

fn pause(duration: Duration) {
    if !duration.is_zero() {
        thread::sleep(duration);
    }
}
