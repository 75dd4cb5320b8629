use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use fuel_route_planner::config::Config;
use fuel_route_planner::ingest::{ImportOptions, import_prices};
use fuel_route_planner::nominatim::NominatimClient;
use fuel_route_planner::ors::OrsClient;
use fuel_route_planner::station::MemoryCatalog;
use fuel_route_planner::{Coordinate, TripPlanner};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Plan fuel stops for a truck trip
///
/// Settings such as ORS_API_KEY and NOMINATIM_USER_AGENT are read from the
/// environment.
#[derive(Parser)]
#[command(name = "fuel-route", version, about)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import a fuel price CSV, geocoding each station address
    Import {
        /// OPIS price export
        csv: PathBuf,

        /// Station catalog to create or update
        #[arg(long, default_value = "stations.json")]
        catalog: PathBuf,

        /// Geocoding attempts per address
        #[arg(long, default_value_t = 1)]
        attempts: u32,
    },
    /// Plan a trip and print it as JSON
    Plan {
        /// Origin as "longitude,latitude"
        #[arg(long, allow_hyphen_values = true)]
        start: Coordinate,

        /// Destination as "longitude,latitude"
        #[arg(long, allow_hyphen_values = true)]
        end: Coordinate,

        /// Station catalog produced by `import`
        #[arg(long, default_value = "stations.json")]
        catalog: PathBuf,

        /// Override the vehicle range
        #[arg(long)]
        max_range_miles: Option<f64>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();

    match cli.cmd {
        Commands::Import { csv, catalog, attempts } => import(&config, csv, catalog, attempts),
        Commands::Plan {
            start,
            end,
            catalog,
            max_range_miles,
        } => plan(&config, start, end, catalog, max_range_miles),
    }
}

fn import(config: &Config, csv: PathBuf, catalog_path: PathBuf, attempts: u32) -> Result<()> {
    let mut catalog = if catalog_path.exists() {
        MemoryCatalog::load_json(&catalog_path)
            .with_context(|| format!("reading {}", catalog_path.display()))?
    } else {
        MemoryCatalog::new()
    };
    let reader = BufReader::new(File::open(&csv).with_context(|| format!("opening {}", csv.display()))?);
    let geocoder = NominatimClient::new(config.nominatim.clone()).context("building geocoding client")?;
    let options = ImportOptions {
        attempts,
        ..ImportOptions::default()
    };

    let summary = import_prices(reader, &geocoder, &mut catalog, &options)?;
    catalog
        .save_json(&catalog_path)
        .with_context(|| format!("writing {}", catalog_path.display()))?;
    info!(?summary, catalog = %catalog_path.display(), "catalog saved");
    Ok(())
}

fn plan(
    config: &Config,
    start: Coordinate,
    end: Coordinate,
    catalog_path: PathBuf,
    max_range_miles: Option<f64>,
) -> Result<()> {
    if config.ors.api_key.is_empty() {
        bail!("ORS_API_KEY is not set");
    }
    let catalog = MemoryCatalog::load_json(&catalog_path)
        .with_context(|| format!("reading {}", catalog_path.display()))?;
    let routes = OrsClient::new(config.ors.clone()).context("building routing client")?;

    let mut options = config.planner;
    if let Some(range) = max_range_miles {
        options.max_range_miles = range;
    }

    let trip = TripPlanner::new(&routes, &catalog)
        .with_options(options)
        .with_cost_options(config.cost)
        .plan(start, end)?;

    serde_json::to_writer_pretty(io::stdout().lock(), &trip)?;
    println!();
    Ok(())
}
