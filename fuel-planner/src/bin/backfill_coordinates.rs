//! Geocode stations that are missing coordinates.
//!
//! Usage: `backfill-coordinates [STATIONS_JSON]`
//!
//! The store path defaults to `FUEL_PLANNER_STATIONS` (or
//! `data/stations.json`). Geocoding uses the same Nominatim settings as the
//! server. Progress is checkpointed to the store as it goes, so an
//! interrupted run can simply be restarted.

use std::error::Error;
use std::path::PathBuf;

use fuel_planner::config::AppConfig;
use fuel_planner::geocode::{NominatimClient, NominatimConfig};
use fuel_planner::stations::{BackfillConfig, StationStore, backfill_coordinates};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    fuel_planner::init_tracing();

    let config = AppConfig::from_env()?;
    let path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or(config.stations_path);

    let mut nominatim_config = NominatimConfig::new();
    if let Some(url) = config.nominatim_url {
        nominatim_config = nominatim_config.with_base_url(url);
    }
    if let Some(agent) = config.user_agent {
        nominatim_config = nominatim_config.with_user_agent(agent);
    }
    let geocoder = NominatimClient::new(nominatim_config)?;

    let mut store = StationStore::open(&path)?;
    tracing::info!(
        path = %path.display(),
        records = store.records().len(),
        "opened station store"
    );

    let report = backfill_coordinates(&mut store, &geocoder, &BackfillConfig::default()).await?;
    store.save()?;

    for failure in &report.failures {
        tracing::warn!(
            id = %failure.id,
            name = %failure.name,
            error = %failure.error,
            "not located"
        );
    }
    tracing::info!(
        updated = report.updated,
        failed = report.failed(),
        "backfill complete"
    );

    Ok(())
}
