use std::error::Error;

use fuel_planner::cache::{CacheConfig, CachedGeocoder};
use fuel_planner::config::AppConfig;
use fuel_planner::geocode::{NominatimClient, NominatimConfig};
use fuel_planner::routing::{OsrmClient, OsrmConfig};
use fuel_planner::stations::StationSnapshot;
use fuel_planner::web::{AppState, create_router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    fuel_planner::init_tracing();

    let config = AppConfig::from_env()?;

    // Create geocoding client
    let mut nominatim_config = NominatimConfig::new();
    if let Some(url) = &config.nominatim_url {
        nominatim_config = nominatim_config.with_base_url(url);
    }
    if let Some(agent) = &config.user_agent {
        nominatim_config = nominatim_config.with_user_agent(agent);
    }
    let nominatim = NominatimClient::new(nominatim_config)?;

    // Create cached geocoder
    let cache_config = CacheConfig::default();
    let geocoder = CachedGeocoder::new(nominatim, &cache_config);

    // Create routing client
    let mut osrm_config = OsrmConfig::new();
    if let Some(url) = &config.osrm_url {
        osrm_config = osrm_config.with_base_url(url);
    }
    let router = OsrmClient::new(osrm_config)?;

    // Load stations (fail fast if unavailable)
    let stations = StationSnapshot::load(&config.stations_path).await?;
    let count = stations.len().await;
    tracing::info!(count, path = %config.stations_path.display(), "loaded located stations");
    if count == 0 {
        tracing::warn!("no located stations; run backfill-coordinates to geocode the store");
    }

    // Spawn background task to pick up backfilled coordinates
    let stations_refresh = stations.clone();
    let refresh_interval = config.station_refresh;
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(refresh_interval);
        interval.tick().await; // First tick is immediate, skip it
        loop {
            interval.tick().await;
            match stations_refresh.refresh().await {
                Ok(count) => tracing::info!(count, "refreshed stations"),
                Err(e) => tracing::error!(error = %e, "failed to refresh stations"),
            }
        }
    });

    // Build app state
    let state = AppState::new(geocoder, router, stations, config.vehicle.clone());

    // Create router
    let static_dir = config.static_dir.to_string_lossy();
    let app = create_router(state, &static_dir);

    // Bind and serve
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "fuel stop planner listening");
    tracing::info!("  GET  /health     - Health check");
    tracing::info!("  GET  /about      - About page");
    tracing::info!("  POST /api/route  - Plan fuel stops");

    axum::serve(listener, app).await?;
    Ok(())
}
