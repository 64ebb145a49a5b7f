//! Coordinate backfill for stations without a location.
//!
//! Geocodes each record's address one at a time, pacing requests to respect
//! the provider's rate limit. Rate-limit responses back off linearly
//! (`rate_limit_backoff * attempt`); timeouts and other transient failures
//! wait `retry_delay`. A station is given up on after `max_attempts`.

use std::time::Duration;

use crate::domain::{Coordinate, StationId};
use crate::geocode::{GeocodeError, Geocoder};

use super::error::StationError;
use super::store::StationStore;

/// Retry and pacing parameters for the backfill.
#[derive(Debug, Clone)]
pub struct BackfillConfig {
    /// Attempts per station, including the first.
    pub max_attempts: u32,

    /// Base wait after a 429; multiplied by the attempt number.
    pub rate_limit_backoff: Duration,

    /// Wait after a timeout or other transient failure.
    pub retry_delay: Duration,

    /// Pause between stations.
    pub request_interval: Duration,

    /// Save the store after this many updates (0 disables checkpoints).
    pub checkpoint_every: usize,
}

impl Default for BackfillConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            rate_limit_backoff: Duration::from_secs(5),
            retry_delay: Duration::from_secs(2),
            request_interval: Duration::from_secs(1),
            checkpoint_every: 25,
        }
    }
}

/// A station the backfill could not locate.
#[derive(Debug)]
pub struct BackfillFailure {
    pub id: StationId,
    pub name: String,
    pub error: GeocodeError,
}

/// Outcome of a backfill run.
#[derive(Debug, Default)]
pub struct BackfillReport {
    /// Records that were missing coordinates at the start.
    pub total: usize,
    pub updated: usize,
    pub failures: Vec<BackfillFailure>,
}

impl BackfillReport {
    pub fn failed(&self) -> usize {
        self.failures.len()
    }
}

/// Geocode every record in `store` that lacks coordinates.
///
/// Updates the store in memory and checkpoints it to disk every
/// `checkpoint_every` updates. The caller saves the final state.
pub async fn backfill_coordinates<G: Geocoder>(
    store: &mut StationStore,
    geocoder: &G,
    config: &BackfillConfig,
) -> Result<BackfillReport, StationError> {
    let pending: Vec<(StationId, String, String)> = store
        .missing_coordinates()
        .map(|r| (r.station_id(), r.name.clone(), r.geocode_query()))
        .collect();

    let mut report = BackfillReport {
        total: pending.len(),
        ..BackfillReport::default()
    };

    if pending.is_empty() {
        tracing::info!("all stations already have coordinates");
        return Ok(report);
    }

    tracing::info!(pending = report.total, "starting coordinate backfill");

    for (index, (id, name, query)) in pending.into_iter().enumerate() {
        let progress = format!("{}/{}", index + 1, report.total);

        match resolve_with_retry(geocoder, &query, config).await {
            Ok(location) => {
                store.set_coordinates(id, location)?;
                report.updated += 1;
                tracing::info!(%progress, %id, %name, %location, "updated");

                if config.checkpoint_every > 0 && report.updated % config.checkpoint_every == 0 {
                    store.save()?;
                    tracing::debug!(updated = report.updated, "checkpoint saved");
                }
            }
            Err(error) => {
                tracing::warn!(%progress, %id, %name, %error, "could not geocode station");
                report.failures.push(BackfillFailure { id, name, error });
            }
        }

        if index + 1 < report.total {
            tokio::time::sleep(config.request_interval).await;
        }
    }

    tracing::info!(
        updated = report.updated,
        failed = report.failed(),
        "coordinate backfill finished"
    );

    Ok(report)
}

/// Resolve `query`, retrying transient failures per `config`.
pub async fn resolve_with_retry<G: Geocoder>(
    geocoder: &G,
    query: &str,
    config: &BackfillConfig,
) -> Result<Coordinate, GeocodeError> {
    let mut attempt: u32 = 1;

    loop {
        let error = match geocoder.resolve(query).await {
            Ok(location) => return Ok(location),
            Err(e) => e,
        };

        if attempt >= config.max_attempts || !error.is_transient() {
            return Err(error);
        }

        let wait = match error {
            GeocodeError::RateLimited => config.rate_limit_backoff * attempt,
            _ => config.retry_delay,
        };
        tracing::warn!(query, attempt, ?wait, %error, "retrying geocode");
        tokio::time::sleep(wait).await;

        attempt += 1;
    }
}
