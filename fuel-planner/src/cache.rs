//! Caching layer for geocoding results.
//!
//! Users tend to plan between the same handful of cities, and Nominatim's
//! public instance allows about one request per second. Successful lookups
//! are cached by normalized query; failures are never cached so a transient
//! outage doesn't stick.

use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::domain::Coordinate;
use crate::geocode::{GeocodeError, Geocoder};

/// Configuration for the geocode cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(24 * 60 * 60),
            max_capacity: 10_000,
        }
    }
}

/// Geocoder with caching.
///
/// Wraps any [`Geocoder`] and caches successful resolutions.
pub struct CachedGeocoder<G> {
    inner: G,
    cache: MokaCache<String, Coordinate>,
}

impl<G> CachedGeocoder<G> {
    pub fn new(inner: G, config: &CacheConfig) -> Self {
        let cache = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { inner, cache }
    }

    /// Access the wrapped geocoder for lookups that bypass the cache.
    pub fn inner(&self) -> &G {
        &self.inner
    }

    /// Get cache statistics.
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }
}

impl<G: Geocoder + Sync> Geocoder for CachedGeocoder<G> {
    async fn resolve(&self, query: &str) -> Result<Coordinate, GeocodeError> {
        let key = normalize_query(query);

        if let Some(cached) = self.cache.get(&key).await {
            tracing::debug!(query, "geocode cache hit");
            return Ok(cached);
        }

        let coordinate = self.inner.resolve(query).await?;
        self.cache.insert(key, coordinate).await;

        Ok(coordinate)
    }
}

/// Cache key for a query: lowercase with runs of whitespace collapsed.
fn normalize_query(query: &str) -> String {
    query
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
