//! Shared read-only station snapshot.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::Station;

use super::error::StationError;
use super::store::StationStore;

/// Thread-safe snapshot of located stations.
///
/// Requests take an `Arc` of the current station list and plan against it;
/// a refresh swaps in a new list without disturbing plans in flight.
#[derive(Clone)]
pub struct StationSnapshot {
    inner: Arc<RwLock<Arc<[Station]>>>,
    source: Option<PathBuf>,
}

impl StationSnapshot {
    /// Load located stations from the store at `path`.
    pub async fn load(path: impl Into<PathBuf>) -> Result<Self, StationError> {
        let path = path.into();
        let stations = read_located(path.clone()).await?;

        Ok(Self {
            inner: Arc::new(RwLock::new(stations.into())),
            source: Some(path),
        })
    }

    /// Create a fixed snapshot with no backing file.
    pub fn from_stations(stations: Vec<Station>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(stations.into())),
            source: None,
        }
    }

    /// The current station list.
    pub async fn current(&self) -> Arc<[Station]> {
        let guard = self.inner.read().await;
        Arc::clone(&guard)
    }

    /// Get the number of stations in the snapshot.
    pub async fn len(&self) -> usize {
        let guard = self.inner.read().await;
        guard.len()
    }

    pub async fn is_empty(&self) -> bool {
        let guard = self.inner.read().await;
        guard.is_empty()
    }

    /// Reload the station list from the backing file.
    ///
    /// On success, replaces the current list. On failure, the existing list
    /// is preserved and the error is returned. Snapshots without a backing
    /// file are left unchanged.
    pub async fn refresh(&self) -> Result<usize, StationError> {
        let Some(path) = &self.source else {
            return Ok(self.len().await);
        };

        let stations = read_located(path.clone()).await?;
        let count = stations.len();

        let mut guard = self.inner.write().await;
        *guard = stations.into();

        Ok(count)
    }
}

async fn read_located(path: PathBuf) -> Result<Vec<Station>, StationError> {
    tokio::task::spawn_blocking(move || StationStore::open(path).map(|store| store.located()))
        .await
        .map_err(|e| StationError::Task(e.to_string()))?
}
