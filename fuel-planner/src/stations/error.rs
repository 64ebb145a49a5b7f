//! Station store error types.

use std::path::PathBuf;

use crate::domain::StationId;

/// Errors from loading, saving or updating the station store.
#[derive(Debug, thiserror::Error)]
pub enum StationError {
    /// Store file could not be read
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Store file could not be written
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Store file is not valid station JSON
    #[error("invalid station file {}: {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// No record with this id
    #[error("unknown station {0}")]
    UnknownStation(StationId),

    /// Background load task panicked or was cancelled
    #[error("station load task failed: {0}")]
    Task(String),
}
