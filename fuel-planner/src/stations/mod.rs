//! Fuel station storage.
//!
//! Provides the JSON-file station store, the read-only snapshot that the
//! planner reads from, and the coordinate backfill used to locate stations
//! that were imported without coordinates.

mod backfill;
mod error;
mod snapshot;
mod store;

pub use backfill::{
    BackfillConfig, BackfillFailure, BackfillReport, backfill_coordinates, resolve_with_retry,
};
pub use error::StationError;
pub use snapshot::StationSnapshot;
pub use store::{StationRecord, StationStore};
