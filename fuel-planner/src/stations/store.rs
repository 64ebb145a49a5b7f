//! File-backed station store.
//!
//! Stations live in a JSON array on disk. Records may lack coordinates until
//! the backfill tool has geocoded their address; only located records are
//! visible to the planner.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::{Coordinate, Station, StationId};

use super::error::StationError;

/// A persisted fuel station row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationRecord {
    /// Primary key within the store.
    pub id: u64,
    pub truckstop_id: u64,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub rack_id: u64,
    /// Dollars per gallon.
    pub retail_price: f64,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl StationRecord {
    pub fn station_id(&self) -> StationId {
        StationId(self.id)
    }

    pub fn has_coordinates(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }

    /// Free-text query used to geocode this station's address.
    pub fn geocode_query(&self) -> String {
        format!(
            "{}, {}, {}, USA",
            self.address.trim(),
            self.city.trim(),
            self.state.trim()
        )
    }

    /// Snapshot for planning, or `None` if the record has no usable location.
    pub fn to_station(&self) -> Option<Station> {
        let location = Coordinate::new(self.latitude?, self.longitude?).ok()?;
        Some(Station::new(
            self.station_id(),
            self.name.trim(),
            self.city.trim(),
            self.state.trim(),
            self.retail_price,
            location,
        ))
    }
}

/// Station records backed by a JSON file.
#[derive(Debug, Clone)]
pub struct StationStore {
    path: PathBuf,
    records: Vec<StationRecord>,
}

impl StationStore {
    /// Load the store from `path`.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StationError> {
        let path = path.into();
        let contents = std::fs::read_to_string(&path).map_err(|source| StationError::Read {
            path: path.clone(),
            source,
        })?;
        let records: Vec<StationRecord> =
            serde_json::from_str(&contents).map_err(|source| StationError::Json {
                path: path.clone(),
                source,
            })?;

        Ok(Self { path, records })
    }

    /// Create a store over in-memory records, to be saved at `path`.
    pub fn from_records(path: impl Into<PathBuf>, records: Vec<StationRecord>) -> Self {
        Self {
            path: path.into(),
            records,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn records(&self) -> &[StationRecord] {
        &self.records
    }

    /// Stations with valid coordinates, as planner snapshots.
    pub fn located(&self) -> Vec<Station> {
        self.records
            .iter()
            .filter_map(|record| {
                let station = record.to_station();
                if station.is_none() && record.has_coordinates() {
                    tracing::warn!(
                        id = record.id,
                        name = %record.name,
                        "skipping station with invalid coordinates"
                    );
                }
                station
            })
            .collect()
    }

    /// Records still waiting for coordinates.
    pub fn missing_coordinates(&self) -> impl Iterator<Item = &StationRecord> {
        self.records.iter().filter(|r| !r.has_coordinates())
    }

    /// Set the coordinates of the record with `id`.
    pub fn set_coordinates(
        &mut self,
        id: StationId,
        location: Coordinate,
    ) -> Result<(), StationError> {
        let record = self
            .records
            .iter_mut()
            .find(|r| r.station_id() == id)
            .ok_or(StationError::UnknownStation(id))?;

        record.latitude = Some(location.latitude());
        record.longitude = Some(location.longitude());
        Ok(())
    }

    /// Write the store back to its file.
    ///
    /// Writes to a sibling temporary file and renames it into place, creating
    /// parent directories if needed.
    pub fn save(&self) -> Result<(), StationError> {
        let write_err = |source| StationError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }

        let json = serde_json::to_string_pretty(&self.records).map_err(|source| {
            StationError::Json {
                path: self.path.clone(),
                source,
            }
        })?;

        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json).map_err(write_err)?;
        std::fs::rename(&tmp, &self.path).map_err(write_err)?;

        Ok(())
    }
}
