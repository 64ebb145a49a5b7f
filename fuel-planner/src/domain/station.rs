//! Fuel station snapshots.

use std::fmt;

use super::Coordinate;

/// Identifier of a fuel station in the station store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationId(pub u64);

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A fuel station with a known location, as seen by the planner.
///
/// This is a read-only snapshot: stations are loaded from the store once,
/// converted into `Station` values, and never mutated while planning.
/// Stations without coordinates cannot be represented here and are
/// excluded at load time.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    pub id: StationId,
    pub name: String,
    pub city: String,
    pub state: String,
    /// Retail price in dollars per gallon.
    pub price_per_gallon: f64,
    pub location: Coordinate,
}

impl Station {
    pub fn new(
        id: StationId,
        name: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        price_per_gallon: f64,
        location: Coordinate,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            city: city.into(),
            state: state.into(),
            price_per_gallon,
            location,
        }
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}, {}", self.name, self.city, self.state)
    }
}
