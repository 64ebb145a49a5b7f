//! Place-name geocoding.
//!
//! Turns human-entered locations ("Dallas, TX") into coordinates. The
//! production implementation talks to Nominatim; the [`Geocoder`] trait lets
//! the trip service and the backfill tool run against in-memory fakes.

mod client;
mod error;

use std::future::Future;

use crate::domain::Coordinate;

pub use client::{DEFAULT_BASE_URL, DEFAULT_USER_AGENT, NominatimClient, NominatimConfig};
pub use error::GeocodeError;

/// Resolves place names to coordinates.
pub trait Geocoder {
    /// Resolve `query` to the coordinates of its best match.
    fn resolve(&self, query: &str) -> impl Future<Output = Result<Coordinate, GeocodeError>> + Send;
}
