//! Trip planning error types.

use std::fmt;

use crate::geocode::GeocodeError;
use crate::route::{InvalidRoute, PolylineError};
use crate::routing::RoutingError;

/// Which end of the trip a location belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    End,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Endpoint::Start => "start",
            Endpoint::End => "end",
        })
    }
}

/// Errors from planning a trip.
#[derive(Debug, thiserror::Error)]
pub enum TripError {
    /// Start or end location was empty
    #[error("{0} location is required")]
    MissingLocation(Endpoint),

    /// A location could not be geocoded
    #[error("invalid {endpoint} location {query:?}: {source}")]
    InvalidLocation {
        endpoint: Endpoint,
        query: String,
        source: GeocodeError,
    },

    /// Routing provider failed or found no route
    #[error("could not plan route: {0}")]
    Routing(#[from] RoutingError),

    /// Route geometry could not be decoded
    #[error("could not plan route: {0}")]
    Geometry(#[from] PolylineError),

    /// Route geometry had no points
    #[error(transparent)]
    Route(#[from] InvalidRoute),

    /// The planning task panicked or was cancelled
    #[error("planning task failed: {0}")]
    Planning(String),
}
