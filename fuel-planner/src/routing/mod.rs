//! Driving route provider.
//!
//! Computes the road route between two coordinates. The production
//! implementation uses OSRM's `route` service with full-overview polyline
//! geometry; the [`RouteProvider`] trait allows tests to supply fixed routes.

mod client;
mod error;
mod types;

use std::future::Future;

use crate::domain::Coordinate;

pub use client::{DEFAULT_BASE_URL, OsrmClient, OsrmConfig};
pub use error::RoutingError;
pub use types::{MILES_PER_METER, OsrmResponse, OsrmRoute, RouteSummary};

/// Computes driving routes.
pub trait RouteProvider {
    fn compute_route(
        &self,
        start: Coordinate,
        end: Coordinate,
    ) -> impl Future<Output = Result<RouteSummary, RoutingError>> + Send;
}
