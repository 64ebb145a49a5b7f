//! Route geometry.
//!
//! Decodes the routing provider's encoded path and projects it onto a
//! cumulative-distance axis, so that stations can be placed at a mile marker
//! along the trip.

pub mod polyline;
mod projector;

pub use polyline::PolylineError;
pub use projector::{InvalidRoute, ProjectedRoute, RoutePoint};
