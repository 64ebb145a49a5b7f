//! Trip planning service.
//!
//! Ties the geocoder, the routing provider and the stop planner together:
//! two place names in, a priced refueling plan out.

mod error;
mod plan;

pub use error::{Endpoint, TripError};
pub use plan::{TripPlan, TripRequest, plan_trip};
