//! Domain types for the fuel route planner.
//!
//! These are validated value types shared by every layer. All types enforce
//! their invariants at construction time, so code that receives them can
//! trust their validity.

mod coord;
mod station;

pub use coord::{Coordinate, InvalidCoordinate};
pub use station::{Station, StationId};
