//! Web layer for the fuel stop planner.
//!
//! Serves the trip form and the route planning endpoint.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
pub use templates::*;
