//! Refueling stop planner.
//!
//! This module answers: "Given this route and these stations, where should
//! the vehicle refuel, and how much should it buy at each stop?"
//!
//! Planning runs in two stages over a [`ProjectedRoute`](crate::route::ProjectedRoute):
//! stations are matched to their nearest route point, then a greedy pass
//! chooses stops. Both stages are pure and synchronous.

mod config;
mod matcher;
mod stops;


pub use config::{
    DEFAULT_CORRIDOR_THRESHOLD_MILES, DEFAULT_MILES_PER_GALLON, DEFAULT_TANK_CAPACITY_GALLONS,
    InvalidProfile, VehicleProfile,
};
pub use matcher::{MatchedStation, StationMatcher};
pub use stops::{PlanResult, Stop, StopPlanner, Termination};

use crate::domain::Station;
use crate::route::ProjectedRoute;

/// Match `stations` to `route` and plan stops for a trip of
/// `total_distance_miles`.
pub fn calculate_optimal_stops(
    route: &ProjectedRoute,
    stations: &[Station],
    total_distance_miles: f64,
    profile: &VehicleProfile,
) -> PlanResult {
    let matched =
        StationMatcher::new(route, profile.corridor_threshold_miles).match_all(stations);
    StopPlanner::new(profile).plan(&matched, total_distance_miles)
}
