//! Greedy refueling stop selection.
//!
//! At each step the vehicle drives to the cheapest station it can reach on
//! its current fuel. There it buys only enough to reach the nearest strictly
//! cheaper station within one tank's range; with no cheaper station ahead it
//! fills the tank (long remainder) or buys exactly enough to finish the trip.
//!
//! This is a myopic heuristic, not a global optimum. It never strands the
//! vehicle while some station is reachable at every step.

use crate::domain::{Coordinate, StationId};

use super::config::VehicleProfile;
use super::matcher::MatchedStation;

/// A refueling stop in a plan.
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    pub station_id: StationId,
    pub station_name: String,
    pub city: String,
    pub state: String,
    pub price_per_gallon: f64,
    /// Gallons bought here, within `[0, tank capacity]`.
    pub gallons_filled: f64,
    /// `gallons_filled * price_per_gallon`.
    pub fuel_cost: f64,
    pub location: Coordinate,
    pub miles_from_start: f64,
}

impl Stop {
    fn at(matched: &MatchedStation<'_>, gallons_filled: f64, fuel_cost: f64) -> Self {
        let station = matched.station;
        Self {
            station_id: station.id,
            station_name: station.name.clone(),
            city: station.city.clone(),
            state: station.state.clone(),
            price_per_gallon: station.price_per_gallon,
            gallons_filled,
            fuel_cost,
            location: station.location,
            miles_from_start: matched.mile_marker,
        }
    }
}

/// Why the planning loop stopped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Termination {
    /// The destination is reachable with the fuel on board.
    Completed,

    /// No station is reachable from the last position; the plan is partial.
    Stranded {
        /// Position when planning stopped (miles from start).
        position_miles: f64,
        /// Fuel on board at that position (gallons).
        fuel_remaining: f64,
    },
}

/// Output of the stop planner.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanResult {
    /// Stops in travel order.
    pub stops: Vec<Stop>,
    /// Sum of `fuel_cost` over all stops.
    pub total_cost: f64,
    pub termination: Termination,
}

impl PlanResult {
    /// Whether the stops actually get the vehicle to its destination.
    pub fn trip_completed(&self) -> bool {
        self.termination == Termination::Completed
    }
}

/// Plans refueling stops for one trip.
#[derive(Debug, Clone, Copy)]
pub struct StopPlanner<'a> {
    profile: &'a VehicleProfile,
}

impl<'a> StopPlanner<'a> {
    pub fn new(profile: &'a VehicleProfile) -> Self {
        Self { profile }
    }

    /// Select stops along a route of `total_distance_miles`.
    ///
    /// `stations` must be ordered by mile marker, as produced by
    /// [`StationMatcher::match_all`](super::StationMatcher::match_all).
    /// The vehicle starts at mile 0 with a full tank.
    pub fn plan(&self, stations: &[MatchedStation<'_>], total_distance_miles: f64) -> PlanResult {
        debug_assert!(
            stations
                .windows(2)
                .all(|w| w[0].mile_marker <= w[1].mile_marker),
            "stations must be sorted by mile marker"
        );

        let tank = self.profile.tank_capacity_gallons;
        let mut position = 0.0;
        let mut fuel = tank;
        let mut stops = Vec::new();
        let mut total_cost = 0.0;

        let termination = loop {
            let max_reach = position + fuel * self.profile.miles_per_gallon;
            if max_reach >= total_distance_miles {
                break Termination::Completed;
            }

            let Some(cheapest) = stations
                .iter()
                .filter(|s| s.mile_marker > position && s.mile_marker <= max_reach)
                .min_by(|a, b| a.price().total_cmp(&b.price()))
            else {
                tracing::warn!(
                    position_miles = position,
                    fuel_remaining = fuel,
                    total_distance_miles,
                    "no reachable station, returning partial plan"
                );
                break Termination::Stranded {
                    position_miles: position,
                    fuel_remaining: fuel,
                };
            };

            fuel -= self.profile.gallons_for(cheapest.mile_marker - position);
            position = cheapest.mile_marker;

            let (needed, finishes_trip) =
                self.gallons_needed(stations, cheapest, fuel, total_distance_miles);
            let gallons = needed.clamp(0.0, tank);
            if gallons <= 0.0 {
                tracing::debug!(
                    station = %cheapest.station,
                    position_miles = position,
                    "passing station without refueling"
                );
                continue;
            }

            let fuel_cost = gallons * cheapest.price();
            fuel += gallons;
            total_cost += fuel_cost;
            stops.push(Stop::at(cheapest, gallons, fuel_cost));

            // Bought exactly the remaining distance; recomputing reach could
            // fall short by a rounding error.
            if finishes_trip {
                break Termination::Completed;
            }
        };

        PlanResult {
            stops,
            total_cost,
            termination,
        }
    }

    /// Gallons to buy at `current`, before clamping, and whether that
    /// purchase is sized to finish the trip.
    fn gallons_needed(
        &self,
        stations: &[MatchedStation<'_>],
        current: &MatchedStation<'_>,
        fuel: f64,
        total_distance_miles: f64,
    ) -> (f64, bool) {
        let position = current.mile_marker;
        let horizon = position + self.profile.max_range_miles();

        let cheaper_ahead = stations
            .iter()
            .filter(|s| s.mile_marker > position && s.mile_marker <= horizon)
            .find(|s| s.price() < current.price());

        if let Some(next) = cheaper_ahead {
            return (self.profile.gallons_for(next.mile_marker - position) - fuel, false);
        }

        let remaining_trip = total_distance_miles - position;
        if remaining_trip > self.profile.max_range_miles() {
            (self.profile.tank_capacity_gallons - fuel, false)
        } else {
            (self.profile.gallons_for(remaining_trip) - fuel, true)
        }
    }
}
