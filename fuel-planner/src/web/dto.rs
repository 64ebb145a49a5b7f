//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::planner::{Stop, Termination};
use crate::trip::{TripPlan, TripRequest};

/// Request to plan fuel stops for a trip.
///
/// Missing fields deserialize as empty and are rejected by trip validation,
/// so both cases produce the same error.
#[derive(Debug, Deserialize)]
pub struct PlanRouteRequest {
    /// Start location, e.g. "Dallas, TX"
    #[serde(default)]
    pub start: String,

    /// End location
    #[serde(default)]
    pub end: String,
}

impl From<PlanRouteRequest> for TripRequest {
    fn from(req: PlanRouteRequest) -> Self {
        TripRequest::new(req.start, req.end)
    }
}

/// A planned trip.
#[derive(Debug, Serialize)]
pub struct PlanRouteResponse {
    /// Road distance in miles
    pub distance_miles: f64,

    /// Driving time in hours
    pub duration_hours: f64,

    /// Fuel burned over the whole trip
    pub total_gallons_needed: f64,

    /// Number of refueling stops
    pub stops_required: usize,

    /// Total spent on fuel, in dollars
    pub total_fuel_cost: f64,

    /// Stops in travel order
    pub fuel_stops: Vec<FuelStopResult>,

    /// False if the vehicle cannot reach the destination with these stops
    pub trip_completed: bool,

    /// Where planning stopped, for incomplete trips
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stranded_at_mile: Option<f64>,

    /// Encoded polyline of the route
    pub route_geometry: String,
}

/// A refueling stop.
#[derive(Debug, Serialize)]
pub struct FuelStopResult {
    pub station_id: u64,
    pub station_name: String,
    pub city: String,
    pub state: String,
    pub price_per_gallon: f64,
    pub gallons_filled: f64,
    pub fuel_cost: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub miles_from_start: f64,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

// Conversion implementations

impl PlanRouteResponse {
    /// Create from a trip plan, rounding quantities to cents and hundredths.
    pub fn from_trip(trip: &TripPlan) -> Self {
        let stranded_at_mile = match trip.plan.termination {
            Termination::Completed => None,
            Termination::Stranded { position_miles, .. } => Some(round2(position_miles)),
        };

        Self {
            distance_miles: round2(trip.distance_miles),
            duration_hours: round2(trip.duration_hours),
            total_gallons_needed: round2(trip.total_gallons_needed),
            stops_required: trip.stops_required(),
            total_fuel_cost: round2(trip.total_fuel_cost()),
            fuel_stops: trip.plan.stops.iter().map(FuelStopResult::from_stop).collect(),
            trip_completed: trip.trip_completed(),
            stranded_at_mile,
            route_geometry: trip.route_geometry.clone(),
        }
    }
}

impl FuelStopResult {
    /// Create from a planned stop.
    pub fn from_stop(stop: &Stop) -> Self {
        Self {
            station_id: stop.station_id.0,
            station_name: stop.station_name.clone(),
            city: stop.city.clone(),
            state: stop.state.clone(),
            price_per_gallon: stop.price_per_gallon,
            gallons_filled: round2(stop.gallons_filled),
            fuel_cost: round2(stop.fuel_cost),
            latitude: stop.location.latitude(),
            longitude: stop.location.longitude(),
            miles_from_start: round2(stop.miles_from_start),
        }
    }
}

/// Round to two decimal places for display.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
