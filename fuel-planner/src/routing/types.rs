//! OSRM response types and the route summary handed to the planner.

use serde::Deserialize;

/// Statute miles per meter.
pub const MILES_PER_METER: f64 = 0.000621371;

/// Top-level OSRM `route` service response.
///
/// Error responses carry `code` and `message` but no `routes`.
#[derive(Debug, Deserialize)]
pub struct OsrmResponse {
    pub code: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub routes: Vec<OsrmRoute>,
}

/// One route alternative.
#[derive(Debug, Deserialize)]
pub struct OsrmRoute {
    /// Meters.
    pub distance: f64,
    /// Seconds.
    pub duration: f64,
    /// Encoded polyline (requested with `geometries=polyline`).
    pub geometry: String,
}

/// Distance, duration and path of a computed route.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteSummary {
    pub distance_meters: f64,
    pub duration_seconds: f64,
    /// Precision-5 encoded polyline of the full route geometry.
    pub encoded_path: String,
}

impl RouteSummary {
    pub fn distance_miles(&self) -> f64 {
        self.distance_meters * MILES_PER_METER
    }

    pub fn duration_hours(&self) -> f64 {
        self.duration_seconds / 3600.0
    }
}

impl From<OsrmRoute> for RouteSummary {
    fn from(route: OsrmRoute) -> Self {
        Self {
            distance_meters: route.distance,
            duration_seconds: route.duration,
            encoded_path: route.geometry,
        }
    }
}
