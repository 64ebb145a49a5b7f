//! Station-to-route matching.
//!
//! Each station is placed at the mile marker of its nearest route point.
//! The search is a brute-force scan over every route point, which is fine
//! for polylines of a few thousand points and a few thousand stations.

use crate::domain::Station;
use crate::route::ProjectedRoute;

/// A station placed on the route.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchedStation<'a> {
    pub station: &'a Station,

    /// Cumulative distance of the route point nearest the station.
    pub mile_marker: f64,

    /// Haversine distance from the station to that route point (miles).
    pub corridor_distance: f64,
}

impl MatchedStation<'_> {
    pub fn price(&self) -> f64 {
        self.station.price_per_gallon
    }
}

/// Matches stations against a projected route.
#[derive(Debug, Clone, Copy)]
pub struct StationMatcher<'r> {
    route: &'r ProjectedRoute,
    corridor_threshold_miles: f64,
}

impl<'r> StationMatcher<'r> {
    pub fn new(route: &'r ProjectedRoute, corridor_threshold_miles: f64) -> Self {
        Self {
            route,
            corridor_threshold_miles,
        }
    }

    /// Find the route point nearest to `station`.
    ///
    /// Returns `(mile_marker, distance)`. Ties go to the earliest point in
    /// route order.
    pub fn nearest(&self, station: &Station) -> (f64, f64) {
        let mut best_mile = 0.0;
        let mut best_distance = f64::INFINITY;

        for point in self.route.points() {
            let distance = station.location.haversine_miles(&point.location);
            if distance < best_distance {
                best_distance = distance;
                best_mile = point.cumulative_distance_miles;
            }
        }

        (best_mile, best_distance)
    }

    /// Match a single station, or `None` if it lies outside the corridor.
    pub fn match_station<'s>(&self, station: &'s Station) -> Option<MatchedStation<'s>> {
        let (mile_marker, corridor_distance) = self.nearest(station);

        (corridor_distance <= self.corridor_threshold_miles).then_some(MatchedStation {
            station,
            mile_marker,
            corridor_distance,
        })
    }

    /// Match every station, dropping those outside the corridor.
    ///
    /// The result is ordered by mile marker; stations sharing a marker keep
    /// their input order.
    pub fn match_all<'s>(
        &self,
        stations: impl IntoIterator<Item = &'s Station>,
    ) -> Vec<MatchedStation<'s>> {
        let mut matched: Vec<_> = stations
            .into_iter()
            .filter_map(|s| self.match_station(s))
            .collect();

        matched.sort_by(|a, b| a.mile_marker.total_cmp(&b.mile_marker));

        tracing::debug!(
            matched = matched.len(),
            route_points = self.route.len(),
            "matched stations to route corridor"
        );

        matched
    }
}
