//! End-to-end trip planning.
//!
//! Resolves the trip's endpoints, fetches the driving route, and runs the
//! stop planner over it. The planner itself is CPU-bound (every station is
//! compared against every route point), so it runs on the blocking pool.

use std::sync::Arc;

use crate::domain::{Coordinate, Station};
use crate::geocode::Geocoder;
use crate::planner::{PlanResult, VehicleProfile, calculate_optimal_stops};
use crate::route::{ProjectedRoute, polyline};
use crate::routing::RouteProvider;

use super::error::{Endpoint, TripError};

/// A request to plan fuel stops between two named places.
#[derive(Debug, Clone)]
pub struct TripRequest {
    pub start: String,
    pub end: String,
}

impl TripRequest {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Check both locations are present, returning them trimmed.
    pub fn validate(&self) -> Result<(&str, &str), TripError> {
        let start = self.start.trim();
        if start.is_empty() {
            return Err(TripError::MissingLocation(Endpoint::Start));
        }

        let end = self.end.trim();
        if end.is_empty() {
            return Err(TripError::MissingLocation(Endpoint::End));
        }

        Ok((start, end))
    }
}

/// A planned trip.
#[derive(Debug, Clone, PartialEq)]
pub struct TripPlan {
    /// Road distance reported by the routing provider.
    pub distance_miles: f64,
    pub duration_hours: f64,
    /// Fuel burned over the whole trip: `distance_miles / mpg`.
    pub total_gallons_needed: f64,
    pub plan: PlanResult,
    /// Encoded polyline of the route, passed through for map rendering.
    pub route_geometry: String,
}

impl TripPlan {
    pub fn stops_required(&self) -> usize {
        self.plan.stops.len()
    }

    pub fn total_fuel_cost(&self) -> f64 {
        self.plan.total_cost
    }

    pub fn trip_completed(&self) -> bool {
        self.plan.trip_completed()
    }
}

/// Plan a trip from `request.start` to `request.end`.
pub async fn plan_trip<G, R>(
    geocoder: &G,
    router: &R,
    stations: Arc<[Station]>,
    profile: &VehicleProfile,
    request: &TripRequest,
) -> Result<TripPlan, TripError>
where
    G: Geocoder,
    R: RouteProvider,
{
    let (start_query, end_query) = request.validate()?;

    let (start, end) = futures::try_join!(
        resolve(geocoder, Endpoint::Start, start_query),
        resolve(geocoder, Endpoint::End, end_query),
    )?;

    let route = router.compute_route(start, end).await?;
    let coords = polyline::decode(&route.encoded_path)?;
    let distance_miles = route.distance_miles();

    let plan = {
        let profile = profile.clone();
        tokio::task::spawn_blocking(move || {
            let projected = ProjectedRoute::project(&coords)?;
            Ok::<_, TripError>(calculate_optimal_stops(
                &projected,
                &stations,
                distance_miles,
                &profile,
            ))
        })
        .await
        .map_err(|e| TripError::Planning(e.to_string()))??
    };

    tracing::info!(
        start = start_query,
        end = end_query,
        distance_miles,
        stops = plan.stops.len(),
        total_cost = plan.total_cost,
        completed = plan.trip_completed(),
        "trip planned"
    );

    Ok(TripPlan {
        distance_miles,
        duration_hours: route.duration_hours(),
        total_gallons_needed: profile.gallons_for(distance_miles),
        plan,
        route_geometry: route.encoded_path,
    })
}

async fn resolve<G: Geocoder>(
    geocoder: &G,
    endpoint: Endpoint,
    query: &str,
) -> Result<Coordinate, TripError> {
    geocoder.resolve(query).await.map_err(|source| {
        tracing::warn!(%endpoint, query, error = %source, "could not resolve location");
        TripError::InvalidLocation {
            endpoint,
            query: query.to_string(),
            source,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StationId;
    use crate::geocode::GeocodeError;
    use crate::planner::Termination;
    use crate::routing::{MILES_PER_METER, RouteSummary, RoutingError};
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakeGeocoder {
        places: HashMap<&'static str, (f64, f64)>,
        calls: AtomicUsize,
    }

    impl FakeGeocoder {
        fn new() -> Self {
            Self {
                places: HashMap::from([
                    ("Santa Rosa, NM", (35.0, -105.0)),
                    ("Conway, AR", (35.0, -93.0)),
                ]),
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl Geocoder for FakeGeocoder {
        async fn resolve(&self, query: &str) -> Result<Coordinate, GeocodeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.places.get(query) {
                Some(&(lat, lon)) => Ok(Coordinate::new(lat, lon).unwrap()),
                None => Err(GeocodeError::NotFound {
                    query: query.to_string(),
                }),
            }
        }
    }

    /// Router returning a straight east-west route along latitude 35.
    struct FakeRouter {
        result: Result<RouteSummary, fn() -> RoutingError>,
        requested: Mutex<Option<(Coordinate, Coordinate)>>,
    }

    impl FakeRouter {
        fn along_35th_parallel(distance_miles: f64) -> Self {
            let path: Vec<Coordinate> = (0..=24)
                .map(|i| Coordinate::new(35.0, -105.0 + 0.5 * f64::from(i)).unwrap())
                .collect();
            Self::with_summary(RouteSummary {
                distance_meters: distance_miles / MILES_PER_METER,
                duration_seconds: 36_000.0,
                encoded_path: polyline::encode(&path),
            })
        }

        fn with_summary(summary: RouteSummary) -> Self {
            Self {
                result: Ok(summary),
                requested: Mutex::new(None),
            }
        }

        fn failing(error: fn() -> RoutingError) -> Self {
            Self {
                result: Err(error),
                requested: Mutex::new(None),
            }
        }
    }

    impl RouteProvider for FakeRouter {
        async fn compute_route(
            &self,
            start: Coordinate,
            end: Coordinate,
        ) -> Result<RouteSummary, RoutingError> {
            *self.requested.lock().unwrap() = Some((start, end));
            match &self.result {
                Ok(summary) => Ok(summary.clone()),
                Err(make) => Err(make()),
            }
        }
    }

    fn station(id: u64, lon: f64, price: f64) -> Station {
        Station::new(
            StationId(id),
            format!("STATION {id}"),
            "Somewhere",
            "TX",
            price,
            Coordinate::new(35.0, lon).unwrap(),
        )
    }

    fn request() -> TripRequest {
        TripRequest::new("Santa Rosa, NM", "Conway, AR")
    }

    #[test]
    fn validate_trims_locations() {
        let request = TripRequest::new("  Dallas, TX ", "\tAustin, TX\n");
        assert_eq!(request.validate().unwrap(), ("Dallas, TX", "Austin, TX"));
    }

    #[test]
    fn validate_rejects_blank_locations() {
        let err = TripRequest::new("   ", "Austin, TX").validate().unwrap_err();
        assert!(matches!(err, TripError::MissingLocation(Endpoint::Start)));

        let err = TripRequest::new("Dallas, TX", "").validate().unwrap_err();
        assert!(matches!(err, TripError::MissingLocation(Endpoint::End)));
    }

    #[tokio::test]
    async fn plans_single_stop_trip() {
        let geocoder = FakeGeocoder::new();
        let router = FakeRouter::along_35th_parallel(700.0);
        let stations: Arc<[Station]> = vec![station(1, -100.0, 3.25)].into();

        let trip = plan_trip(&geocoder, &router, stations, &VehicleProfile::default(), &request())
            .await
            .unwrap();

        assert!((trip.distance_miles - 700.0).abs() < 1e-6);
        assert_eq!(trip.duration_hours, 10.0);
        assert!((trip.total_gallons_needed - 70.0).abs() < 1e-6);
        assert_eq!(trip.stops_required(), 1);
        assert!(trip.trip_completed());
        assert_eq!(trip.plan.stops[0].station_id, StationId(1));
        assert!((trip.total_fuel_cost() - trip.plan.stops[0].fuel_cost).abs() < 1e-9);
        assert_eq!(trip.route_geometry, router.result.as_ref().unwrap().encoded_path);

        let (start, end) = router.requested.lock().unwrap().take().unwrap();
        assert_eq!(start.longitude(), -105.0);
        assert_eq!(end.longitude(), -93.0);
    }

    #[tokio::test]
    async fn short_trip_needs_no_stops() {
        let geocoder = FakeGeocoder::new();
        let router = FakeRouter::along_35th_parallel(450.0);
        let stations: Arc<[Station]> = vec![station(1, -100.0, 3.25)].into();

        let trip = plan_trip(&geocoder, &router, stations, &VehicleProfile::default(), &request())
            .await
            .unwrap();

        assert_eq!(trip.stops_required(), 0);
        assert_eq!(trip.total_fuel_cost(), 0.0);
        assert!(trip.trip_completed());
    }

    #[tokio::test]
    async fn stranded_trip_is_partial_not_an_error() {
        let geocoder = FakeGeocoder::new();
        let router = FakeRouter::along_35th_parallel(700.0);

        let trip = plan_trip(
            &geocoder,
            &router,
            Vec::<Station>::new().into(),
            &VehicleProfile::default(),
            &request(),
        )
        .await
        .unwrap();

        assert!(!trip.trip_completed());
        assert!(matches!(trip.plan.termination, Termination::Stranded { .. }));
    }

    #[tokio::test]
    async fn missing_location_skips_geocoding() {
        let geocoder = FakeGeocoder::new();
        let router = FakeRouter::along_35th_parallel(700.0);

        let err = plan_trip(
            &geocoder,
            &router,
            Vec::<Station>::new().into(),
            &VehicleProfile::default(),
            &TripRequest::new("", "Conway, AR"),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, TripError::MissingLocation(Endpoint::Start)));
        assert_eq!(geocoder.calls.load(Ordering::SeqCst), 0);
        assert!(router.requested.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn unknown_location_is_invalid() {
        let geocoder = FakeGeocoder::new();
        let router = FakeRouter::along_35th_parallel(700.0);

        let err = plan_trip(
            &geocoder,
            &router,
            Vec::<Station>::new().into(),
            &VehicleProfile::default(),
            &TripRequest::new("Santa Rosa, NM", "Atlantis"),
        )
        .await
        .unwrap_err();

        match err {
            TripError::InvalidLocation {
                endpoint, query, ..
            } => {
                assert_eq!(endpoint, Endpoint::End);
                assert_eq!(query, "Atlantis");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(router.requested.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn routing_failure_is_reported() {
        let geocoder = FakeGeocoder::new();
        let router = FakeRouter::failing(|| RoutingError::NoRoute {
            code: "NoRoute".into(),
            message: "Impossible route between points".into(),
        });

        let err = plan_trip(
            &geocoder,
            &router,
            Vec::<Station>::new().into(),
            &VehicleProfile::default(),
            &request(),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, TripError::Routing(RoutingError::NoRoute { .. })));
    }

    #[tokio::test]
    async fn empty_geometry_is_invalid_route() {
        let geocoder = FakeGeocoder::new();
        let router = FakeRouter::with_summary(RouteSummary {
            distance_meters: 1000.0,
            duration_seconds: 60.0,
            encoded_path: String::new(),
        });

        let err = plan_trip(
            &geocoder,
            &router,
            Vec::<Station>::new().into(),
            &VehicleProfile::default(),
            &request(),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, TripError::Route(_)));
    }

    #[tokio::test]
    async fn corrupt_geometry_is_reported() {
        let geocoder = FakeGeocoder::new();
        let router = FakeRouter::with_summary(RouteSummary {
            distance_meters: 1000.0,
            duration_seconds: 60.0,
            encoded_path: "_p~iF~ps|U_ulL".to_string(),
        });

        let err = plan_trip(
            &geocoder,
            &router,
            Vec::<Station>::new().into(),
            &VehicleProfile::default(),
            &request(),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, TripError::Geometry(_)));
    }
}
