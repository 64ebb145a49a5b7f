//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::CachedGeocoder;
use crate::geocode::NominatimClient;
use crate::planner::VehicleProfile;
use crate::routing::OsrmClient;
use crate::stations::StationSnapshot;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Cached Nominatim client
    pub geocoder: Arc<CachedGeocoder<NominatimClient>>,

    /// OSRM routing client
    pub router: Arc<OsrmClient>,

    /// Located fuel stations, refreshed in the background
    pub stations: StationSnapshot,

    /// Vehicle used for every plan
    pub vehicle: Arc<VehicleProfile>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(
        geocoder: CachedGeocoder<NominatimClient>,
        router: OsrmClient,
        stations: StationSnapshot,
        vehicle: VehicleProfile,
    ) -> Self {
        Self {
            geocoder: Arc::new(geocoder),
            router: Arc::new(router),
            stations,
            vehicle: Arc::new(vehicle),
        }
    }
}
