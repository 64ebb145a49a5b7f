//! Server configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::planner::{InvalidProfile, VehicleProfile};

/// Default listen address.
pub const DEFAULT_ADDR: &str = "127.0.0.1:3000";

/// Default path of the station store.
pub const DEFAULT_STATIONS_PATH: &str = "data/stations.json";

/// Default static assets directory.
pub const DEFAULT_STATIC_DIR: &str = "static";

/// Default interval between station snapshot reloads (1 hour).
pub const DEFAULT_STATION_REFRESH: Duration = Duration::from_secs(60 * 60);

/// Errors from reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?} ({reason})")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },

    #[error(transparent)]
    Profile(#[from] InvalidProfile),
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub listen_addr: SocketAddr,
    pub stations_path: PathBuf,
    pub static_dir: PathBuf,
    /// Nominatim base URL; `None` uses the public instance.
    pub nominatim_url: Option<String>,
    /// OSRM base URL; `None` uses the public demo server.
    pub osrm_url: Option<String>,
    pub user_agent: Option<String>,
    pub station_refresh: Duration,
    pub vehicle: VehicleProfile,
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration using `lookup` to fetch variables.
    ///
    /// Unset or empty variables take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let listen_addr = parse_value(
            "FUEL_PLANNER_ADDR",
            get("FUEL_PLANNER_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string()),
        )?;

        let defaults = VehicleProfile::default();
        let vehicle = VehicleProfile::new(
            parse_var(&get, "VEHICLE_MPG")?.unwrap_or(defaults.miles_per_gallon),
            parse_var(&get, "VEHICLE_TANK_GALLONS")?.unwrap_or(defaults.tank_capacity_gallons),
            parse_var(&get, "CORRIDOR_MILES")?.unwrap_or(defaults.corridor_threshold_miles),
        )?;

        let station_refresh = match parse_var::<u64>(&get, "STATION_REFRESH_SECS")? {
            Some(0) => {
                return Err(ConfigError::Invalid {
                    var: "STATION_REFRESH_SECS",
                    value: "0".into(),
                    reason: "must be at least 1 second".into(),
                });
            }
            Some(secs) => Duration::from_secs(secs),
            None => DEFAULT_STATION_REFRESH,
        };

        Ok(Self {
            listen_addr,
            stations_path: get("FUEL_PLANNER_STATIONS")
                .unwrap_or_else(|| DEFAULT_STATIONS_PATH.into())
                .into(),
            static_dir: get("FUEL_PLANNER_STATIC_DIR")
                .unwrap_or_else(|| DEFAULT_STATIC_DIR.into())
                .into(),
            nominatim_url: get("NOMINATIM_URL"),
            osrm_url: get("OSRM_URL"),
            user_agent: get("FUEL_PLANNER_USER_AGENT"),
            station_refresh,
            vehicle,
        })
    }
}

fn parse_var<T>(
    get: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    get(var).map(|value| parse_value(var, value)).transpose()
}

fn parse_value<T>(var: &'static str, value: String) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        var,
        reason: e.to_string(),
        value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|var| vars.get(var).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = config(&[]).unwrap();

        assert_eq!(config.listen_addr, SocketAddr::from(([127, 0, 0, 1], 3000)));
        assert_eq!(config.stations_path, PathBuf::from(DEFAULT_STATIONS_PATH));
        assert_eq!(config.static_dir, PathBuf::from(DEFAULT_STATIC_DIR));
        assert_eq!(config.nominatim_url, None);
        assert_eq!(config.osrm_url, None);
        assert_eq!(config.station_refresh, DEFAULT_STATION_REFRESH);
        assert_eq!(config.vehicle, VehicleProfile::default());
    }

    #[test]
    fn reads_overrides() {
        let config = config(&[
            ("FUEL_PLANNER_ADDR", "0.0.0.0:8080"),
            ("FUEL_PLANNER_STATIONS", "/srv/stations.json"),
            ("OSRM_URL", "http://osrm.internal:5000"),
            ("STATION_REFRESH_SECS", "120"),
            ("VEHICLE_MPG", "6.5"),
            ("VEHICLE_TANK_GALLONS", " 150 "),
            ("CORRIDOR_MILES", "5"),
        ])
        .unwrap();

        assert_eq!(config.listen_addr.port(), 8080);
        assert_eq!(config.stations_path, PathBuf::from("/srv/stations.json"));
        assert_eq!(config.osrm_url.as_deref(), Some("http://osrm.internal:5000"));
        assert_eq!(config.station_refresh, Duration::from_secs(120));
        assert_eq!(config.vehicle.miles_per_gallon, 6.5);
        assert_eq!(config.vehicle.tank_capacity_gallons, 150.0);
        assert_eq!(config.vehicle.corridor_threshold_miles, 5.0);
    }

    #[test]
    fn empty_values_use_defaults() {
        let config = config(&[("VEHICLE_MPG", ""), ("NOMINATIM_URL", "  ")]).unwrap();
        assert_eq!(config.vehicle.miles_per_gallon, 10.0);
        assert_eq!(config.nominatim_url, None);
    }

    #[test]
    fn rejects_unparsable_values() {
        let err = config(&[("VEHICLE_MPG", "ten")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "VEHICLE_MPG", .. }));

        let err = config(&[("FUEL_PLANNER_ADDR", "localhost")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "FUEL_PLANNER_ADDR", .. }));
    }

    #[test]
    fn rejects_invalid_vehicle() {
        let err = config(&[("VEHICLE_TANK_GALLONS", "-5")]).unwrap_err();
        assert!(matches!(err, ConfigError::Profile(_)));
    }

    #[test]
    fn rejects_zero_refresh() {
        let err = config(&[("STATION_REFRESH_SECS", "0")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "STATION_REFRESH_SECS", .. }));
    }
}
