//! Nominatim geocoding client.

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::Deserialize;

use crate::domain::Coordinate;

use super::Geocoder;
use super::error::GeocodeError;

/// Default base URL for the public Nominatim instance.
pub const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";

/// Nominatim's usage policy requires an identifying User-Agent.
pub const DEFAULT_USER_AGENT: &str = "fuel-route-optimizer";

/// A single search hit. Nominatim returns coordinates as strings.
#[derive(Debug, Deserialize)]
struct Place {
    lat: String,
    lon: String,
}

/// Configuration for the Nominatim client.
#[derive(Debug, Clone)]
pub struct NominatimConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Value of the User-Agent header
    pub user_agent: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl NominatimConfig {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 10,
        }
    }

    /// Set a custom base URL (for testing or a self-hosted instance).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for the Nominatim search API.
#[derive(Debug, Clone)]
pub struct NominatimClient {
    http: reqwest::Client,
    base_url: String,
}

impl NominatimClient {
    pub fn new(config: NominatimConfig) -> Result<Self, GeocodeError> {
        let mut headers = HeaderMap::new();
        let user_agent = HeaderValue::from_str(&config.user_agent).map_err(|e| {
            GeocodeError::InvalidConfig {
                message: format!("User-Agent {:?}: {e}", config.user_agent),
            }
        })?;
        headers.insert(USER_AGENT, user_agent);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// Resolve `query` to the coordinates of the best match.
    pub async fn search(&self, query: &str) -> Result<Coordinate, GeocodeError> {
        let url = format!("{}/search", self.base_url.trim_end_matches('/'));

        let response = self
            .http
            .get(&url)
            .query(&[("q", query), ("format", "json"), ("limit", "1")])
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(GeocodeError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeocodeError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        let coordinate = parse_search_response(&body, query)?;

        tracing::debug!(query, %coordinate, "geocoded");
        Ok(coordinate)
    }
}

impl Geocoder for NominatimClient {
    async fn resolve(&self, query: &str) -> Result<Coordinate, GeocodeError> {
        self.search(query).await
    }
}

/// Extract the first hit from a Nominatim `format=json` response body.
fn parse_search_response(body: &str, query: &str) -> Result<Coordinate, GeocodeError> {
    let places: Vec<Place> = serde_json::from_str(body).map_err(|e| GeocodeError::Malformed {
        message: e.to_string(),
    })?;

    let Some(place) = places.first() else {
        return Err(GeocodeError::NotFound {
            query: query.to_string(),
        });
    };

    let parse = |field: &str, value: &str| {
        value.trim().parse::<f64>().map_err(|e| GeocodeError::Malformed {
            message: format!("{field} {value:?}: {e}"),
        })
    };
    let lat = parse("lat", &place.lat)?;
    let lon = parse("lon", &place.lon)?;

    Coordinate::new(lat, lon).map_err(|e| GeocodeError::Malformed {
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = NominatimConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn config_builder() {
        let config = NominatimConfig::new()
            .with_base_url("http://localhost:8080")
            .with_user_agent("test-agent")
            .with_timeout(3);

        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.user_agent, "test-agent");
        assert_eq!(config.timeout_secs, 3);
    }

    #[test]
    fn client_creation() {
        assert!(NominatimClient::new(NominatimConfig::default()).is_ok());
    }

    #[test]
    fn invalid_user_agent_is_rejected() {
        let config = NominatimConfig::new().with_user_agent("bad\nagent");
        let err = NominatimClient::new(config).unwrap_err();
        assert!(matches!(err, GeocodeError::InvalidConfig { .. }));
        assert!(!err.is_transient());
    }

    #[test]
    fn parses_first_hit() {
        let body = r#"[
            {"place_id": 1, "lat": "41.8755616", "lon": "-87.6244212", "display_name": "Chicago"},
            {"place_id": 2, "lat": "0", "lon": "0", "display_name": "Elsewhere"}
        ]"#;

        let coord = parse_search_response(body, "Chicago, IL").unwrap();
        assert_eq!(coord.latitude(), 41.8755616);
        assert_eq!(coord.longitude(), -87.6244212);
    }

    #[test]
    fn empty_array_is_not_found() {
        let err = parse_search_response("[]", "Atlantis").unwrap_err();
        assert!(matches!(err, GeocodeError::NotFound { query } if query == "Atlantis"));
    }

    #[test]
    fn non_numeric_coordinates_are_malformed() {
        let body = r#"[{"lat": "north", "lon": "-87.6"}]"#;
        assert!(matches!(
            parse_search_response(body, "q"),
            Err(GeocodeError::Malformed { .. })
        ));
    }

    #[test]
    fn out_of_range_coordinates_are_malformed() {
        let body = r#"[{"lat": "123.0", "lon": "-87.6"}]"#;
        assert!(matches!(
            parse_search_response(body, "q"),
            Err(GeocodeError::Malformed { .. })
        ));
    }

    #[test]
    fn unexpected_shape_is_malformed() {
        let body = r#"{"error": "Unable to geocode"}"#;
        assert!(matches!(
            parse_search_response(body, "q"),
            Err(GeocodeError::Malformed { .. })
        ));
    }
}
