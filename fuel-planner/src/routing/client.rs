//! OSRM HTTP client.

use crate::domain::Coordinate;

use super::RouteProvider;
use super::error::RoutingError;
use super::types::{OsrmResponse, RouteSummary};

/// Default base URL for the public OSRM demo server.
pub const DEFAULT_BASE_URL: &str = "https://router.project-osrm.org";

/// Configuration for the OSRM client.
#[derive(Debug, Clone)]
pub struct OsrmConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Routing profile path segment (e.g. "driving")
    pub profile: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl OsrmConfig {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            profile: "driving".to_string(),
            timeout_secs: 20,
        }
    }

    /// Set a custom base URL (for testing or a self-hosted instance).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for the OSRM `route` service.
#[derive(Debug, Clone)]
pub struct OsrmClient {
    http: reqwest::Client,
    base_url: String,
    profile: String,
}

impl OsrmClient {
    pub fn new(config: OsrmConfig) -> Result<Self, RoutingError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            profile: config.profile,
        })
    }

    fn route_url(&self, start: Coordinate, end: Coordinate) -> String {
        // OSRM takes lon,lat pairs.
        format!(
            "{}/route/v1/{}/{},{};{},{}",
            self.base_url.trim_end_matches('/'),
            self.profile,
            start.longitude(),
            start.latitude(),
            end.longitude(),
            end.latitude()
        )
    }

    /// Compute the fastest driving route between two points.
    pub async fn route(
        &self,
        start: Coordinate,
        end: Coordinate,
    ) -> Result<RouteSummary, RoutingError> {
        let url = self.route_url(start, end);

        let response = self
            .http
            .get(&url)
            .query(&[("overview", "full"), ("geometries", "polyline")])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        // OSRM reports NoRoute/InvalidQuery as JSON with a 400 status, so
        // try to interpret the body before giving up on the status.
        match serde_json::from_str::<OsrmResponse>(&body) {
            Ok(parsed) => {
                let summary = summary_from_response(parsed)?;
                tracing::debug!(
                    distance_meters = summary.distance_meters,
                    duration_seconds = summary.duration_seconds,
                    "route computed"
                );
                Ok(summary)
            }
            Err(_) if !status.is_success() => Err(RoutingError::Api {
                status: status.as_u16(),
                message: body.chars().take(500).collect(),
            }),
            Err(e) => Err(RoutingError::Malformed {
                message: e.to_string(),
            }),
        }
    }
}

impl RouteProvider for OsrmClient {
    async fn compute_route(
        &self,
        start: Coordinate,
        end: Coordinate,
    ) -> Result<RouteSummary, RoutingError> {
        self.route(start, end).await
    }
}

/// Take the first route of a parsed response.
fn summary_from_response(response: OsrmResponse) -> Result<RouteSummary, RoutingError> {
    if response.code != "Ok" {
        return Err(RoutingError::NoRoute {
            message: response.message.unwrap_or_default(),
            code: response.code,
        });
    }

    response
        .routes
        .into_iter()
        .next()
        .map(RouteSummary::from)
        .ok_or_else(|| RoutingError::NoRoute {
            code: "Ok".to_string(),
            message: "response contained no routes".to_string(),
        })
}
