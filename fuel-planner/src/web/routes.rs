//! HTTP route handlers.

use askama::Template;
use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use tower_http::services::ServeDir;

use crate::trip::{TripError, TripRequest, plan_trip};

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/about", get(about_page))
        .route("/api/route", post(plan_route))
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Index page with the trip form.
async fn index_page(State(state): State<AppState>) -> impl IntoResponse {
    let template = IndexTemplate {
        miles_per_gallon: state.vehicle.miles_per_gallon,
        tank_capacity_gallons: state.vehicle.tank_capacity_gallons,
    };
    Html(
        template
            .render()
            .unwrap_or_else(|e| format!("Template error: {}", e)),
    )
}

/// About page.
async fn about_page(State(state): State<AppState>) -> impl IntoResponse {
    let template = AboutTemplate {
        station_count: state.stations.len().await,
    };
    Html(
        template
            .render()
            .unwrap_or_else(|e| format!("Template error: {}", e)),
    )
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// Plan fuel stops between two locations.
async fn plan_route(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    let html = accepts_html(&headers);

    // Parse JSON manually so we can log the body on failure
    let req: Result<PlanRouteRequest, _> = serde_json::from_slice(&body).map_err(|e| {
        tracing::warn!(error = %e, body = %String::from_utf8_lossy(&body), "invalid JSON body");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    });

    let result = match req {
        Ok(req) => plan(&state, req.into()).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(trip) if html => {
            let template = PlanResultsTemplate {
                plan: TripPlanView::from_trip(&trip),
            };
            let html = template.render().map_err(|e| AppError::Internal {
                message: format!("Template error: {}", e),
            })?;
            Ok(Html(html).into_response())
        }
        Ok(trip) => Ok(Json(PlanRouteResponse::from_trip(&trip)).into_response()),
        Err(e) if html => Ok(e.into_html_response()),
        Err(e) => Err(e),
    }
}

async fn plan(state: &AppState, request: TripRequest) -> Result<crate::trip::TripPlan, AppError> {
    let stations = state.stations.current().await;
    plan_trip(
        state.geocoder.as_ref(),
        state.router.as_ref(),
        stations,
        &state.vehicle,
        &request,
    )
    .await
    .map_err(AppError::from)
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    BadGateway { message: String },
    Internal { message: String },
}

impl AppError {
    fn status_and_message(&self) -> (StatusCode, &str) {
        match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message.as_str()),
            AppError::BadGateway { message } => (StatusCode::BAD_GATEWAY, message.as_str()),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message.as_str()),
        }
    }

    fn log(&self) {
        let (status, message) = self.status_and_message();
        if status.is_server_error() {
            tracing::error!(%status, message, "request failed");
        } else {
            tracing::info!(%status, message, "request rejected");
        }
    }

    /// Render as an HTML error fragment for the browser frontend.
    fn into_html_response(self) -> Response {
        self.log();
        let (status, message) = self.status_and_message();
        let template = ErrorTemplate {
            message: message.to_string(),
        };
        let body = template
            .render()
            .unwrap_or_else(|e| format!("Template error: {}", e));
        (status, Html(body)).into_response()
    }
}

impl From<TripError> for AppError {
    fn from(e: TripError) -> Self {
        let message = e.to_string();
        match e {
            TripError::MissingLocation(_) | TripError::Route(_) => AppError::BadRequest { message },
            TripError::InvalidLocation { query, .. } => AppError::BadRequest {
                message: format!("Invalid location: {query}"),
            },
            TripError::Routing(_) | TripError::Geometry(_) => AppError::BadGateway { message },
            TripError::Planning(_) => AppError::Internal { message },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        self.log();
        let (status, message) = self.status_and_message();
        let body = Json(ErrorResponse {
            error: message.to_string(),
        });
        (status, body).into_response()
    }
}
