//! API route handlers.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::storage::{RepoError, SportsRepo};
use crate::types::{ErrorResponse, HealthResponse, ListEventsRequest, ListEventsResponse};

/// Application state shared across handlers.
pub struct AppState {
    pub repo: Arc<dyn SportsRepo>,
}

/// Error type for API handlers.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn internal(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: msg.into(),
        }
    }
}

impl From<RepoError> for ApiError {
    fn from(err: RepoError) -> Self {
        let err = anyhow::Error::new(err);
        tracing::error!("List events failed: {:#}", err);
        Self::internal(format!("{:#}", err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.status.to_string(),
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

/// Build the API router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/v1/list-events", post(list_events))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// List events endpoint.
pub async fn list_events(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ListEventsRequest>,
) -> Result<Json<ListEventsResponse>, ApiError> {
    let repo = Arc::clone(&state.repo);

    // rusqlite is blocking
    let events = tokio::task::spawn_blocking(move || repo.list(req.filter.as_ref()))
        .await
        .map_err(|e| ApiError::internal(format!("List task failed: {}", e)))??;

    Ok(Json(ListEventsResponse { events }))
}
