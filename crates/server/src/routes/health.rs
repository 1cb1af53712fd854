//! Health endpoints.

use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;

use crate::db::{FeedbackRepository, IssueRepository};
use crate::state::AppState;

/// Body of `GET /api/health`.
#[derive(Debug, Serialize)]
pub struct ApiHealth {
    pub status: &'static str,
    pub email: bool,
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
pub async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable if either collection cannot be read.
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    let feedback = FeedbackRepository::new(state.store()).list().await;
    let issues = IssueRepository::new(state.store()).list().await;

    match (feedback, issues) {
        (Ok(_), Ok(_)) => StatusCode::OK,
        (Err(e), _) | (_, Err(e)) => {
            tracing::warn!(error = %e, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

/// `GET /api/health`
///
/// Reports whether email notifications are enabled.
pub async fn api_health(State(state): State<AppState>) -> Json<ApiHealth> {
    Json(ApiHealth {
        status: "OK",
        email: state.notifier().is_enabled(),
    })
}
