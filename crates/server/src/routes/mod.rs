//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness ("ok")
//! GET  /health/ready           - Readiness (both collections readable)
//!
//! # API
//! GET  /api/health             - {status, email}
//! GET  /api/feedback           - Every stored feedback record
//! POST /api/feedback           - Submit feedback
//! GET  /api/issues             - Every derived issue
//! GET  /api/stats              - Aggregate statistics
//! ```

pub mod feedback;
pub mod health;
pub mod issues;
pub mod stats;

use std::time::Duration;

use axum::{
    Router,
    http::{Request, Response},
    middleware::from_fn,
    routing::get,
};
use tower::ServiceBuilder;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::middleware::request_id_middleware;
use crate::state::AppState;

/// Create the `/api` router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::api_health))
        .route("/feedback", get(feedback::list).post(feedback::submit))
        .route("/issues", get(issues::list))
        .route("/stats", get(stats::show))
}

/// Build the complete application with its middleware stack.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .nest("/api", api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(|request: &Request<_>| {
                            tracing::info_span!(
                                "http_request",
                                method = %request.method(),
                                uri = %request.uri(),
                                request_id = tracing::field::Empty,
                                status = tracing::field::Empty,
                                latency_ms = tracing::field::Empty,
                            )
                        })
                        .on_response(
                            |response: &Response<_>, latency: Duration, span: &Span| {
                                span.record("status", response.status().as_u16());
                                span.record(
                                    "latency_ms",
                                    u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                                );
                                DefaultOnResponse::default().on_response(response, latency, span);
                            },
                        ),
                )
                .layer(from_fn(request_id_middleware)),
        )
        .with_state(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}
