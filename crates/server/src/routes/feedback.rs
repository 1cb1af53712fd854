//! Feedback ingestion and listing.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use chrono::Utc;
use serde::Serialize;
use tracing::instrument;

use autopulse_core::{FeedbackRecord, FeedbackSubmission, derive_issues};

use crate::db::{FeedbackRepository, IssueRepository};
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Body of a successful submission.
#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub success: bool,
    pub message: &'static str,
}

/// `POST /api/feedback`
///
/// Stores the normalized record, then its derived issues, then hands both to
/// the notifier without waiting for delivery.
#[instrument(skip_all)]
pub async fn submit(
    State(state): State<AppState>,
    body: std::result::Result<Json<FeedbackSubmission>, JsonRejection>,
) -> Result<Json<SubmitResponse>> {
    let Json(submission) = body.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Rejected feedback body");
        AppError::Validation("Invalid request body".to_string())
    })?;

    let record = submission
        .normalize(Utc::now())
        .map_err(|_| AppError::Validation("Email required".to_string()))?;

    FeedbackRepository::new(state.store())
        .append(&record)
        .await?;

    let issues = derive_issues(&record);
    IssueRepository::new(state.store())
        .append_all(&issues)
        .await?;

    tracing::info!(
        rating = record.rating.value(),
        issues = issues.len(),
        "Feedback stored"
    );

    state.notifier().dispatch(record, issues);

    Ok(Json(SubmitResponse {
        success: true,
        message: "Feedback saved successfully",
    }))
}

/// `GET /api/feedback`
#[instrument(skip_all)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<FeedbackRecord>>> {
    let records = FeedbackRepository::new(state.store()).list().await?;
    Ok(Json(records))
}
