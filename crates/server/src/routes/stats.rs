//! Aggregate statistics.

use axum::{Json, extract::State};
use tracing::instrument;

use autopulse_core::FeedbackStats;

use crate::db::{FeedbackRepository, IssueRepository};
use crate::error::Result;
use crate::state::AppState;

/// `GET /api/stats`
///
/// Computed on every call from the two collections.
#[instrument(skip_all)]
pub async fn show(State(state): State<AppState>) -> Result<Json<FeedbackStats>> {
    let feedback = FeedbackRepository::new(state.store()).list().await?;
    let issues = IssueRepository::new(state.store()).list().await?;

    Ok(Json(FeedbackStats::compute(&feedback, &issues)))
}
