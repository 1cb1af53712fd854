//! Issue listing.

use axum::{Json, extract::State};
use tracing::instrument;

use autopulse_core::IssueRecord;

use crate::db::IssueRepository;
use crate::error::Result;
use crate::state::AppState;

/// `GET /api/issues`
#[instrument(skip_all)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<IssueRecord>>> {
    let issues = IssueRepository::new(state.store()).list().await?;
    Ok(Json(issues))
}
