//! `ap-cli stats`

use autopulse_core::FeedbackStats;
use autopulse_server::db::{DataStore, FeedbackRepository, IssueRepository};

use super::CommandError;

/// Compute the statistics view from the collections on disk.
pub async fn compute(store: &DataStore) -> Result<FeedbackStats, CommandError> {
    let feedback = FeedbackRepository::new(store).list().await?;
    let issues = IssueRepository::new(store).list().await?;
    Ok(FeedbackStats::compute(&feedback, &issues))
}
