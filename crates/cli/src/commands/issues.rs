//! `ap-cli issues`

use autopulse_core::{IssueRecord, Priority};
use autopulse_server::db::{DataStore, IssueRepository};

use super::CommandError;

/// Stored issues, all of them or those of one priority.
pub async fn list(
    store: &DataStore,
    priority: Option<Priority>,
) -> Result<Vec<IssueRecord>, CommandError> {
    let repo = IssueRepository::new(store);
    let issues = match priority {
        Some(priority) => repo.list_by_priority(priority).await?,
        None => repo.list().await?,
    };
    Ok(issues)
}
