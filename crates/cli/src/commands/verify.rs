//! `ap-cli verify`
//!
//! Checks the issue collection against the feedback collection. With
//! `--repair`, issues that stored feedback should have produced are appended.
//! Orphan issues and duplicate keys are only reported.

use autopulse_core::IntegrityReport;
use autopulse_server::db::{DataStore, FeedbackRepository, IssueRepository};

use super::CommandError;

/// Result of a verify run.
#[derive(Debug)]
pub struct VerifyOutcome {
    /// Findings before any repair.
    pub found: IntegrityReport,
    /// Number of issues appended by the repair.
    pub repaired: usize,
    /// Findings left after the repair (equal to `found` without one).
    pub remaining: IntegrityReport,
}

impl VerifyOutcome {
    /// Human-readable lines describing the run.
    #[must_use]
    pub fn summary(&self) -> Vec<String> {
        let mut lines = Vec::new();

        for issue in &self.found.missing_issues {
            lines.push(format!(
                "missing: {} issue for {} at {}",
                issue.issue_type,
                issue.email,
                issue.timestamp.to_rfc3339()
            ));
        }
        for issue in &self.found.orphan_issues {
            lines.push(format!(
                "orphan: {} issue for {} at {}",
                issue.issue_type,
                issue.email,
                issue.timestamp.to_rfc3339()
            ));
        }
        for key in &self.found.duplicate_keys {
            lines.push(format!(
                "duplicate: feedback from {} at {}",
                key.email,
                key.timestamp.to_rfc3339()
            ));
        }

        if self.repaired > 0 {
            lines.push(format!("repaired: appended {} issue(s)", self.repaired));
        }
        if self.remaining.is_clean() {
            lines.push("ok: collections are consistent".to_string());
        }
        lines
    }
}

/// Run the integrity check, repairing missing issues when asked.
pub async fn run(store: &DataStore, repair: bool) -> Result<VerifyOutcome, CommandError> {
    let feedback = FeedbackRepository::new(store).list().await?;
    let issues_repo = IssueRepository::new(store);
    let issues = issues_repo.list().await?;

    let found = IntegrityReport::check(&feedback, &issues);
    if !repair || found.missing_issues.is_empty() {
        return Ok(VerifyOutcome {
            remaining: found.clone(),
            found,
            repaired: 0,
        });
    }

    issues_repo.append_all(&found.missing_issues).await?;
    tracing::info!(count = found.missing_issues.len(), "Appended missing issues");

    let issues = issues_repo.list().await?;
    let remaining = IntegrityReport::check(&feedback, &issues);

    Ok(VerifyOutcome {
        repaired: found.missing_issues.len(),
        found,
        remaining,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use autopulse_core::{FeedbackRecord, FeedbackSubmission, derive_issues};
    use chrono::{Duration, TimeZone, Utc};
    use serde_json::json;
    use tempfile::tempdir;

    use super::*;

    fn record(email: &str, rating: i64, damaged: &str, offset_secs: i64) -> FeedbackRecord {
        let at = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap() + Duration::seconds(offset_secs);
        serde_json::from_value::<FeedbackSubmission>(json!({
            "email": email, "rating": rating, "packageDamaged": damaged
        }))
        .unwrap()
        .normalize(at)
        .unwrap()
    }

    #[tokio::test]
    async fn test_consistent_collections_are_clean() {
        let dir = tempdir().unwrap();
        let store = DataStore::open(dir.path()).await.unwrap();
        let first = record("a@b.com", 1, "Yes", 0);
        FeedbackRepository::new(&store).append(&first).await.unwrap();
        IssueRepository::new(&store)
            .append_all(&derive_issues(&first))
            .await
            .unwrap();

        let outcome = run(&store, false).await.unwrap();

        assert!(outcome.found.is_clean());
        assert_eq!(
            outcome.summary(),
            vec!["ok: collections are consistent".to_string()]
        );
    }

    #[tokio::test]
    async fn test_repair_appends_exactly_the_missing_issues() {
        let dir = tempdir().unwrap();
        let store = DataStore::open(dir.path()).await.unwrap();
        let feedback = FeedbackRepository::new(&store);
        let issues = IssueRepository::new(&store);

        let complete = record("a@b.com", 2, "No", 0);
        let incomplete = record("c@d.com", 1, "Yes", 1);
        feedback.append(&complete).await.unwrap();
        feedback.append(&incomplete).await.unwrap();
        issues.append_all(&derive_issues(&complete)).await.unwrap();

        let dry_run = run(&store, false).await.unwrap();
        assert_eq!(dry_run.found.missing_issues.len(), 2);
        assert_eq!(dry_run.repaired, 0);
        assert_eq!(issues.list().await.unwrap().len(), 1);

        let outcome = run(&store, true).await.unwrap();
        assert_eq!(outcome.repaired, 2);
        assert!(outcome.remaining.is_clean());
        assert_eq!(issues.list().await.unwrap().len(), 3);

        let again = run(&store, true).await.unwrap();
        assert_eq!(again.repaired, 0);
        assert!(again.found.is_clean());
    }

    #[tokio::test]
    async fn test_orphans_survive_repair() {
        let dir = tempdir().unwrap();
        let store = DataStore::open(dir.path()).await.unwrap();
        let ghost = record("ghost@b.com", 0, "No", 0);
        IssueRepository::new(&store)
            .append_all(&derive_issues(&ghost))
            .await
            .unwrap();

        let outcome = run(&store, true).await.unwrap();

        assert_eq!(outcome.found.orphan_issues.len(), 1);
        assert!(!outcome.remaining.is_clean());
        assert!(
            outcome
                .summary()
                .iter()
                .any(|line| line.starts_with("orphan: Low Rating issue for ghost@b.com"))
        );
    }
}
