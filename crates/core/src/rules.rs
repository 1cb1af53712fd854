//! Issue derivation rules.
//!
//! Two independent rules are evaluated against the same record:
//!
//! | Rule            | Fires when                 | Priority                                  |
//! |-----------------|----------------------------|-------------------------------------------|
//! | Low Rating      | `rating <= 2`              | `Critical` if package damaged, else `High`|
//! | Package Damaged | `package_damaged == "Yes"` | `Critical`                                |

use crate::types::{FeedbackRecord, IssueRecord, IssueStatus, IssueType, Priority};

/// Derive the issue records a feedback submission triggers.
///
/// Returns zero, one or two issues; Low Rating comes before Package Damaged
/// when both fire.
#[must_use]
pub fn derive_issues(record: &FeedbackRecord) -> Vec<IssueRecord> {
    let mut issues = Vec::with_capacity(2);

    if record.rating.is_low() {
        let priority = if record.package_damaged.is_yes() {
            Priority::Critical
        } else {
            Priority::High
        };
        issues.push(issue(record, IssueType::LowRating, priority));
    }

    if record.package_damaged.is_yes() {
        issues.push(issue(record, IssueType::PackageDamaged, Priority::Critical));
    }

    issues
}

fn issue(record: &FeedbackRecord, issue_type: IssueType, priority: Priority) -> IssueRecord {
    IssueRecord {
        timestamp: record.timestamp,
        email: record.email.clone(),
        rating: record.rating,
        issue_type,
        priority,
        status: IssueStatus::Open,
        notes: record.feedback.clone(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::types::{CustomerEmail, Rating, YesNo};

    fn record(rating: i64, damaged: YesNo) -> FeedbackRecord {
        FeedbackRecord {
            timestamp: Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap(),
            email: CustomerEmail::parse("a@b.com").unwrap(),
            rating: Rating::new(rating).unwrap(),
            package_damaged: damaged,
            on_time: YesNo::Yes,
            feedback: "box was crushed".to_string(),
        }
    }

    fn summary(issues: &[IssueRecord]) -> Vec<(IssueType, Priority)> {
        issues.iter().map(|i| (i.issue_type, i.priority)).collect()
    }

    #[test]
    fn test_low_rating_undamaged_is_high() {
        for rating in 0..=2 {
            let issues = derive_issues(&record(rating, YesNo::No));
            assert_eq!(summary(&issues), vec![(IssueType::LowRating, Priority::High)]);
        }
    }

    #[test]
    fn test_low_rating_damaged_emits_both_critical() {
        for rating in 0..=2 {
            let issues = derive_issues(&record(rating, YesNo::Yes));
            assert_eq!(
                summary(&issues),
                vec![
                    (IssueType::LowRating, Priority::Critical),
                    (IssueType::PackageDamaged, Priority::Critical),
                ]
            );
        }
    }

    #[test]
    fn test_damaged_fires_regardless_of_rating() {
        for rating in 3..=5 {
            let issues = derive_issues(&record(rating, YesNo::Yes));
            assert_eq!(
                summary(&issues),
                vec![(IssueType::PackageDamaged, Priority::Critical)]
            );
        }
    }

    #[test]
    fn test_satisfied_customer_emits_nothing() {
        for rating in 3..=5 {
            assert!(derive_issues(&record(rating, YesNo::No)).is_empty());
        }
    }

    #[test]
    fn test_issue_copies_feedback_fields() {
        let source = record(1, YesNo::No);
        let issues = derive_issues(&source);
        let issue = issues.first().unwrap();

        assert_eq!(issue.key(), source.key());
        assert_eq!(issue.rating, source.rating);
        assert_eq!(issue.status, IssueStatus::Open);
        assert_eq!(issue.notes, "box was crushed");
    }
}
