//! Consistency checks between the feedback and issue collections.
//!
//! The feedback write and the issue write are not transactional. A failed
//! issue write leaves feedback whose derived issues never landed; these
//! checks find that state (and a few others) after the fact.

use std::collections::{HashMap, HashSet};

use crate::rules::derive_issues;
use crate::types::{FeedbackRecord, IssueRecord, IssueType, RecordKey};

/// Findings of an integrity check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntegrityReport {
    /// Issues the rules would derive from stored feedback but that are absent.
    pub missing_issues: Vec<IssueRecord>,
    /// Stored issues with no feedback sharing their `(timestamp, email)`.
    pub orphan_issues: Vec<IssueRecord>,
    /// Keys carried by more than one feedback record.
    pub duplicate_keys: Vec<RecordKey>,
}

impl IntegrityReport {
    /// Check the collections against each other.
    #[must_use]
    pub fn check(feedback: &[FeedbackRecord], issues: &[IssueRecord]) -> Self {
        let mut key_counts: HashMap<RecordKey, usize> = HashMap::new();
        for record in feedback {
            *key_counts.entry(record.key()).or_insert(0) += 1;
        }

        let present: HashSet<(RecordKey, IssueType)> =
            issues.iter().map(|i| (i.key(), i.issue_type)).collect();

        let mut seen = HashSet::new();
        let missing_issues = feedback
            .iter()
            .flat_map(derive_issues)
            .filter(|issue| {
                let id = (issue.key(), issue.issue_type);
                !present.contains(&id) && seen.insert(id)
            })
            .collect();

        let orphan_issues = issues
            .iter()
            .filter(|i| !key_counts.contains_key(&i.key()))
            .cloned()
            .collect();

        let mut duplicate_keys: Vec<RecordKey> = key_counts
            .into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(key, _)| key)
            .collect();
        duplicate_keys.sort();

        Self {
            missing_issues,
            orphan_issues,
            duplicate_keys,
        }
    }

    /// Returns `true` when nothing was found.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.missing_issues.is_empty()
            && self.orphan_issues.is_empty()
            && self.duplicate_keys.is_empty()
    }
}
