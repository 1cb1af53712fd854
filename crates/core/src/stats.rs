//! Aggregate statistics over the feedback and issue collections.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::types::{FeedbackRecord, IssueRecord, Priority};

/// Dashboard summary computed at read time over the full collections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackStats {
    pub total_feedback: usize,
    /// Mean rating rounded to two decimals, zero when there is no feedback.
    #[serde(with = "rust_decimal::serde::float")]
    pub avg_rating: Decimal,
    pub critical_issues: usize,
    pub high_priority: usize,
}

impl FeedbackStats {
    /// Compute the summary.
    #[must_use]
    pub fn compute(feedback: &[FeedbackRecord], issues: &[IssueRecord]) -> Self {
        Self {
            total_feedback: feedback.len(),
            avg_rating: average_rating(feedback),
            critical_issues: count_priority(issues, Priority::Critical),
            high_priority: count_priority(issues, Priority::High),
        }
    }
}

fn average_rating(feedback: &[FeedbackRecord]) -> Decimal {
    if feedback.is_empty() {
        return Decimal::ZERO;
    }

    let sum: u64 = feedback.iter().map(|f| u64::from(f.rating.value())).sum();
    let mean = Decimal::from(sum) / Decimal::from(feedback.len());
    mean.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn count_priority(issues: &[IssueRecord], priority: Priority) -> usize {
    issues.iter().filter(|i| i.priority == priority).count()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use serde_json::json;

    use super::*;
    use crate::rules::derive_issues;
    use crate::types::{CustomerEmail, Rating, YesNo};

    fn feedback(rating: i64, damaged: YesNo) -> FeedbackRecord {
        FeedbackRecord {
            timestamp: Utc::now(),
            email: CustomerEmail::parse("a@b.com").unwrap(),
            rating: Rating::new(rating).unwrap(),
            package_damaged: damaged,
            on_time: YesNo::Yes,
            feedback: String::new(),
        }
    }

    #[test]
    fn test_empty_collections() {
        let stats = FeedbackStats::compute(&[], &[]);
        assert_eq!(stats.total_feedback, 0);
        assert_eq!(stats.avg_rating, Decimal::ZERO);
        assert_eq!(stats.critical_issues, 0);
        assert_eq!(stats.high_priority, 0);
    }

    #[test]
    fn test_average_rounds_to_two_decimals() {
        let records = [
            feedback(5, YesNo::No),
            feedback(5, YesNo::No),
            feedback(4, YesNo::No),
        ];
        let stats = FeedbackStats::compute(&records, &[]);
        assert_eq!(stats.avg_rating, Decimal::new(467, 2));
    }

    #[test]
    fn test_average_half_rounds_up() {
        // 17 / 8 = 2.125
        let records: Vec<_> = [3, 3, 3, 2, 2, 2, 1, 1]
            .into_iter()
            .map(|r| feedback(r, YesNo::No))
            .collect();
        let stats = FeedbackStats::compute(&records, &[]);
        assert_eq!(stats.avg_rating, Decimal::new(213, 2));
    }

    #[test]
    fn test_priority_counts() {
        let records = [
            feedback(1, YesNo::Yes),
            feedback(2, YesNo::No),
            feedback(5, YesNo::Yes),
        ];
        let issues: Vec<_> = records.iter().flat_map(derive_issues).collect();

        let stats = FeedbackStats::compute(&records, &issues);
        assert_eq!(stats.critical_issues, 3);
        assert_eq!(stats.high_priority, 1);
    }

    #[test]
    fn test_serializes_average_as_number() {
        let records = [
            feedback(5, YesNo::No),
            feedback(5, YesNo::No),
            feedback(4, YesNo::No),
        ];
        let value = serde_json::to_value(FeedbackStats::compute(&records, &[])).unwrap();
        assert_eq!(value["avg_rating"], json!(4.67));
        assert_eq!(value["total_feedback"], json!(3));
    }
}
