//! Feedback and issue records.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{CustomerEmail, EmailError, IssueStatus, IssueType, Priority, Rating, YesNo};

/// One customer feedback submission, as persisted.
///
/// Records are immutable once written and stored in arrival order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    /// Server-assigned write time (millisecond precision).
    pub timestamp: DateTime<Utc>,
    pub email: CustomerEmail,
    pub rating: Rating,
    pub package_damaged: YesNo,
    pub on_time: YesNo,
    /// Free-text comment, empty when none was given.
    pub feedback: String,
}

impl FeedbackRecord {
    /// The key linking this record to the issues derived from it.
    #[must_use]
    pub fn key(&self) -> RecordKey {
        RecordKey {
            timestamp: self.timestamp,
            email: self.email.clone(),
        }
    }
}

/// An operational issue derived from a feedback record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueRecord {
    /// Copied from the originating feedback.
    pub timestamp: DateTime<Utc>,
    /// Copied from the originating feedback.
    pub email: CustomerEmail,
    /// Copied from the originating feedback.
    pub rating: Rating,
    pub issue_type: IssueType,
    pub priority: Priority,
    pub status: IssueStatus,
    /// The customer's comment.
    pub notes: String,
}

impl IssueRecord {
    /// The key of the feedback this issue was derived from.
    #[must_use]
    pub fn key(&self) -> RecordKey {
        RecordKey {
            timestamp: self.timestamp,
            email: self.email.clone(),
        }
    }
}

/// `(timestamp, email)` pair shared by a feedback record and its issues.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordKey {
    pub timestamp: DateTime<Utc>,
    pub email: CustomerEmail,
}

/// Raw feedback form body before normalization.
///
/// Every field is kept as loose JSON so coercion can follow the form's
/// permissive rules instead of failing deserialization. Only a JSON object
/// deserializes; fields are looked up by name.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct FeedbackSubmission {
    pub email: Option<Value>,
    pub rating: Option<Value>,
    pub package_damaged: Option<Value>,
    pub on_time: Option<Value>,
    pub feedback: Option<Value>,
}

impl From<Map<String, Value>> for FeedbackSubmission {
    fn from(mut body: Map<String, Value>) -> Self {
        Self {
            email: body.remove("email"),
            rating: body.remove("rating"),
            package_damaged: body.remove("packageDamaged"),
            on_time: body.remove("onTime"),
            feedback: body.remove("feedback"),
        }
    }
}

impl FeedbackSubmission {
    /// Normalize into a record stamped with `received_at`.
    ///
    /// # Errors
    ///
    /// Returns [`EmailError::Empty`] if the email is missing or falsy.
    pub fn normalize(&self, received_at: DateTime<Utc>) -> Result<FeedbackRecord, EmailError> {
        let email = truthy_text(self.email.as_ref()).ok_or(EmailError::Empty)?;

        Ok(FeedbackRecord {
            timestamp: received_at.trunc_subsecs(3),
            email: CustomerEmail::parse(&email)?,
            rating: Rating::coerce(self.rating.as_ref()),
            package_damaged: YesNo::coerce(self.package_damaged.as_ref()),
            on_time: YesNo::coerce(self.on_time.as_ref()),
            feedback: truthy_text(self.feedback.as_ref()).unwrap_or_default(),
        })
    }
}

/// Text of a form value when it counts as "present".
///
/// `null`, `false`, `0` and the empty string count as absent. Strings are
/// returned verbatim; other values as their JSON text.
fn truthy_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64().is_some_and(|f| f == 0.0) => None,
        other => Some(other.to_string()),
    }
}
