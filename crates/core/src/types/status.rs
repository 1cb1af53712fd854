//! Enumerations stored in the feedback and issue collections.
//!
//! Each enum serializes to the exact human-readable string the dashboard and
//! the spreadsheet export expect (`"Yes"`, `"Low Rating"`, `"Critical"`, ...).

use serde::{Deserialize, Serialize};

/// A normalized yes/no answer from the feedback form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum YesNo {
    Yes,
    #[default]
    No,
}

impl YesNo {
    /// Coerce a form value.
    ///
    /// Only a string equal to `"yes"` ignoring ASCII case is `Yes`. Every
    /// other value, including `true` and absence, is `No`.
    #[must_use]
    pub fn coerce(value: Option<&serde_json::Value>) -> Self {
        match value {
            Some(serde_json::Value::String(s)) if s.eq_ignore_ascii_case("yes") => Self::Yes,
            _ => Self::No,
        }
    }

    /// Returns `true` for [`YesNo::Yes`].
    #[must_use]
    pub const fn is_yes(self) -> bool {
        matches!(self, Self::Yes)
    }

    /// The stored string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
        }
    }
}

impl std::fmt::Display for YesNo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What triggered an issue record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IssueType {
    /// Rating of two stars or fewer.
    #[serde(rename = "Low Rating")]
    LowRating,
    /// Customer reported the package arrived damaged.
    #[serde(rename = "Package Damaged")]
    PackageDamaged,
}

impl IssueType {
    /// The stored string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LowRating => "Low Rating",
            Self::PackageDamaged => "Package Damaged",
        }
    }
}

impl std::fmt::Display for IssueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Triage priority of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    Critical,
    High,
}

impl Priority {
    /// The stored string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::High => "High",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "critical" => Ok(Self::Critical),
            "high" => Ok(Self::High),
            _ => Err(format!("invalid priority: {s}")),
        }
    }
}

/// Lifecycle status of an issue.
///
/// Issues are created `Open` and nothing transitions them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum IssueStatus {
    #[default]
    Open,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_yes_no_coerce_case_insensitive() {
        assert_eq!(YesNo::coerce(Some(&json!("yes"))), YesNo::Yes);
        assert_eq!(YesNo::coerce(Some(&json!("YES"))), YesNo::Yes);
        assert_eq!(YesNo::coerce(Some(&json!("Yes"))), YesNo::Yes);
    }

    #[test]
    fn test_yes_no_coerce_everything_else_is_no() {
        assert_eq!(YesNo::coerce(Some(&json!("no"))), YesNo::No);
        assert_eq!(YesNo::coerce(Some(&json!("y"))), YesNo::No);
        assert_eq!(YesNo::coerce(Some(&json!(" yes"))), YesNo::No);
        assert_eq!(YesNo::coerce(Some(&json!(true))), YesNo::No);
        assert_eq!(YesNo::coerce(None), YesNo::No);
    }

    #[test]
    fn test_wire_strings() {
        assert_eq!(serde_json::to_value(YesNo::Yes).unwrap(), json!("Yes"));
        assert_eq!(
            serde_json::to_value(IssueType::LowRating).unwrap(),
            json!("Low Rating")
        );
        assert_eq!(
            serde_json::to_value(IssueType::PackageDamaged).unwrap(),
            json!("Package Damaged")
        );
        assert_eq!(
            serde_json::to_value(Priority::Critical).unwrap(),
            json!("Critical")
        );
        assert_eq!(serde_json::to_value(IssueStatus::Open).unwrap(), json!("Open"));
    }

    #[test]
    fn test_priority_from_str() {
        assert_eq!("critical".parse::<Priority>().unwrap(), Priority::Critical);
        assert_eq!("High".parse::<Priority>().unwrap(), Priority::High);
        assert!("urgent".parse::<Priority>().is_err());
    }
}
