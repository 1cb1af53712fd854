//! Customer email address type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`CustomerEmail`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    /// The input string is empty.
    #[error("email cannot be empty")]
    Empty,
}

/// The email address a customer typed into the feedback form.
///
/// Feedback is accepted from anything the customer enters, so the only
/// constraint is presence. Whether the address can actually receive mail is
/// a question for the notifier, not for ingestion.
///
/// ## Examples
///
/// ```
/// use autopulse_core::CustomerEmail;
///
/// assert!(CustomerEmail::parse("user@example.com").is_ok());
/// assert!(CustomerEmail::parse("not really an address").is_ok());
/// assert!(CustomerEmail::parse("").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct CustomerEmail(String);

impl CustomerEmail {
    /// Parse a `CustomerEmail` from a string.
    ///
    /// The value is kept verbatim (no trimming, no case folding).
    ///
    /// # Errors
    ///
    /// Returns [`EmailError::Empty`] if the input is empty.
    pub fn parse(s: &str) -> Result<Self, EmailError> {
        if s.is_empty() {
            return Err(EmailError::Empty);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the email address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `CustomerEmail` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Whether the address has the `local@domain` shape a mail relay accepts.
    #[must_use]
    pub fn looks_deliverable(&self) -> bool {
        match self.0.split_once('@') {
            Some((local, domain)) => !local.is_empty() && !domain.is_empty(),
            None => false,
        }
    }
}

impl fmt::Display for CustomerEmail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for CustomerEmail {
    type Err = EmailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for CustomerEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
