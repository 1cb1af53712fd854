//! Customer notification template selection.

use crate::types::Rating;

/// Discount code offered to happy customers.
pub const DISCOUNT_CODE: &str = "SAVE10";

/// Discount granted by [`DISCOUNT_CODE`], in percent.
pub const DISCOUNT_PERCENT: u8 = 10;

/// Which customer email to send for a rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationTemplate {
    /// Ratings of two stars or fewer.
    Apology,
    /// Ratings of four stars or more, carries a discount code.
    ThankYou {
        /// The code to print in the email.
        discount_code: &'static str,
    },
    /// Three-star ratings.
    Acknowledgment,
}

impl NotificationTemplate {
    /// Select the template for a rating band.
    #[must_use]
    pub const fn for_rating(rating: Rating) -> Self {
        if rating.is_low() {
            Self::Apology
        } else if rating.is_high() {
            Self::ThankYou {
                discount_code: DISCOUNT_CODE,
            }
        } else {
            Self::Acknowledgment
        }
    }

    /// Email subject line.
    #[must_use]
    pub fn subject(self) -> String {
        match self {
            Self::Apology => "We're Sorry – Let's Fix This".to_string(),
            Self::ThankYou { discount_code } => format!("Thank You! 🎁 {discount_code}"),
            Self::Acknowledgment => "Thank you for your feedback".to_string(),
        }
    }

    /// Short name used in logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Apology => "apology",
            Self::ThankYou { .. } => "thank_you",
            Self::Acknowledgment => "acknowledgment",
        }
    }
}
