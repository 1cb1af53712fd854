//! Star rating type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Rating`] strictly.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RatingError {
    /// The value is outside `0..=5`.
    #[error("rating must be between {min} and {max} (got {value})")]
    OutOfRange {
        /// The rejected value.
        value: i64,
        /// Lowest accepted rating.
        min: u8,
        /// Highest accepted rating.
        max: u8,
    },
}

/// A delivery rating from 0 to 5 stars.
///
/// `0` doubles as "no rating given": the feedback form coerces anything
/// non-numeric to zero instead of rejecting the submission.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "i64", into = "u8")]
pub struct Rating(u8);

impl Rating {
    /// Lowest rating.
    pub const MIN: u8 = 0;
    /// Highest rating.
    pub const MAX: u8 = 5;

    /// Create a rating, rejecting values outside `0..=5`.
    ///
    /// # Errors
    ///
    /// Returns [`RatingError::OutOfRange`] if the value is not a valid rating.
    pub fn new(value: i64) -> Result<Self, RatingError> {
        u8::try_from(value)
            .ok()
            .filter(|v| *v <= Self::MAX)
            .map(Self)
            .ok_or(RatingError::OutOfRange {
                value,
                min: Self::MIN,
                max: Self::MAX,
            })
    }

    /// Create a rating by clamping into `0..=5`.
    #[must_use]
    pub fn saturating(value: i64) -> Self {
        let clamped = value.clamp(i64::from(Self::MIN), i64::from(Self::MAX));
        Self(u8::try_from(clamped).unwrap_or(Self::MIN))
    }

    /// Coerce a form value into a rating.
    ///
    /// Numbers and numeric strings are accepted (fractions truncate toward
    /// zero, out-of-range values clamp). Strings may carry a `0x`, `0o` or
    /// `0b` prefix. A one-element array counts as its element, `true` counts
    /// as one star, and anything else is zero.
    #[must_use]
    pub fn coerce(value: Option<&serde_json::Value>) -> Self {
        match value.and_then(number_of) {
            Some(n) if n.is_finite() => {
                #[allow(clippy::cast_possible_truncation)] // clamped before the cast
                let whole = n.trunc().clamp(f64::from(Self::MIN), f64::from(Self::MAX)) as i64;
                Self::saturating(whole)
            }
            _ => Self::default(),
        }
    }
    /// Returns the number of stars.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Ratings of two stars or fewer count as a complaint.
    #[must_use]
    pub const fn is_low(self) -> bool {
        self.0 <= 2
    }

    /// Ratings of four stars or more count as praise.
    #[must_use]
    pub const fn is_high(self) -> bool {
        self.0 >= 4
    }
}

impl TryFrom<i64> for Rating {
    type Error = RatingError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Numeric reading of a loose form value, `None` when it has none.
fn number_of(value: &serde_json::Value) -> Option<f64> {
    use serde_json::Value;

    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => number_from_str(s),
        Value::Bool(true) => Some(1.0),
        Value::Array(items) => match items.as_slice() {
            [] => None,
            [Value::String(s)] => number_from_str(s),
            [item @ (Value::Number(_) | Value::Array(_))] => number_of(item),
            _ => None,
        },
        _ => None,
    }
}

fn number_from_str(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }

    let radix = match trimmed.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = &trimmed[2..];
        if digits.starts_with(['+', '-']) {
            return None;
        }
        #[allow(clippy::cast_precision_loss)] // only compared against 0..=5
        return u64::from_str_radix(digits, radix).ok().map(|n| n as f64);
    }

    // Plain decimal only: no "inf" or "nan" spellings.
    if trimmed
        .chars()
        .any(|c| c.is_ascii_alphabetic() && !matches!(c, 'e' | 'E'))
    {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_new_accepts_range() {
        for v in 0..=5 {
            assert_eq!(Rating::new(v).unwrap().value(), u8::try_from(v).unwrap());
        }
    }

    #[test]
    fn test_new_rejects_out_of_range() {
        assert!(matches!(
            Rating::new(6),
            Err(RatingError::OutOfRange { value: 6, .. })
        ));
        assert!(Rating::new(-1).is_err());
    }

    #[test]
    fn test_coerce_numbers_and_strings() {
        assert_eq!(Rating::coerce(Some(&json!(4))).value(), 4);
        assert_eq!(Rating::coerce(Some(&json!("3"))).value(), 3);
        assert_eq!(Rating::coerce(Some(&json!(" 2 "))).value(), 2);
        assert_eq!(Rating::coerce(Some(&json!(4.9))).value(), 4);
    }

    #[test]
    fn test_coerce_non_numeric_is_zero() {
        assert_eq!(Rating::coerce(None).value(), 0);
        assert_eq!(Rating::coerce(Some(&json!(null))).value(), 0);
        assert_eq!(Rating::coerce(Some(&json!("great"))).value(), 0);
        assert_eq!(Rating::coerce(Some(&json!(""))).value(), 0);
        assert_eq!(Rating::coerce(Some(&json!(false))).value(), 0);
        assert_eq!(Rating::coerce(Some(&json!("inf"))).value(), 0);
        assert_eq!(Rating::coerce(Some(&json!("NaN"))).value(), 0);
        assert_eq!(Rating::coerce(Some(&json!({"stars": 5}))).value(), 0);
    }

    #[test]
    fn test_coerce_radix_prefixes() {
        assert_eq!(Rating::coerce(Some(&json!("0x3"))).value(), 3);
        assert_eq!(Rating::coerce(Some(&json!("0x10"))).value(), 5);
        assert_eq!(Rating::coerce(Some(&json!("0b10"))).value(), 2);
        assert_eq!(Rating::coerce(Some(&json!("0o4"))).value(), 4);
        assert_eq!(Rating::coerce(Some(&json!("0xZZ"))).value(), 0);
    }

    #[test]
    fn test_coerce_single_element_arrays() {
        assert_eq!(Rating::coerce(Some(&json!([5]))).value(), 5);
        assert_eq!(Rating::coerce(Some(&json!(["4"]))).value(), 4);
        assert_eq!(Rating::coerce(Some(&json!([[3]]))).value(), 3);
        assert_eq!(Rating::coerce(Some(&json!([]))).value(), 0);
        assert_eq!(Rating::coerce(Some(&json!([4, 5]))).value(), 0);
        assert_eq!(Rating::coerce(Some(&json!([true]))).value(), 0);
    }

    #[test]
    fn test_coerce_true_is_one() {
        assert_eq!(Rating::coerce(Some(&json!(true))).value(), 1);
    }

    #[test]
    fn test_coerce_clamps() {
        assert_eq!(Rating::coerce(Some(&json!(11))).value(), 5);
        assert_eq!(Rating::coerce(Some(&json!(-3))).value(), 0);
        assert_eq!(Rating::coerce(Some(&json!("1e9"))).value(), 5);
    }

    #[test]
    fn test_bands() {
        assert!(Rating::new(2).unwrap().is_low());
        assert!(!Rating::new(3).unwrap().is_low());
        assert!(!Rating::new(3).unwrap().is_high());
        assert!(Rating::new(4).unwrap().is_high());
    }

    #[test]
    fn test_serde_is_plain_integer() {
        let rating = Rating::new(5).unwrap();
        assert_eq!(serde_json::to_string(&rating).unwrap(), "5");
        assert_eq!(serde_json::from_str::<Rating>("3").unwrap().value(), 3);
        assert!(serde_json::from_str::<Rating>("9").is_err());
    }
}
