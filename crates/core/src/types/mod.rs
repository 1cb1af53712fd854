//! Core types for AutoPulse.
//!
//! This module provides type-safe wrappers for the feedback domain.

pub mod email;
pub mod rating;
pub mod record;
pub mod status;

pub use email::{CustomerEmail, EmailError};
pub use rating::{Rating, RatingError};
pub use record::{FeedbackRecord, FeedbackSubmission, IssueRecord, RecordKey};
pub use status::*;
