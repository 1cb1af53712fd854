//! AutoPulse Core - Delivery feedback domain library.
//!
//! This crate provides the types and pure rules shared by every AutoPulse
//! component:
//! - `server` - HTTP API that ingests feedback and serves the collections
//! - `cli` - Operator tools for stats and integrity checks
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no file
//! access, no SMTP. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtypes and records (ratings, emails, feedback, issues)
//! - [`rules`] - Issue derivation from a feedback record
//! - [`stats`] - Aggregate statistics over the collections
//! - [`notification`] - Rating-band template selection
//! - [`integrity`] - Cross-collection consistency checks

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod integrity;
pub mod notification;
pub mod rules;
pub mod stats;
pub mod types;

pub use integrity::IntegrityReport;
pub use notification::{DISCOUNT_CODE, NotificationTemplate};
pub use rules::derive_issues;
pub use stats::FeedbackStats;
pub use types::*;
