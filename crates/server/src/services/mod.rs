//! Outbound notification services.
//!
//! # Services
//!
//! - `email` - SMTP transport (lettre, STARTTLS)
//! - `messages` - Askama rendering of customer emails and staff alerts
//! - `notifier` - Background dispatch after a submission is stored

pub mod email;
pub mod messages;
pub mod notifier;

pub use email::{EmailService, NotificationError};
pub use messages::RenderedEmail;
pub use notifier::Notifier;
