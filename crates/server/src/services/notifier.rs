//! Fire-and-forget notification dispatch.
//!
//! Dispatch never blocks the caller and never reports back to it: failures
//! are logged and reported to Sentry, nothing else.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{Instrument, error, info, info_span, warn};

use autopulse_core::{FeedbackRecord, IssueRecord};

use crate::config::{AlertConfig, EmailConfig};
use crate::services::email::EmailService;
use crate::services::messages::{self, Audience};

/// Sends customer emails and staff alerts in the background.
///
/// Cheap to clone. A disabled notifier (no SMTP credentials) drops every
/// dispatch.
#[derive(Clone)]
pub struct Notifier {
    inner: Option<Arc<NotifierInner>>,
}

struct NotifierInner {
    email: EmailService,
    alerts: AlertConfig,
}

impl Notifier {
    /// A notifier that sends nothing.
    #[must_use]
    pub const fn disabled() -> Self {
        Self { inner: None }
    }

    /// Build a notifier from configuration.
    ///
    /// Returns a disabled notifier when `email` is `None`.
    ///
    /// # Errors
    ///
    /// Returns error if the SMTP relay parameters are invalid.
    pub fn from_config(
        email: Option<&EmailConfig>,
        alerts: &AlertConfig,
    ) -> Result<Self, lettre::transport::smtp::Error> {
        let Some(email) = email else {
            return Ok(Self::disabled());
        };

        Ok(Self {
            inner: Some(Arc::new(NotifierInner {
                email: EmailService::new(email)?,
                alerts: alerts.clone(),
            })),
        })
    }

    /// Whether dispatches actually send mail.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.inner.is_some()
    }

    /// Check the SMTP relay once, in the background, and log the outcome.
    pub fn verify_in_background(&self) {
        let Some(inner) = self.inner.clone() else {
            return;
        };

        tokio::spawn(async move {
            match inner.email.verify().await {
                Ok(true) => info!("SMTP relay reachable"),
                Ok(false) => warn!("SMTP relay refused the connection test"),
                Err(e) => warn!(error = %e, "SMTP relay check failed"),
            }
        });
    }

    /// Send every message for a stored submission without waiting.
    ///
    /// Returns the spawned task so tests can await it. Request handlers drop
    /// the handle. Returns `None` when the notifier is disabled.
    pub fn dispatch(
        &self,
        record: FeedbackRecord,
        issues: Vec<IssueRecord>,
    ) -> Option<JoinHandle<()>> {
        let inner = self.inner.clone()?;
        let span = info_span!("notify", email = %record.email, rating = record.rating.value());

        Some(tokio::spawn(
            async move { inner.deliver(&record, &issues).await }.instrument(span),
        ))
    }
}

impl NotifierInner {
    async fn deliver(&self, record: &FeedbackRecord, issues: &[IssueRecord]) {
        let outgoing = match messages::plan(&self.alerts, record, issues) {
            Ok(outgoing) => outgoing,
            Err(e) => {
                error!(error = %e, "Failed to render notification");
                sentry::capture_error(&e);
                return;
            }
        };

        for message in outgoing {
            let kind = match message.audience {
                Audience::Customer(template) => template.name(),
                Audience::Manager => "manager_alert",
                Audience::Support => "damage_report",
            };

            if let Err(e) = self.email.send(&message.to, &message.email).await {
                error!(error = %e, kind, to = %message.to, "Failed to send notification");
                sentry::capture_error(&e);
            } else {
                info!(kind, to = %message.to, "Notification sent");
            }
        }
    }
}
