//! Notification message composition.
//!
//! Pure rendering of the customer email and staff alerts from Askama
//! templates. Nothing here talks to the network.

use askama::Template;

use autopulse_core::notification::DISCOUNT_PERCENT;
use autopulse_core::{FeedbackRecord, IssueRecord, IssueType, NotificationTemplate};

use crate::config::AlertConfig;
use crate::services::email::NotificationError;

/// A rendered email ready for the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEmail {
    pub subject: String,
    pub text: String,
    pub html: String,
}

/// Who a message is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Audience {
    Customer(NotificationTemplate),
    Manager,
    Support,
}

/// A message with its recipient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub to: String,
    pub audience: Audience,
    pub email: RenderedEmail,
}

#[derive(Template)]
#[template(path = "email/apology.html")]
struct ApologyHtml<'a> {
    rating: u8,
    package_damaged: bool,
    feedback: &'a str,
}

#[derive(Template)]
#[template(path = "email/apology.txt")]
struct ApologyText<'a> {
    rating: u8,
    package_damaged: bool,
    feedback: &'a str,
}

#[derive(Template)]
#[template(path = "email/thank_you.html")]
struct ThankYouHtml<'a> {
    rating: u8,
    discount_code: &'a str,
    discount_percent: u8,
    feedback: &'a str,
}

#[derive(Template)]
#[template(path = "email/thank_you.txt")]
struct ThankYouText<'a> {
    rating: u8,
    discount_code: &'a str,
    discount_percent: u8,
    feedback: &'a str,
}

#[derive(Template)]
#[template(path = "email/acknowledgment.html")]
struct AcknowledgmentHtml {
    rating: u8,
}

#[derive(Template)]
#[template(path = "email/acknowledgment.txt")]
struct AcknowledgmentText {
    rating: u8,
}

#[derive(Template)]
#[template(path = "email/manager_alert.html")]
struct ManagerAlertHtml<'a> {
    email: &'a str,
    rating: u8,
    package_damaged: &'a str,
    on_time: &'a str,
    priority: &'a str,
    timestamp: String,
    feedback: &'a str,
}

#[derive(Template)]
#[template(path = "email/manager_alert.txt")]
struct ManagerAlertText<'a> {
    email: &'a str,
    rating: u8,
    package_damaged: &'a str,
    on_time: &'a str,
    priority: &'a str,
    timestamp: String,
    feedback: &'a str,
}

#[derive(Template)]
#[template(path = "email/damage_report.html")]
struct DamageReportHtml<'a> {
    email: &'a str,
    rating: u8,
    timestamp: String,
    feedback: &'a str,
}

#[derive(Template)]
#[template(path = "email/damage_report.txt")]
struct DamageReportText<'a> {
    email: &'a str,
    rating: u8,
    timestamp: String,
    feedback: &'a str,
}

/// Render the customer email for a feedback record.
///
/// # Errors
///
/// Returns `NotificationError::Template` if rendering fails.
pub fn customer_email(record: &FeedbackRecord) -> Result<RenderedEmail, NotificationError> {
    let template = NotificationTemplate::for_rating(record.rating);
    let rating = record.rating.value();
    let feedback = record.feedback.as_str();

    let (text, html) = match template {
        NotificationTemplate::Apology => {
            let package_damaged = record.package_damaged.is_yes();
            (
                ApologyText {
                    rating,
                    package_damaged,
                    feedback,
                }
                .render()?,
                ApologyHtml {
                    rating,
                    package_damaged,
                    feedback,
                }
                .render()?,
            )
        }
        NotificationTemplate::ThankYou { discount_code } => (
            ThankYouText {
                rating,
                discount_code,
                discount_percent: DISCOUNT_PERCENT,
                feedback,
            }
            .render()?,
            ThankYouHtml {
                rating,
                discount_code,
                discount_percent: DISCOUNT_PERCENT,
                feedback,
            }
            .render()?,
        ),
        NotificationTemplate::Acknowledgment => (
            AcknowledgmentText { rating }.render()?,
            AcknowledgmentHtml { rating }.render()?,
        ),
    };

    Ok(RenderedEmail {
        subject: template.subject(),
        text,
        html,
    })
}

/// Render the staff alert for an issue.
///
/// # Errors
///
/// Returns `NotificationError::Template` if rendering fails.
pub fn staff_alert(
    record: &FeedbackRecord,
    issue: &IssueRecord,
) -> Result<RenderedEmail, NotificationError> {
    let email = record.email.as_str();
    let rating = record.rating.value();
    let timestamp = record.timestamp.to_rfc3339();
    let feedback = record.feedback.as_str();

    match issue.issue_type {
        IssueType::LowRating => Ok(RenderedEmail {
            subject: format!("ALERT: Low Rating ({rating}/5) - Immediate Action Required"),
            text: ManagerAlertText {
                email,
                rating,
                package_damaged: record.package_damaged.as_str(),
                on_time: record.on_time.as_str(),
                priority: issue.priority.as_str(),
                timestamp: timestamp.clone(),
                feedback,
            }
            .render()?,
            html: ManagerAlertHtml {
                email,
                rating,
                package_damaged: record.package_damaged.as_str(),
                on_time: record.on_time.as_str(),
                priority: issue.priority.as_str(),
                timestamp,
                feedback,
            }
            .render()?,
        }),
        IssueType::PackageDamaged => Ok(RenderedEmail {
            subject: "CRITICAL: Damaged Package Report".to_string(),
            text: DamageReportText {
                email,
                rating,
                timestamp: timestamp.clone(),
                feedback,
            }
            .render()?,
            html: DamageReportHtml {
                email,
                rating,
                timestamp,
                feedback,
            }
            .render()?,
        }),
    }
}

/// Every message a submission should produce.
///
/// The customer email comes first, then one alert per issue whose recipient
/// is configured. Customer addresses without an `@` are skipped.
///
/// # Errors
///
/// Returns `NotificationError::Template` if any message fails to render.
pub fn plan(
    alerts: &AlertConfig,
    record: &FeedbackRecord,
    issues: &[IssueRecord],
) -> Result<Vec<OutgoingEmail>, NotificationError> {
    let mut outgoing = Vec::with_capacity(1 + issues.len());

    if record.email.looks_deliverable() {
        outgoing.push(OutgoingEmail {
            to: record.email.as_str().to_string(),
            audience: Audience::Customer(NotificationTemplate::for_rating(record.rating)),
            email: customer_email(record)?,
        });
    } else {
        tracing::warn!(email = %record.email, "Customer email is not deliverable, skipping");
    }

    for issue in issues {
        let (recipient, audience) = match issue.issue_type {
            IssueType::LowRating => (alerts.manager_email.as_ref(), Audience::Manager),
            IssueType::PackageDamaged => (alerts.support_email.as_ref(), Audience::Support),
        };

        if let Some(to) = recipient {
            outgoing.push(OutgoingEmail {
                to: to.clone(),
                audience,
                email: staff_alert(record, issue)?,
            });
        }
    }

    Ok(outgoing)
}
