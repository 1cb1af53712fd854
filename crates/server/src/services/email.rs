//! SMTP transport for notification emails.
//!
//! Uses lettre with STARTTLS and sends every message as multipart/alternative
//! (plain text plus HTML).

use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{MultiPart, SinglePart, header::ContentType},
    transport::smtp::{Error as SmtpError, authentication::Credentials},
};
use thiserror::Error;

use crate::config::EmailConfig;
use crate::services::messages::RenderedEmail;

/// Errors that can occur when composing or delivering a notification.
///
/// These are logged and never reach an HTTP caller.
#[derive(Debug, Error)]
pub enum NotificationError {
    /// SMTP transport error.
    #[error("SMTP error: {0}")]
    Smtp(#[from] SmtpError),

    /// Failed to build email message.
    #[error("Failed to build message: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    /// Invalid email address.
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    /// Template rendering error.
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

/// SMTP client for transactional emails.
#[derive(Clone)]
pub struct EmailService {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
}

impl EmailService {
    /// Create a new email service from configuration.
    ///
    /// No connection is made until the first send or [`EmailService::verify`].
    ///
    /// # Errors
    ///
    /// Returns error if the relay parameters are invalid.
    pub fn new(config: &EmailConfig) -> Result<Self, SmtpError> {
        let credentials =
            Credentials::new(config.smtp_username.clone(), config.password().to_string());

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port)
            .credentials(credentials)
            .build();

        Ok(Self {
            mailer,
            from_address: config.from_address.clone(),
        })
    }

    /// Check that the relay accepts a connection.
    ///
    /// # Errors
    ///
    /// Returns error if the connection or handshake fails.
    pub async fn verify(&self) -> Result<bool, NotificationError> {
        Ok(self.mailer.test_connection().await?)
    }

    /// Send a rendered email.
    ///
    /// # Errors
    ///
    /// Returns error if an address does not parse, the message cannot be
    /// built, or the relay rejects it.
    pub async fn send(&self, to: &str, email: &RenderedEmail) -> Result<(), NotificationError> {
        let message = Message::builder()
            .from(
                self.from_address
                    .parse()
                    .map_err(|_| NotificationError::InvalidAddress(self.from_address.clone()))?,
            )
            .to(to
                .parse()
                .map_err(|_| NotificationError::InvalidAddress(to.to_string()))?)
            .subject(email.subject.clone())
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(email.text.clone()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(email.html.clone()),
                    ),
            )?;

        let response = self.mailer.send(message).await?;

        tracing::info!(
            to = %to,
            subject = %email.subject,
            code = %response.code(),
            "Email sent"
        );
        Ok(())
    }
}
