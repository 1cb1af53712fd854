//! Service configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `AUTOPULSE_HOST` - Bind address (default: 127.0.0.1)
//! - `AUTOPULSE_PORT` - Listen port, falls back to `PORT` (default: 3000)
//! - `AUTOPULSE_DATA_DIR` - Directory holding the collections (default: data)
//! - `AUTOPULSE_LOG_FORMAT` - `json` for structured logs, anything else for text
//! - `SMTP_EMAIL` - SMTP login, also the default sender
//! - `SMTP_PASSWORD` - SMTP password (app password for Gmail)
//! - `SMTP_HOST` - SMTP relay hostname (default: smtp.gmail.com)
//! - `SMTP_PORT` - SMTP port (default: 587)
//! - `SMTP_FROM` - Sender address (default: `SMTP_EMAIL`)
//! - `ALERT_MANAGER_EMAIL` - Recipient of low-rating alerts
//! - `ALERT_SUPPORT_EMAIL` - Recipient of damaged-package alerts
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate (default: 0.0)
//!
//! Email is enabled only when both `SMTP_EMAIL` and `SMTP_PASSWORD` are set.
//! Otherwise the service runs in safe mode and never sends mail. Setting only
//! one of them is flagged in [`ServiceConfig::email_misconfigured`] so the
//! binary can warn once logging is up.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "xxx",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Service configuration, built once at startup and shared read-only.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Directory holding `feedback.json` and `issues.json`
    pub data_dir: PathBuf,
    /// Emit JSON logs instead of text
    pub json_logs: bool,
    /// Outbound email, `None` in safe mode
    pub email: Option<EmailConfig>,
    /// Only one of `SMTP_EMAIL`/`SMTP_PASSWORD` was set
    pub email_misconfigured: bool,
    /// Internal alert recipients
    pub alerts: AlertConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
    /// Fraction of errors sent to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions traced
    pub sentry_traces_sample_rate: f32,
}

/// Email (SMTP) configuration.
///
/// Implements `Debug` manually to redact secret fields.
#[derive(Clone)]
pub struct EmailConfig {
    /// SMTP server hostname
    pub smtp_host: String,
    /// SMTP server port
    pub smtp_port: u16,
    /// SMTP authentication username
    pub smtp_username: String,
    /// SMTP authentication password
    pub smtp_password: SecretString,
    /// Email sender address (From header)
    pub from_address: String,
}

impl std::fmt::Debug for EmailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailConfig")
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("smtp_username", &self.smtp_username)
            .field("smtp_password", &"[REDACTED]")
            .field("from_address", &self.from_address)
            .finish()
    }
}

/// Staff alert recipients.
#[derive(Debug, Clone, Default)]
pub struct AlertConfig {
    /// Logistics manager, alerted on low ratings
    pub manager_email: Option<String>,
    /// Support team, alerted on damaged packages
    pub support_email: Option<String>,
}

impl ServiceConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is malformed or the SMTP password
    /// is a placeholder.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Same as [`ServiceConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Env(&lookup);

        let host = env.parsed("AUTOPULSE_HOST", "127.0.0.1")?;
        let port = match env.optional("AUTOPULSE_PORT") {
            Some(_) => env.parsed("AUTOPULSE_PORT", "3000")?,
            None => env.parsed("PORT", "3000")?,
        };
        let data_dir = PathBuf::from(env.or_default("AUTOPULSE_DATA_DIR", "data"));
        let json_logs = env
            .optional("AUTOPULSE_LOG_FORMAT")
            .is_some_and(|f| f.eq_ignore_ascii_case("json"));
        let email_misconfigured =
            env.optional("SMTP_EMAIL").is_some() != env.optional("SMTP_PASSWORD").is_some();

        Ok(Self {
            host,
            port,
            data_dir,
            json_logs,
            email: EmailConfig::from_env(&env)?,
            email_misconfigured,
            alerts: AlertConfig::from_env(&env),
            sentry_dsn: env.optional("SENTRY_DSN"),
            sentry_environment: env.optional("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: env.parsed("SENTRY_SAMPLE_RATE", "1.0")?,
            sentry_traces_sample_rate: env.parsed("SENTRY_TRACES_SAMPLE_RATE", "0.0")?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl EmailConfig {
    fn from_env(env: &Env<'_>) -> Result<Option<Self>, ConfigError> {
        let (Some(smtp_username), Some(password)) =
            (env.optional("SMTP_EMAIL"), env.optional("SMTP_PASSWORD"))
        else {
            return Ok(None);
        };

        validate_not_placeholder(&password, "SMTP_PASSWORD")?;

        let from_address = env
            .optional("SMTP_FROM")
            .unwrap_or_else(|| smtp_username.clone());

        Ok(Some(Self {
            smtp_host: env.or_default("SMTP_HOST", "smtp.gmail.com"),
            smtp_port: env.parsed("SMTP_PORT", "587")?,
            smtp_username,
            smtp_password: SecretString::from(password),
            from_address,
        }))
    }

    /// Returns the SMTP password.
    #[must_use]
    pub fn password(&self) -> &str {
        self.smtp_password.expose_secret()
    }
}

impl AlertConfig {
    fn from_env(env: &Env<'_>) -> Self {
        Self {
            manager_email: env.optional("ALERT_MANAGER_EMAIL"),
            support_email: env.optional("ALERT_SUPPORT_EMAIL"),
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Variable source with the lookups the loader needs.
struct Env<'a>(&'a dyn Fn(&str) -> Option<String>);

impl Env<'_> {
    /// Get an optional variable. Empty values count as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.trim().is_empty())
    }

    /// Get a variable with a default value.
    fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }

    /// Get a variable with a default value and parse it.
    fn parsed<T>(&self, key: &str, default: &str) -> Result<T, ConfigError>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        self.or_default(key, default)
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    }
}

/// Reject secrets that are obviously copied from a sample `.env`.
fn validate_not_placeholder(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<ServiceConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        ServiceConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert!(config.email.is_none());
        assert!(config.alerts.manager_email.is_none());
        assert!(!config.json_logs);
        assert!((config.sentry_sample_rate - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_port_fallback() {
        assert_eq!(load(&[("PORT", "8080")]).unwrap().port, 8080);
        assert_eq!(
            load(&[("PORT", "8080"), ("AUTOPULSE_PORT", "9090")])
                .unwrap()
                .port,
            9090
        );
    }

    #[test]
    fn test_invalid_port() {
        let err = load(&[("AUTOPULSE_PORT", "not-a-port")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "AUTOPULSE_PORT"));
    }

    #[test]
    fn test_email_enabled_with_both_credentials() {
        let config = load(&[
            ("SMTP_EMAIL", "ops@autopulse.io"),
            ("SMTP_PASSWORD", "qkvz mwpa trle hfns"),
        ])
        .unwrap();

        assert!(!config.email_misconfigured);
        let email = config.email.unwrap();
        assert_eq!(email.smtp_host, "smtp.gmail.com");
        assert_eq!(email.smtp_port, 587);
        assert_eq!(email.from_address, "ops@autopulse.io");
        assert_eq!(email.password(), "qkvz mwpa trle hfns");
    }

    #[test]
    fn test_email_partial_credentials_fall_back_to_safe_mode() {
        for vars in [
            [("SMTP_EMAIL", "ops@autopulse.io")],
            [("SMTP_PASSWORD", "qkvzmwpa")],
        ] {
            let config = load(&vars).unwrap();
            assert!(config.email.is_none());
            assert!(config.email_misconfigured);
        }
    }

    #[test]
    fn test_blank_credentials_are_safe_mode() {
        let config = load(&[("SMTP_EMAIL", ""), ("SMTP_PASSWORD", "  ")]).unwrap();
        assert!(config.email.is_none());
        assert!(!config.email_misconfigured);
    }

    #[test]
    fn test_placeholder_password_rejected() {
        let err = load(&[
            ("SMTP_EMAIL", "ops@autopulse.io"),
            ("SMTP_PASSWORD", "your-app-password"),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::InsecureSecret(_, _)));
    }

    #[test]
    fn test_alert_recipients() {
        let config = load(&[
            ("ALERT_MANAGER_EMAIL", "manager@autopulse.io"),
            ("ALERT_SUPPORT_EMAIL", "support@autopulse.io"),
        ])
        .unwrap();
        assert_eq!(
            config.alerts.manager_email.as_deref(),
            Some("manager@autopulse.io")
        );
        assert_eq!(
            config.alerts.support_email.as_deref(),
            Some("support@autopulse.io")
        );
    }

    #[test]
    fn test_email_config_debug_redacts_secrets() {
        let config = EmailConfig {
            smtp_host: "smtp.example.com".to_string(),
            smtp_port: 587,
            smtp_username: "ops@example.com".to_string(),
            smtp_password: SecretString::from("super_secret_smtp_password"),
            from_address: "ops@example.com".to_string(),
        };

        let debug_output = format!("{config:?}");

        assert!(debug_output.contains("smtp.example.com"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_smtp_password"));
    }
}
