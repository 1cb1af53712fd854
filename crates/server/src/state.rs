//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::ServiceConfig;
use crate::db::{DataStore, RepositoryError};
use crate::services::Notifier;

/// Error building the application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("data store: {0}")]
    Store(#[from] RepositoryError),
    #[error("email transport: {0}")]
    Email(#[from] lettre::transport::smtp::Error),
}

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServiceConfig,
    store: DataStore,
    notifier: Notifier,
}

impl AppState {
    /// Create the application state.
    ///
    /// Prepares the data directory and builds the notifier. Notifications
    /// are disabled when the configuration carries no SMTP credentials.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be prepared or the SMTP
    /// relay parameters are invalid.
    pub async fn new(config: ServiceConfig) -> Result<Self, StateError> {
        let store = DataStore::open(&config.data_dir).await?;
        let notifier = Notifier::from_config(config.email.as_ref(), &config.alerts)?;

        Ok(Self::from_parts(config, store, notifier))
    }

    /// Assemble state from already-built parts.
    #[must_use]
    pub fn from_parts(config: ServiceConfig, store: DataStore, notifier: Notifier) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                notifier,
            }),
        }
    }

    /// Get a reference to the service configuration.
    #[must_use]
    pub fn config(&self) -> &ServiceConfig {
        &self.inner.config
    }

    /// Get a reference to the collection store.
    #[must_use]
    pub fn store(&self) -> &DataStore {
        &self.inner.store
    }

    /// Get a reference to the notifier.
    #[must_use]
    pub fn notifier(&self) -> &Notifier {
        &self.inner.notifier
    }
}
