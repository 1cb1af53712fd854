//! Feedback collection repository.

use autopulse_core::FeedbackRecord;

use super::{Collection, DataStore, RepositoryError};

/// Repository for the feedback collection.
pub struct FeedbackRepository<'a> {
    store: &'a DataStore,
}

impl<'a> FeedbackRepository<'a> {
    /// Create a new feedback repository.
    #[must_use]
    pub const fn new(store: &'a DataStore) -> Self {
        Self { store }
    }

    /// All feedback in arrival order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the collection cannot be read or parsed.
    pub async fn list(&self) -> Result<Vec<FeedbackRecord>, RepositoryError> {
        self.store.read_all(Collection::Feedback).await
    }

    /// Append one feedback record.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the collection cannot be read or written.
    pub async fn append(&self, record: &FeedbackRecord) -> Result<(), RepositoryError> {
        self.store
            .append_all(Collection::Feedback, std::slice::from_ref(record))
            .await
    }
}
