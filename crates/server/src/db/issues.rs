//! Issue collection repository.

use autopulse_core::{IssueRecord, Priority};

use super::{Collection, DataStore, RepositoryError};

/// Repository for the derived issue collection.
pub struct IssueRepository<'a> {
    store: &'a DataStore,
}

impl<'a> IssueRepository<'a> {
    /// Create a new issue repository.
    #[must_use]
    pub const fn new(store: &'a DataStore) -> Self {
        Self { store }
    }

    /// All issues in arrival order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the collection cannot be read or parsed.
    pub async fn list(&self) -> Result<Vec<IssueRecord>, RepositoryError> {
        self.store.read_all(Collection::Issues).await
    }

    /// Issues with the given priority, in arrival order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the collection cannot be read or parsed.
    pub async fn list_by_priority(
        &self,
        priority: Priority,
    ) -> Result<Vec<IssueRecord>, RepositoryError> {
        let mut issues = self.list().await?;
        issues.retain(|i| i.priority == priority);
        Ok(issues)
    }

    /// Append the issues derived from one submission in a single write.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the collection cannot be read or written.
    pub async fn append_all(&self, issues: &[IssueRecord]) -> Result<(), RepositoryError> {
        self.store.append_all(Collection::Issues, issues).await
    }
}
