//! File-backed persistence for the feedback and issue collections.
//!
//! # Layout
//!
//! ```text
//! <data_dir>/
//!   feedback.json   - JSON array of FeedbackRecord, arrival order
//!   issues.json     - JSON array of IssueRecord, arrival order
//! ```
//!
//! Every append reads the whole collection, pushes, and writes the whole
//! collection back through a temporary file that is renamed into place.
//! Appends within one process are serialized; two processes sharing a data
//! directory can still lose updates.
//!
//! A collection that fails to parse is reported as
//! [`RepositoryError::DataCorruption`] on read and is never overwritten by an
//! append.

pub mod feedback;
pub mod issues;

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;

pub use feedback::FeedbackRepository;
pub use issues::IssueRepository;

/// The two named collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Feedback,
    Issues,
}

impl Collection {
    /// Every collection, in initialization order.
    pub const ALL: [Self; 2] = [Self::Feedback, Self::Issues];

    /// File name inside the data directory.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Feedback => "feedback.json",
            Self::Issues => "issues.json",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.file_name())
    }
}

/// Errors from the collection store.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Reading or writing a collection file failed.
    #[error("I/O error on {collection}: {source}")]
    Io {
        collection: Collection,
        #[source]
        source: std::io::Error,
    },

    /// Creating the data directory failed.
    #[error("cannot prepare data directory {path}: {source}")]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A collection file exists but does not hold a valid record array.
    #[error("data corruption in {collection}: {source}")]
    DataCorruption {
        collection: Collection,
        #[source]
        source: serde_json::Error,
    },

    /// Records could not be encoded.
    #[error("failed to encode {collection}: {source}")]
    Encode {
        collection: Collection,
        #[source]
        source: serde_json::Error,
    },
}

/// Append-only JSON collection store rooted at a data directory.
pub struct DataStore {
    dir: PathBuf,
    write_lock: Mutex<()>,
}

impl DataStore {
    /// Create a store over `dir` without touching the filesystem.
    ///
    /// Missing collection files read as empty.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Create the data directory and any missing collection files.
    ///
    /// Existing files are left as they are, even if corrupt.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::DataDir` or `RepositoryError::Io` if the
    /// directory or a file cannot be created.
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self, RepositoryError> {
        let store = Self::new(dir);

        tokio::fs::create_dir_all(&store.dir)
            .await
            .map_err(|source| RepositoryError::DataDir {
                path: store.dir.clone(),
                source,
            })?;

        for collection in Collection::ALL {
            let path = store.path(collection);
            if !tokio::fs::try_exists(&path)
                .await
                .map_err(|source| RepositoryError::Io { collection, source })?
            {
                tokio::fs::write(&path, "[]\n")
                    .await
                    .map_err(|source| RepositoryError::Io { collection, source })?;
                tracing::info!(path = %path.display(), "Initialized empty collection");
            }
        }

        Ok(store)
    }

    /// The data directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of a collection file.
    #[must_use]
    pub fn path(&self, collection: Collection) -> PathBuf {
        self.dir.join(collection.file_name())
    }

    /// Read every record of a collection, in stored order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Io` if the file cannot be read and
    /// `RepositoryError::DataCorruption` if it does not parse.
    pub async fn read_all<T: DeserializeOwned>(
        &self,
        collection: Collection,
    ) -> Result<Vec<T>, RepositoryError> {
        let bytes = match tokio::fs::read(self.path(collection)).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => return Err(RepositoryError::Io { collection, source }),
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        serde_json::from_slice(&bytes)
            .map_err(|source| RepositoryError::DataCorruption { collection, source })
    }

    /// Append records to a collection with one read-modify-write.
    ///
    /// An empty batch leaves the file untouched.
    ///
    /// # Errors
    ///
    /// Fails without writing if the current contents cannot be read or
    /// parsed, and with `RepositoryError::Io` if the write fails.
    pub async fn append_all<T>(
        &self,
        collection: Collection,
        records: &[T],
    ) -> Result<(), RepositoryError>
    where
        T: Serialize + DeserializeOwned + Clone,
    {
        if records.is_empty() {
            return Ok(());
        }

        let _guard = self.write_lock.lock().await;

        let mut all: Vec<T> = self.read_all(collection).await?;
        all.extend_from_slice(records);

        let mut bytes = serde_json::to_vec_pretty(&all)
            .map_err(|source| RepositoryError::Encode { collection, source })?;
        bytes.push(b'\n');

        let path = self.path(collection);
        let tmp_path = path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, bytes)
            .await
            .map_err(|source| RepositoryError::Io { collection, source })?;
        tokio::fs::rename(&tmp_path, &path)
            .await
            .map_err(|source| RepositoryError::Io { collection, source })?;

        tracing::debug!(
            collection = %collection,
            appended = records.len(),
            total = all.len(),
            "Collection written"
        );
        Ok(())
    }
}
