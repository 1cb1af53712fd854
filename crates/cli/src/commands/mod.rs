//! Subcommand implementations.

pub mod issues;
pub mod stats;
pub mod verify;

use autopulse_server::db::RepositoryError;
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Reading or writing a collection failed.
    #[error("{0}")]
    Repository(#[from] RepositoryError),

    /// Output could not be encoded.
    #[error("Failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),
}
