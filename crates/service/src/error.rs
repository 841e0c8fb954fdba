//! Typed error enum for the service layer.
//!
//! Unifies ingestion and storage failures so front doors can map each one
//! to a response without downcasting.

use equiptrack_core::IngestError;
use equiptrack_storage::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Upload rejected: missing columns or nothing usable.
    #[error(transparent)]
    Ingest(#[from] IngestError),

    /// Storage operation failed (DB, pool, not found, corrupted row).
    #[error("storage: {0}")]
    Storage(#[from] StorageError),

    /// Blocking parse task panicked or was cancelled.
    #[error("background task failed: {0}")]
    Join(String),
}

impl ServiceError {
    /// Whether this error represents a not-found condition.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Storage(e) if e.is_not_found())
    }

    /// Whether the caller sent something unusable, as opposed to an infrastructure fault.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Ingest(_))
    }
}

impl From<tokio::task::JoinError> for ServiceError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Join(err.to_string())
    }
}
