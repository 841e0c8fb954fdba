//! Typed error enum for the storage layer.
//!
//! Callers match on specific failure modes (not found, busy database,
//! corrupted row) instead of downcasting opaque boxes.

use thiserror::Error;

/// Storage-layer error with variants covering every expected failure mode.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Row absent, or owned by someone else. The two are never distinguished.
    #[error("not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    /// SQL / connection failure.
    #[error("database error: {0}")]
    Database(#[source] rusqlite::Error),

    /// No pooled connection could be obtained.
    #[error("connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    /// Row data could not be deserialized into domain type.
    #[error("data corruption: {context}")]
    DataCorruption {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Migration failure.
    #[error("migration error: {0}")]
    Migration(String),

    /// Blocking task panicked or was cancelled before finishing.
    #[error("blocking task failed: {0}")]
    Task(String),
}

impl StorageError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub(crate) fn dataset_not_found(id: i64) -> Self {
        Self::NotFound { entity: "dataset", id: id.to_string() }
    }
}

/// Custom `From<rusqlite::Error>`, not a blanket `#[from]`.
///
/// - `QueryReturnedNoRows` → `NotFound` (generic; callers remap with entity context)
/// - Everything else → `Database`
impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::QueryReturnedNoRows => {
                Self::NotFound { entity: "row", id: "unknown".into() }
            },
            other => Self::Database(other),
        }
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        Self::DataCorruption {
            context: "JSON serialization/deserialization".to_owned(),
            source: Box::new(err),
        }
    }
}
