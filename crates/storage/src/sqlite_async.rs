//! Async trait implementations for SQLite `Storage` via `spawn_blocking`.

use async_trait::async_trait;
use equiptrack_core::{DatasetSummary, RetentionPolicy, SummaryStats};

use crate::error::StorageError;
use crate::traits::DatasetStore;
use crate::Storage;

/// Helper: run a blocking closure on the tokio blocking pool.
async fn blocking<F, T>(f: F) -> Result<T, StorageError>
where
    F: FnOnce() -> Result<T, StorageError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| StorageError::Task(format!("spawn_blocking join error: {e}")))?
}

/// Body-generating macro for async-to-blocking delegation.
///
/// Each argument is annotated with a capture kind:
/// - `@ref arg`: `.clone()` a `&T`, pass as `&arg`
/// - `@str arg`: `.to_owned()` a `&str`, pass as `&arg`
/// - `@val arg`: move directly (Copy/owned types)
macro_rules! delegate {
    ($self:ident, $method:ident $(, @$kind:ident $arg:ident)*) => {{
        let s = $self.clone();
        $(delegate!(@capture $kind $arg);)*
        blocking(move || s.$method($(delegate!(@pass $kind $arg)),*)).await
    }};
    (@capture ref $arg:ident) => { let $arg = $arg.clone(); };
    (@capture str $arg:ident) => { let $arg = $arg.to_owned(); };
    (@capture val $arg:ident) => { };
    (@pass ref $arg:ident) => { &$arg };
    (@pass str $arg:ident) => { &$arg };
    (@pass val $arg:ident) => { $arg };
}

#[async_trait]
impl DatasetStore for Storage {
    fn retention(&self) -> RetentionPolicy {
        self.retention
    }

    async fn write(
        &self,
        owner: &str,
        source_name: &str,
        stats: &SummaryStats,
    ) -> Result<DatasetSummary, StorageError> {
        delegate!(self, write_summary, @str owner, @str source_name, @ref stats)
    }

    async fn list(&self, owner: &str) -> Result<Vec<DatasetSummary>, StorageError> {
        delegate!(self, list_summaries, @str owner)
    }

    async fn get(&self, owner: &str, id: i64) -> Result<DatasetSummary, StorageError> {
        delegate!(self, get_summary, @str owner, @val id)
    }

    async fn delete(&self, owner: &str, id: i64) -> Result<(), StorageError> {
        delegate!(self, delete_summary, @str owner, @val id)
    }
}
