use async_trait::async_trait;
use equiptrack_core::{DatasetSummary, RetentionPolicy, SummaryStats};

use crate::error::StorageError;

/// Owner-scoped persistence of dataset summaries.
///
/// Every operation takes the owner explicitly. Ids belonging to another
/// owner behave exactly like ids that do not exist.
#[async_trait]
pub trait DatasetStore: Send + Sync {
    /// Retention policy enforced by [`DatasetStore::write`].
    fn retention(&self) -> RetentionPolicy;

    /// Insert a summary and evict the owner's oldest beyond the bound.
    async fn write(
        &self,
        owner: &str,
        source_name: &str,
        stats: &SummaryStats,
    ) -> Result<DatasetSummary, StorageError>;

    /// Retained summaries for `owner`, newest first.
    async fn list(&self, owner: &str) -> Result<Vec<DatasetSummary>, StorageError>;

    async fn get(&self, owner: &str, id: i64) -> Result<DatasetSummary, StorageError>;

    async fn delete(&self, owner: &str, id: i64) -> Result<(), StorageError>;
}
