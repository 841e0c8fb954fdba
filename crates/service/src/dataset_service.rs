use std::sync::Arc;

use equiptrack_core::{
    parse, report_file_name, summarize, AggregateSummary, DatasetSummary, IngestError,
    ReportRenderer, RetentionPolicy, SummaryStats, TextReport,
};
use equiptrack_storage::DatasetStore;

use crate::error::ServiceError;

/// Stored when an upload arrives without a usable file name.
const FALLBACK_SOURCE_NAME: &str = "upload.csv";

/// A report ready to hand to a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedReport {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
    pub file_name: String,
}

pub struct DatasetService {
    store: Arc<dyn DatasetStore>,
    renderer: Arc<dyn ReportRenderer>,
}

fn summarize_upload(raw: &[u8]) -> Result<(SummaryStats, u64), IngestError> {
    let mut records = parse(raw)?;
    let stats = summarize(records.by_ref())?;
    Ok((stats, records.skipped()))
}

impl DatasetService {
    /// Service rendering reports as plain text.
    #[must_use]
    pub fn new(store: Arc<dyn DatasetStore>) -> Self {
        Self::with_renderer(store, Arc::new(TextReport))
    }

    #[must_use]
    pub fn with_renderer(store: Arc<dyn DatasetStore>, renderer: Arc<dyn ReportRenderer>) -> Self {
        Self { store, renderer }
    }

    #[must_use]
    pub fn retention(&self) -> RetentionPolicy {
        self.store.retention()
    }

    /// Parse, summarize and persist one upload for `owner`.
    ///
    /// The raw bytes are dropped as soon as the summary exists. Nothing is
    /// written when the upload is rejected.
    pub async fn ingest(
        &self,
        owner: &str,
        raw: Vec<u8>,
        display_name: &str,
    ) -> Result<DatasetSummary, ServiceError> {
        let size = raw.len();
        let (stats, skipped) = tokio::task::spawn_blocking(move || summarize_upload(&raw)).await??;

        if skipped > 0 {
            tracing::debug!(owner, skipped, records = stats.record_count, "Skipped unusable rows");
        }

        let source_name = match display_name.trim() {
            "" => FALLBACK_SOURCE_NAME,
            name => name,
        };
        let summary = self.store.write(owner, source_name, &stats).await?;

        tracing::info!(
            owner,
            dataset_id = summary.id,
            records = stats.record_count,
            skipped,
            bytes = size,
            "Ingested dataset"
        );
        Ok(summary)
    }

    /// The owner's retained datasets, newest first.
    pub async fn list_recent(&self, owner: &str) -> Result<Vec<DatasetSummary>, ServiceError> {
        Ok(self.store.list(owner).await?)
    }

    pub async fn get_detail(&self, owner: &str, id: i64) -> Result<DatasetSummary, ServiceError> {
        Ok(self.store.get(owner, id).await?)
    }

    pub async fn delete(&self, owner: &str, id: i64) -> Result<(), ServiceError> {
        self.store.delete(owner, id).await?;
        tracing::info!(owner, dataset_id = id, "Deleted dataset");
        Ok(())
    }

    /// Weighted statistics over exactly what `list_recent` returns right now.
    pub async fn aggregate(&self, owner: &str) -> Result<AggregateSummary, ServiceError> {
        let summaries = self.store.list(owner).await?;
        Ok(AggregateSummary::from_summaries(&summaries))
    }

    pub async fn render_report(&self, owner: &str, id: i64) -> Result<RenderedReport, ServiceError> {
        let summary = self.store.get(owner, id).await?;
        Ok(RenderedReport {
            bytes: self.renderer.render(&summary),
            content_type: self.renderer.content_type(),
            file_name: report_file_name(&summary, self.renderer.as_ref()),
        })
    }
}
