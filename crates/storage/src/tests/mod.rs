//! Test utilities and module declarations for storage tests.

use std::num::NonZeroUsize;

use crate::Storage;
use equiptrack_core::{RetentionPolicy, SummaryStats};
use tempfile::TempDir;

#[allow(clippy::unwrap_used, reason = "test code")]
pub fn create_test_storage(bound: usize) -> (Storage, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");
    let retention = RetentionPolicy::new(NonZeroUsize::new(bound).unwrap());
    let storage = Storage::new(&db_path, retention).unwrap();
    (storage, temp_dir)
}

pub fn create_test_stats(record_count: u64, kind: &str) -> SummaryStats {
    SummaryStats {
        record_count,
        mean_flowrate: 10.5,
        mean_pressure: 2.25,
        mean_temperature: 40.0,
        kind_distribution: [(kind, record_count)].into_iter().collect(),
    }
}
