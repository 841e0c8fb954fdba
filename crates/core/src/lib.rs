//! Core types for equiptrack
//!
//! CSV parsing, per-upload summaries, the kind distribution merge, the
//! retention policy and the weighted aggregate. Everything here is pure; the
//! storage and service crates add persistence and ownership.

pub mod aggregate;
pub mod config;
pub mod constants;
pub mod distribution;
pub mod env_config;
mod error;
pub mod record;
pub mod report;
pub mod retention;
pub mod summary;

pub use aggregate::AggregateSummary;
pub use config::AppConfig;
pub use distribution::KindDistribution;
pub use error::*;
pub use record::{parse, EquipmentRecord, EquipmentRecords};
pub use report::{report_file_name, ReportRenderer, TextReport};
pub use retention::{Eviction, RetentionPolicy};
pub use summary::{round_mean, summarize, DatasetSummary, SummaryStats};
