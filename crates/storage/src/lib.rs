//! Storage layer for equiptrack
//!
//! SQLite-backed persistence of dataset summaries. Every write enforces the
//! per-owner retention bound inside the same transaction that inserts the row.

mod error;
mod migrations;
mod sqlite_async;
mod storage;
#[cfg(test)]
mod tests;
pub mod traits;

pub use error::StorageError;
pub use storage::Storage;
pub use traits::DatasetStore;
