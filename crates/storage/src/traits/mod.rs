//! Async storage traits.
//!
//! Services depend on these rather than on [`crate::Storage`] directly.

pub mod dataset;

pub use dataset::DatasetStore;
