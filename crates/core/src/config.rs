//! Runtime configuration snapshot, read once from the environment at startup.

use std::num::NonZeroUsize;
use std::path::PathBuf;

use crate::constants::{
    DEFAULT_DB_POOL_SIZE, DEFAULT_MAX_UPLOAD_BYTES, DEFAULT_OWNER_HEADER, DEFAULT_RETENTION_BOUND,
};
use crate::env_config::EnvKey;
use crate::retention::RetentionPolicy;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub retention: RetentionPolicy,
    pub db_pool_size: u32,
    pub owner_header: String,
    pub max_upload_bytes: usize,
}

impl AppConfig {
    /// Snapshot the `EQUIPTRACK_*` variables, falling back to defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let default_bound = NonZeroUsize::new(DEFAULT_RETENTION_BOUND).unwrap_or(NonZeroUsize::MIN);
        Self {
            db_path: EnvKey::DbPath.string().map_or_else(default_db_path, PathBuf::from),
            retention: RetentionPolicy::new(EnvKey::Retention.parse_or(default_bound)),
            db_pool_size: EnvKey::DbPoolSize.parse_or(DEFAULT_DB_POOL_SIZE).max(1),
            owner_header: EnvKey::OwnerHeader
                .string()
                .unwrap_or_else(|| DEFAULT_OWNER_HEADER.to_owned())
                .to_ascii_lowercase(),
            max_upload_bytes: EnvKey::MaxUploadBytes.parse_or(DEFAULT_MAX_UPLOAD_BYTES),
        }
    }

    /// Same as [`Self::from_env`] but pinned to an explicit database file.
    #[must_use]
    pub fn with_db_path(mut self, db_path: PathBuf) -> Self {
        self.db_path = db_path;
        self
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            retention: RetentionPolicy::default(),
            db_pool_size: DEFAULT_DB_POOL_SIZE,
            owner_header: DEFAULT_OWNER_HEADER.to_owned(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

/// `<data_local_dir>/equiptrack/datasets.db`, or the working directory when
/// the platform has no data dir.
#[must_use]
pub fn default_db_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("equiptrack")
        .join("datasets.db")
}
