//! `SQLite` storage implementation.
//!
//! All methods are synchronous; `sqlite_async` wraps them for async callers.

mod datasets;

use equiptrack_core::constants::DEFAULT_DB_POOL_SIZE;
use equiptrack_core::{AppConfig, RetentionPolicy};
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use std::path::Path;

use crate::error::StorageError;
use crate::migrations;

/// Type alias for pooled connection
pub(crate) type PooledConn = PooledConnection<SqliteConnectionManager>;

/// Dataset store wrapping a `SQLite` connection pool.
///
/// Cloning is cheap and shares the pool.
#[derive(Clone, Debug)]
pub struct Storage {
    pub(crate) pool: Pool<SqliteConnectionManager>,
    pub(crate) retention: RetentionPolicy,
}

/// Get a connection from the pool
pub(crate) fn get_conn(pool: &Pool<SqliteConnectionManager>) -> Result<PooledConn, StorageError> {
    Ok(pool.get()?)
}

/// Parse JSON from a TEXT column, converting error to rusqlite error
pub(crate) fn parse_json<T: serde::de::DeserializeOwned>(
    idx: usize,
    s: &str,
) -> rusqlite::Result<T> {
    serde_json::from_str(s).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

/// Log row read errors and filter them out
pub(crate) fn log_row_error<T>(result: rusqlite::Result<T>) -> Option<T> {
    match result {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::warn!("Row read error: {}", e);
            None
        },
    }
}

/// Connection initializer for concurrency settings
fn init_connection(conn: &mut Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        "PRAGMA busy_timeout = 30000;
         PRAGMA journal_mode = WAL;
         PRAGMA synchronous = NORMAL;",
    )?;
    Ok(())
}

impl Storage {
    /// Open (or create) the database at `db_path` with the default pool size.
    pub fn new(db_path: &Path, retention: RetentionPolicy) -> Result<Self, StorageError> {
        Self::with_pool_size(db_path, retention, DEFAULT_DB_POOL_SIZE)
    }

    /// Open the database described by `config`.
    pub fn from_config(config: &AppConfig) -> Result<Self, StorageError> {
        Self::with_pool_size(&config.db_path, config.retention, config.db_pool_size)
    }

    pub fn with_pool_size(
        db_path: &Path,
        retention: RetentionPolicy,
        pool_size: u32,
    ) -> Result<Self, StorageError> {
        let manager = SqliteConnectionManager::file(db_path).with_init(init_connection);
        let pool = Pool::builder().max_size(pool_size.max(1)).build(manager)?;

        // Run migrations on first connection
        let conn = pool.get()?;
        migrations::run_migrations(&conn).map_err(|e| StorageError::Migration(e.to_string()))?;
        drop(conn);

        tracing::info!(
            pool_size,
            retention = retention.bound(),
            path = %db_path.display(),
            "Storage initialized with connection pool"
        );

        Ok(Self { pool, retention })
    }

    /// Retention policy applied on every write.
    #[must_use]
    pub const fn retention(&self) -> RetentionPolicy {
        self.retention
    }
}
