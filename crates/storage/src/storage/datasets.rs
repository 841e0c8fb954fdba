use chrono::{DateTime, SecondsFormat, SubsecRound as _, Utc};
use equiptrack_core::{DatasetSummary, KindDistribution, SummaryStats};
use rusqlite::types::Type;
use rusqlite::{params, OptionalExtension as _, TransactionBehavior};

use super::{get_conn, log_row_error, parse_json, Storage};
use crate::error::StorageError;

const SUMMARY_COLUMNS: &str = "id, owner, source_name, created_at, record_count, \
     mean_flowrate, mean_pressure, mean_temperature, kind_distribution";

/// Fixed-width RFC 3339 so TEXT ordering matches chronological ordering.
fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(idx: usize, raw: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|d| d.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

impl Storage {
    /// Persist a new summary for `owner` and evict that owner's oldest
    /// summaries beyond the retention bound, in one write transaction.
    ///
    /// `created_at` never moves backwards within an owner, so the summary
    /// just written is always the newest and always survives eviction.
    pub fn write_summary(
        &self,
        owner: &str,
        source_name: &str,
        stats: &SummaryStats,
    ) -> Result<DatasetSummary, StorageError> {
        let record_count = i64::try_from(stats.record_count).map_err(|e| {
            StorageError::DataCorruption {
                context: format!("record_count {} exceeds SQLite INTEGER", stats.record_count),
                source: Box::new(e),
            }
        })?;
        let distribution = serde_json::to_string(&stats.kind_distribution)?;

        let mut conn = get_conn(&self.pool)?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let latest: Option<String> = tx.query_row(
            "SELECT MAX(created_at) FROM datasets WHERE owner = ?1",
            params![owner],
            |row| row.get(0),
        )?;
        let now = Utc::now().trunc_subsecs(6);
        let created_at = match latest.as_deref().map(|raw| parse_timestamp(0, raw)).transpose()? {
            Some(prev) if prev > now => prev,
            _ => now,
        };

        tx.execute(
            r#"INSERT INTO datasets
               (owner, source_name, created_at, record_count, mean_flowrate, mean_pressure,
                mean_temperature, kind_distribution)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"#,
            params![
                owner,
                source_name,
                format_timestamp(&created_at),
                record_count,
                stats.mean_flowrate,
                stats.mean_pressure,
                stats.mean_temperature,
                distribution,
            ],
        )?;
        let id = tx.last_insert_rowid();

        let oldest_first: Vec<i64> = {
            let mut stmt = tx.prepare(
                "SELECT id FROM datasets WHERE owner = ?1 ORDER BY created_at ASC, id ASC",
            )?;
            let ids = stmt
                .query_map(params![owner], |row| row.get(0))?
                .collect::<rusqlite::Result<Vec<i64>>>()?;
            ids
        };

        let eviction = self.retention.evict(oldest_first);
        {
            let mut delete = tx.prepare("DELETE FROM datasets WHERE id = ?1")?;
            for evicted in &eviction.evicted {
                delete.execute(params![evicted])?;
            }
        }

        tx.commit()?;

        if !eviction.evicted.is_empty() {
            tracing::info!(
                owner,
                dataset_id = id,
                evicted = ?eviction.evicted,
                "Evicted datasets beyond retention bound"
            );
        }

        Ok(DatasetSummary {
            id,
            owner: owner.to_owned(),
            source_name: source_name.to_owned(),
            created_at,
            stats: stats.clone(),
        })
    }

    /// The owner's retained summaries, newest first, at most `bound` of them.
    pub fn list_summaries(&self, owner: &str) -> Result<Vec<DatasetSummary>, StorageError> {
        let conn = get_conn(&self.pool)?;
        let sql = format!(
            "SELECT {SUMMARY_COLUMNS} FROM datasets WHERE owner = ?1 \
             ORDER BY created_at DESC, id DESC LIMIT ?2"
        );
        let mut stmt = conn.prepare(&sql)?;
        let limit = i64::try_from(self.retention.bound()).unwrap_or(i64::MAX);
        let results = stmt
            .query_map(params![owner, limit], Self::row_to_summary)?
            .filter_map(log_row_error)
            .collect();
        Ok(results)
    }

    /// Point lookup. Foreign and absent ids both yield `NotFound`.
    pub fn get_summary(&self, owner: &str, id: i64) -> Result<DatasetSummary, StorageError> {
        let conn = get_conn(&self.pool)?;
        let sql = format!("SELECT {SUMMARY_COLUMNS} FROM datasets WHERE id = ?1 AND owner = ?2");
        conn.query_row(&sql, params![id, owner], Self::row_to_summary)
            .optional()?
            .ok_or_else(|| StorageError::dataset_not_found(id))
    }

    /// Delete one summary. Never backfills previously evicted summaries.
    pub fn delete_summary(&self, owner: &str, id: i64) -> Result<(), StorageError> {
        let conn = get_conn(&self.pool)?;
        let removed = conn.execute(
            "DELETE FROM datasets WHERE id = ?1 AND owner = ?2",
            params![id, owner],
        )?;
        if removed == 0 {
            return Err(StorageError::dataset_not_found(id));
        }
        tracing::debug!(owner, dataset_id = id, "Deleted dataset");
        Ok(())
    }

    /// Total rows stored for `owner`, ignoring the listing limit.
    pub fn count_summaries(&self, owner: &str) -> Result<usize, StorageError> {
        let conn = get_conn(&self.pool)?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM datasets WHERE owner = ?1",
            params![owner],
            |row| row.get(0),
        )?;
        Ok(usize::try_from(count).unwrap_or_default())
    }

    pub(crate) fn row_to_summary(row: &rusqlite::Row<'_>) -> rusqlite::Result<DatasetSummary> {
        let record_count: i64 = row.get(4)?;
        let record_count = u64::try_from(record_count)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Integer, Box::new(e)))?;
        let kind_distribution: KindDistribution = parse_json(8, &row.get::<_, String>(8)?)?;

        Ok(DatasetSummary {
            id: row.get(0)?,
            owner: row.get(1)?,
            source_name: row.get(2)?,
            created_at: parse_timestamp(3, &row.get::<_, String>(3)?)?,
            stats: SummaryStats {
                record_count,
                mean_flowrate: row.get(5)?,
                mean_pressure: row.get(6)?,
                mean_temperature: row.get(7)?,
                kind_distribution,
            },
        })
    }
}
