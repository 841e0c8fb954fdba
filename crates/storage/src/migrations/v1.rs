//! Migration v1: datasets table

pub(super) const SQL: &str = "
CREATE TABLE IF NOT EXISTS datasets (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    owner TEXT NOT NULL,
    source_name TEXT NOT NULL,
    created_at TEXT NOT NULL,
    record_count INTEGER NOT NULL CHECK (record_count >= 1),
    mean_flowrate REAL NOT NULL,
    mean_pressure REAL NOT NULL,
    mean_temperature REAL NOT NULL,
    kind_distribution TEXT NOT NULL DEFAULT '{}'
);

CREATE INDEX IF NOT EXISTS idx_datasets_owner_created ON datasets(owner, created_at, id);
";
