//! Shared constants for equiptrack.
//!
//! Centralizes values that the parser, store and front door all agree on.

/// Header names that every upload must carry, in canonical order.
pub const REQUIRED_COLUMNS: [&str; 4] = [COLUMN_KIND, COLUMN_FLOWRATE, COLUMN_PRESSURE, COLUMN_TEMPERATURE];

/// Header of the equipment category column.
pub const COLUMN_KIND: &str = "kind";

/// Header of the flowrate measurement column.
pub const COLUMN_FLOWRATE: &str = "flowrate";

/// Header of the pressure measurement column.
pub const COLUMN_PRESSURE: &str = "pressure";

/// Header of the temperature measurement column.
pub const COLUMN_TEMPERATURE: &str = "temperature";

/// Exact header names accepted for each required column, canonical name
/// first. The capitalised forms are what the legacy upload export writes.
pub const COLUMN_ALIASES: [&[&str]; 4] = [
    &[COLUMN_KIND, "Type"],
    &[COLUMN_FLOWRATE, "Flowrate"],
    &[COLUMN_PRESSURE, "Pressure"],
    &[COLUMN_TEMPERATURE, "Temperature"],
];

/// Number of summaries kept per owner when nothing else is configured.
pub const DEFAULT_RETENTION_BOUND: usize = 5;

/// Decimal places kept on every stored or reported mean.
pub const MEAN_PRECISION_DIGITS: i32 = 2;

/// SQLite connection pool size when `EQUIPTRACK_DB_POOL_SIZE` is unset.
pub const DEFAULT_DB_POOL_SIZE: u32 = 8;

/// Header carrying the authenticated owner when `EQUIPTRACK_OWNER_HEADER` is unset.
pub const DEFAULT_OWNER_HEADER: &str = "x-owner-id";

/// Upload body limit in bytes (10 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
