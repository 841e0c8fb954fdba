//! CSV upload parsing.
//!
//! The header row is validated up front; data rows are converted lazily and
//! any row that cannot produce a complete record is skipped, not reported.

use csv::{ReaderBuilder, StringRecord};
use serde::{Deserialize, Serialize};

use crate::constants::{COLUMN_ALIASES, REQUIRED_COLUMNS};
use crate::error::{IngestError, Result};

/// One equipment reading. Exists only while an upload is being summarized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentRecord {
    pub kind: String,
    pub flowrate: f64,
    pub pressure: f64,
    pub temperature: f64,
}

impl EquipmentRecord {
    #[must_use]
    pub fn new(kind: impl Into<String>, flowrate: f64, pressure: f64, temperature: f64) -> Self {
        Self { kind: kind.into(), flowrate, pressure, temperature }
    }
}

#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    kind: usize,
    flowrate: usize,
    pressure: usize,
    temperature: usize,
}

impl ColumnIndex {
    fn resolve(headers: &StringRecord) -> Result<Self> {
        let positions = COLUMN_ALIASES.map(|aliases| {
            aliases.iter().find_map(|alias| headers.iter().position(|h| h == *alias))
        });

        match positions {
            [Some(kind), Some(flowrate), Some(pressure), Some(temperature)] => {
                Ok(Self { kind, flowrate, pressure, temperature })
            },
            _ => {
                let missing = REQUIRED_COLUMNS
                    .iter()
                    .zip(positions)
                    .filter(|(_, position)| position.is_none())
                    .map(|(name, _)| (*name).to_owned())
                    .collect();
                Err(IngestError::Schema { missing })
            },
        }
    }

    fn extract(self, row: &StringRecord) -> Option<EquipmentRecord> {
        let kind = row.get(self.kind).filter(|k| !k.trim().is_empty())?;
        Some(EquipmentRecord {
            kind: kind.to_owned(),
            flowrate: measurement(row.get(self.flowrate)?)?,
            pressure: measurement(row.get(self.pressure)?)?,
            temperature: measurement(row.get(self.temperature)?)?,
        })
    }
}

fn measurement(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Single-pass iterator over the usable rows of an upload, in file order.
pub struct EquipmentRecords<'a> {
    reader: csv::Reader<&'a [u8]>,
    columns: ColumnIndex,
    row: StringRecord,
    accepted: u64,
    skipped: u64,
}

impl EquipmentRecords<'_> {
    /// Rows yielded so far.
    #[must_use]
    pub const fn accepted(&self) -> u64 {
        self.accepted
    }

    /// Rows dropped so far because a field was missing or not a finite number.
    #[must_use]
    pub const fn skipped(&self) -> u64 {
        self.skipped
    }
}

impl Iterator for EquipmentRecords<'_> {
    type Item = EquipmentRecord;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.reader.read_record(&mut self.row) {
                Ok(false) => return None,
                Ok(true) => {
                    if let Some(record) = self.columns.extract(&self.row) {
                        self.accepted += 1;
                        return Some(record);
                    }
                    tracing::trace!(
                        line = self.row.position().map(csv::Position::line),
                        "skipping row with missing or non-numeric fields"
                    );
                    self.skipped += 1;
                },
                Err(e) if e.is_io_error() => {
                    tracing::warn!(error = %e, "upload read failed, stopping");
                    return None;
                },
                Err(e) => {
                    tracing::trace!(error = %e, "skipping undecodable row");
                    self.skipped += 1;
                },
            }
        }
    }
}

impl std::fmt::Debug for EquipmentRecords<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EquipmentRecords")
            .field("columns", &self.columns)
            .field("accepted", &self.accepted)
            .field("skipped", &self.skipped)
            .finish_non_exhaustive()
    }
}

/// Validate the header of `raw` and return a lazy iterator over its rows.
///
/// Fails only when a required column is absent. A missing or undecodable
/// header row counts as every column missing.
pub fn parse(raw: &[u8]) -> Result<EquipmentRecords<'_>> {
    let mut reader = ReaderBuilder::new().has_headers(true).flexible(true).from_reader(raw);

    let columns = match reader.headers() {
        Ok(headers) => ColumnIndex::resolve(headers)?,
        Err(e) => {
            tracing::debug!(error = %e, "upload header unreadable");
            return Err(IngestError::Schema {
                missing: REQUIRED_COLUMNS.iter().map(|c| (*c).to_owned()).collect(),
            });
        },
    };

    Ok(EquipmentRecords { reader, columns, row: StringRecord::new(), accepted: 0, skipped: 0 })
}
