//! Per-upload summary statistics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::MEAN_PRECISION_DIGITS;
use crate::distribution::KindDistribution;
use crate::error::{IngestError, Result};
use crate::record::EquipmentRecord;

/// Statistics reduced from one upload's records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    /// Records that contributed, always at least 1.
    pub record_count: u64,
    pub mean_flowrate: f64,
    pub mean_pressure: f64,
    pub mean_temperature: f64,
    pub kind_distribution: KindDistribution,
}

/// A persisted upload summary. The only form in which ingested data survives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub id: i64,
    pub owner: String,
    pub source_name: String,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub stats: SummaryStats,
}

/// Round to the stored display precision, ties to even.
///
/// Magnitudes too large to scale have no fractional digits and pass through.
#[must_use]
pub fn round_mean(value: f64) -> f64 {
    let scale = 10_f64.powi(MEAN_PRECISION_DIGITS);
    let scaled = value * scale;
    if scaled.is_finite() { scaled.round_ties_even() / scale } else { value }
}

/// Incremental weighted mean.
///
/// Each step blends the previous mean and the new value by their share of
/// the total weight, so no raw sum is ever formed and finite inputs keep
/// the mean finite.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct RunningMean {
    weight: u64,
    mean: f64,
}

impl RunningMean {
    pub(crate) fn push(&mut self, value: f64, weight: u64) {
        if weight == 0 {
            return;
        }
        self.weight += weight;
        #[allow(clippy::cast_precision_loss, reason = "record counts stay far below 2^52")]
        let share = weight as f64 / self.weight as f64;
        self.mean = self.mean * (1.0 - share) + value * share;
    }

    pub(crate) const fn get(&self) -> f64 {
        self.mean
    }
}

#[derive(Default)]
struct Accumulator {
    count: u64,
    flowrate: RunningMean,
    pressure: RunningMean,
    temperature: RunningMean,
    kinds: KindDistribution,
}

impl Accumulator {
    fn push(&mut self, record: &EquipmentRecord) {
        self.count += 1;
        self.flowrate.push(record.flowrate, 1);
        self.pressure.push(record.pressure, 1);
        self.temperature.push(record.temperature, 1);
        self.kinds.record(&record.kind);
    }
}

/// Reduce `records` into a [`SummaryStats`].
///
/// Means are rounded once, here, so what is stored is what is displayed.
pub fn summarize<I>(records: I) -> Result<SummaryStats>
where
    I: IntoIterator<Item = EquipmentRecord>,
{
    let mut acc = Accumulator::default();
    for record in records {
        acc.push(&record);
    }

    if acc.count == 0 {
        return Err(IngestError::EmptyInput);
    }

    Ok(SummaryStats {
        record_count: acc.count,
        mean_flowrate: round_mean(acc.flowrate.get()),
        mean_pressure: round_mean(acc.pressure.get()),
        mean_temperature: round_mean(acc.temperature.get()),
        kind_distribution: acc.kinds,
    })
}
