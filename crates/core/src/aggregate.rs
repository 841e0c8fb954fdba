//! Record-count-weighted statistics across an owner's retained datasets.
//!
//! Pure computation over whatever summaries the caller passes in; the
//! service feeds it exactly the current `list(owner)` result on every call.

use serde::{Deserialize, Serialize};

use crate::distribution::KindDistribution;
use crate::summary::{round_mean, DatasetSummary, RunningMean};

/// Live cross-dataset summary. Never stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateSummary {
    /// Number of summaries that contributed.
    pub dataset_count: usize,
    /// Sum of `record_count` over contributing summaries.
    pub total_equipment: u64,
    pub mean_flowrate: f64,
    pub mean_pressure: f64,
    pub mean_temperature: f64,
    pub kind_distribution: KindDistribution,
}

#[derive(Default)]
struct WeightedMeans {
    flowrate: RunningMean,
    pressure: RunningMean,
    temperature: RunningMean,
}

impl AggregateSummary {
    /// Weight each summary's means by its record count and merge distributions.
    ///
    /// An empty input yields the zero-valued summary.
    #[must_use]
    pub fn from_summaries<'a, I>(summaries: I) -> Self
    where
        I: IntoIterator<Item = &'a DatasetSummary>,
    {
        let mut out = Self::default();
        let mut means = WeightedMeans::default();

        for summary in summaries {
            let stats = &summary.stats;
            out.dataset_count += 1;
            out.total_equipment += stats.record_count;
            means.flowrate.push(stats.mean_flowrate, stats.record_count);
            means.pressure.push(stats.mean_pressure, stats.record_count);
            means.temperature.push(stats.mean_temperature, stats.record_count);
            out.kind_distribution.merge(&stats.kind_distribution);
        }

        if out.total_equipment > 0 {
            out.mean_flowrate = round_mean(means.flowrate.get());
            out.mean_pressure = round_mean(means.pressure.get());
            out.mean_temperature = round_mean(means.temperature.get());
        }

        out
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dataset_count == 0
    }
}
