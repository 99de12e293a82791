pub mod aggregator;
pub mod percentiles;
pub mod stats;

pub use aggregator::compute_metrics;
pub use percentiles::percentile;

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetricsError {
    /// Unreachable while every region group holds at least one sample.
    #[error("cannot compute percentile of an empty sequence")]
    EmptyPercentileInput,
}

/// Summary statistics for one region at a given breach threshold.
/// Serialized straight into the `/api/latency` response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionMetrics {
    pub region: String,
    /// Mean latency (ms), 2 decimal places
    pub avg_latency: Option<f64>,
    /// Nearest-rank p95 latency (ms), 2 decimal places
    pub p95_latency: Option<f64>,
    /// Mean uptime (%), 3 decimal places
    pub avg_uptime: Option<f64>,
    /// Samples with latency strictly above the threshold
    pub breaches: u64,
}

impl RegionMetrics {
    /// Placeholder for a requested region the dataset has never seen.
    pub fn no_data(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            avg_latency: None,
            p95_latency: None,
            avg_uptime: None,
            breaches: 0,
        }
    }

    /// Same figures under a different display label.
    pub fn relabel(&self, region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            ..self.clone()
        }
    }

    pub fn has_data(&self) -> bool {
        self.avg_latency.is_some()
    }
}
