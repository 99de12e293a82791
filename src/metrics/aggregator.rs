use std::collections::HashMap;

use super::percentiles::percentile;
use super::stats::{mean, round_to};
use super::{MetricsError, RegionMetrics};
use crate::telemetry::TelemetrySample;

// ─── Configuration ───────────────────────────────────────────────

const P95_RANK: f64 = 0.95;
const LATENCY_PLACES: usize = 2;
const UPTIME_PLACES: usize = 3;

// ─── Internal state ──────────────────────────────────────────────

/// Running values for one region group. The label is taken from the
/// first sample seen for the group.
struct RegionBucket {
    label: String,
    latencies: Vec<f64>,
    uptimes: Vec<f64>,
    breaches: u64,
}

impl RegionBucket {
    fn new(label: &str) -> Self {
        Self {
            label: label.to_owned(),
            latencies: Vec::new(),
            uptimes: Vec::new(),
            breaches: 0,
        }
    }

    fn push(&mut self, sample: &TelemetrySample, threshold: f64) {
        self.latencies.push(sample.latency_ms);
        self.uptimes.push(sample.uptime_pct);
        if sample.latency_ms > threshold {
            self.breaches += 1;
        }
    }

    fn finish(self) -> Result<RegionMetrics, MetricsError> {
        let p95 = percentile(&self.latencies, P95_RANK)?;

        Ok(RegionMetrics {
            region: self.label,
            avg_latency: mean(&self.latencies).map(|m| round_to(m, LATENCY_PLACES)),
            p95_latency: Some(round_to(p95, LATENCY_PLACES)),
            avg_uptime: mean(&self.uptimes).map(|m| round_to(m, UPTIME_PLACES)),
            breaches: self.breaches,
        })
    }
}

// ─── Public entry point ──────────────────────────────────────────

/// Group `samples` by lowercased region and summarise each group.
///
/// The returned map is keyed by the lowercased region; each entry's
/// `region` is the casing of the first sample in that group. The
/// threshold is not range-checked: with `threshold <= 0` every sample
/// with positive latency counts as a breach.
pub fn compute_metrics(
    samples: &[TelemetrySample],
    threshold: f64,
) -> Result<HashMap<String, RegionMetrics>, MetricsError> {
    let mut buckets: HashMap<String, RegionBucket> = HashMap::new();

    for sample in samples {
        buckets
            .entry(sample.region.to_lowercase())
            .or_insert_with(|| RegionBucket::new(&sample.region))
            .push(sample, threshold);
    }

    buckets
        .into_iter()
        .map(|(key, bucket)| bucket.finish().map(|metrics| (key, metrics)))
        .collect()
}
