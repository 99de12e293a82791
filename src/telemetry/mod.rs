pub mod store;

pub use store::{SampleStore, StoreError};

use serde::Deserialize;

/// A single telemetry observation from the backing dataset.
/// Samples handed out by `SampleStore` have passed `TryFrom<RawSample>`.
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetrySample {
    /// Deployment zone, e.g. "apac". Grouped case-insensitively.
    pub region: String,
    /// Carried through from the dataset; not used by the aggregator.
    pub service: String,
    pub latency_ms: f64,
    /// Percentage in [0, 100]
    pub uptime_pct: f64,
    pub timestamp: i64,
}

/// Record shape as it appears on disk. Serde enforces presence and
/// type of every field; value ranges are checked in `TryFrom`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSample {
    pub region: String,
    pub service: String,
    pub latency_ms: f64,
    pub uptime_pct: f64,
    pub timestamp: i64,
}

// ─── Field validators ────────────────────────────────────────────

pub fn validate_region(region: &str) -> Result<(), String> {
    if region.trim().is_empty() {
        return Err("region must be a non-empty identifier".into());
    }
    Ok(())
}

pub fn validate_latency(latency_ms: f64) -> Result<(), String> {
    if !latency_ms.is_finite() || latency_ms < 0.0 {
        return Err(format!(
            "latency_ms must be a non-negative number, got {latency_ms}"
        ));
    }
    Ok(())
}

pub fn validate_uptime(uptime_pct: f64) -> Result<(), String> {
    if !uptime_pct.is_finite() || !(0.0..=100.0).contains(&uptime_pct) {
        return Err(format!(
            "uptime_pct must be within [0, 100], got {uptime_pct}"
        ));
    }
    Ok(())
}

impl TryFrom<RawSample> for TelemetrySample {
    type Error = String;

    /// Fails on the first field that violates its constraint.
    fn try_from(raw: RawSample) -> Result<Self, Self::Error> {
        validate_region(&raw.region)?;
        validate_latency(raw.latency_ms)?;
        validate_uptime(raw.uptime_pct)?;

        Ok(Self {
            region: raw.region,
            service: raw.service,
            latency_ms: raw.latency_ms,
            uptime_pct: raw.uptime_pct,
            timestamp: raw.timestamp,
        })
    }
}
