use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use crate::metrics::{compute_metrics, RegionMetrics};
use crate::telemetry::SampleStore;
use crate::AppState;

use super::ApiError;

// ─── Request / response types ────────────────────────────────────

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LatencyRequest {
    /// Region identifiers to report on, echoed back verbatim
    pub regions: Vec<String>,
    /// Latency above which a sample counts as a breach (ms)
    pub threshold_ms: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsResponse {
    pub metrics: Vec<RegionMetrics>,
}

impl LatencyRequest {
    /// At least one region and a threshold strictly above zero (NaN fails).
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.regions.is_empty() {
            return Err(ApiError::InvalidRequest(
                "regions must contain at least one region identifier".into(),
            ));
        }
        if !(self.threshold_ms > 0.0) {
            return Err(ApiError::InvalidRequest(
                "threshold must be positive".into(),
            ));
        }
        Ok(())
    }
}

// ─── POST /api/latency ───────────────────────────────────────────

pub async fn get_latency_metrics(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LatencyRequest>, JsonRejection>,
) -> Result<Json<MetricsResponse>, ApiError> {
    let Json(request) =
        payload.map_err(|rejection| ApiError::InvalidRequest(rejection.body_text()))?;

    latency_metrics(&state.store, &request).await.map(Json)
}

/// Validate, aggregate, then lay the results out in request order.
/// Nothing is loaded or computed for a request that fails validation.
pub async fn latency_metrics(
    store: &SampleStore,
    request: &LatencyRequest,
) -> Result<MetricsResponse, ApiError> {
    request.validate()?;

    let samples = store.load_samples().await?;
    let by_region = compute_metrics(samples, request.threshold_ms)?;

    debug!(
        requested = request.regions.len(),
        known = by_region.len(),
        threshold_ms = request.threshold_ms,
        "latency metrics computed"
    );

    Ok(MetricsResponse {
        metrics: shape_metrics(&request.regions, &by_region),
    })
}

/// One entry per requested region, in order, duplicates included.
/// Each entry carries the caller's spelling of the region; regions
/// with no samples get the "no data" placeholder.
pub fn shape_metrics(
    regions: &[String],
    by_region: &HashMap<String, RegionMetrics>,
) -> Vec<RegionMetrics> {
    regions
        .iter()
        .map(|region| match by_region.get(&region.to_lowercase()) {
            Some(found) => found.relabel(region.as_str()),
            None => RegionMetrics::no_data(region.as_str()),
        })
        .collect()
}
