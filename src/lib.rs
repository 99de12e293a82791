//! Per-region latency and uptime summaries over a static telemetry
//! dataset, served at `POST /api/latency`.

pub mod config;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod server;
pub mod telemetry;

use telemetry::SampleStore;

/// Shared application state available to every handler via `State<Arc<AppState>>`.
pub struct AppState {
    /// Loaded on the first request, read-only afterwards.
    pub store: SampleStore,
}

impl AppState {
    pub fn new(store: SampleStore) -> Self {
        Self { store }
    }
}
