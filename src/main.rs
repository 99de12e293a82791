use anyhow::Result;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use latency_metrics_api::config::ServiceConfig;
use latency_metrics_api::telemetry::SampleStore;
use latency_metrics_api::{server, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1. Configuration ─────────────────────────────────────────
    let config = ServiceConfig::load()?;

    // ── 2. Logging ───────────────────────────────────────────────
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if config.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer())
            .init();
    }

    info!(
        version = env!("CARGO_PKG_VERSION"),
        data_path = %config.data_path.display(),
        "starting latency metrics API"
    );

    // ── 3. Shared state (dataset loads on first request) ─────────
    let state = Arc::new(AppState::new(SampleStore::new(&config.data_path)));

    // ── 4. Router, bind & serve ──────────────────────────────────
    let app = server::create_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %config.bind_addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
