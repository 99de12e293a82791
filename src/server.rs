use axum::{
    http::Method,
    middleware as axum_mw,
    routing::post,
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::handlers;
use crate::middleware::timing;
use crate::AppState;

/// Builds the Axum `Router` with the metrics route and global middleware.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/latency", post(handlers::latency::get_latency_metrics))
        .with_state(state)
        // ── Global middleware (applied bottom-up) ───────────────
        .layer(axum_mw::from_fn(timing::timing_middleware))
        .layer(cors_layer())
}

/// Any origin, POST only, no credentials.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST])
        .allow_headers(Any)
        .allow_credentials(false)
}
