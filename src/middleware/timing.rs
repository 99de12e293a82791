use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::info;

/// Measures each request end to end, including dataset loading and
/// aggregation. Browser dashboards calling `/api/latency` cross-origin
/// read the figure from `Server-Timing`; scripts can use the plain
/// microsecond header:
///
///   X-Response-Time-Us  — total handler wall time in microseconds
///   Server-Timing       — same value in milliseconds, `total;dur=<ms>`
///
/// Every `/api/` request also gets one `info` log line.
pub async fn timing_middleware(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_owned();

    let start = Instant::now();
    let mut response = next.run(req).await;
    let elapsed = start.elapsed();
    let us = elapsed.as_micros();

    // ── Inject response headers ─────────────────────────────────
    if let Ok(val) = us.to_string().parse() {
        response.headers_mut().insert("X-Response-Time-Us", val);
    }

    let server_timing =
        format!("total;dur={:.3}", elapsed.as_secs_f64() * 1000.0);
    if let Ok(val) = server_timing.parse() {
        response.headers_mut().insert("Server-Timing", val);
    }

    if path.starts_with("/api/") {
        info!(
            status = response.status().as_u16(),
            %method,
            %path,
            us = us as u64,
            "request served"
        );
    }

    response
}
