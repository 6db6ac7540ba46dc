//! Access log middleware.

use std::time::Instant;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use tracing::{info, warn};

use crate::extractors::team::TEAM_HEADER;

/// One line per request with method, path, board, status, and latency.
///
/// 5xx responses are logged at `warn`.
pub async fn request_logging(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let team = request
        .headers()
        .get(TEAM_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
        .unwrap_or_else(|| "personal".to_owned());
    let started = Instant::now();

    let response = next.run(request).await;

    let status = response.status().as_u16();
    let elapsed_ms = started.elapsed().as_millis() as u64;

    if response.status().is_server_error() {
        warn!(%method, %path, %team, status, elapsed_ms, "Request failed");
    } else {
        info!(%method, %path, %team, status, elapsed_ms, "Request handled");
    }

    response
}
