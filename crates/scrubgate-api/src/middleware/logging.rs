//! Request logging middleware.

use axum::{
    extract::Request,
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{info, span, warn, Level};
use uuid::Uuid;

/// Logging layer function.
pub async fn logging_layer(req: Request, next: Next) -> Response {
    let request_id = extract_or_generate_request_id(&req);
    let method = req.method().to_string();
    let path = req.uri().path().to_string();
    let query = req.uri().query().map(|q| q.to_string());

    let content_length = req
        .headers()
        .get("Content-Length")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok());

    let start = Instant::now();

    // Create request span
    let span = span!(
        Level::INFO,
        "request",
        request_id = %request_id,
        method = %method,
        path = %path,
    );

    let _guard = span.enter();

    info!(
        query = ?query,
        content_length = ?content_length,
        "Request started"
    );

    // Process request
    let response = next.run(req).await;

    let duration_ms = start.elapsed().as_millis() as u64;
    let status = response.status().as_u16();

    // Log response
    if status >= 500 {
        warn!(
            status = status,
            duration_ms = duration_ms,
            "Request completed with server error"
        );
    } else if status >= 400 {
        info!(
            status = status,
            duration_ms = duration_ms,
            "Request completed with client error"
        );
    } else {
        info!(
            status = status,
            duration_ms = duration_ms,
            "Request completed"
        );
    }

    response
}

/// Extracts or generates a request ID.
fn extract_or_generate_request_id(req: &Request) -> String {
    req.headers()
        .get("X-Request-ID")
        .and_then(|v| v.to_str().ok())
        .map(String::from)
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}
