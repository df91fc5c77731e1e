//! Health check handlers.

use crate::response::HealthResponse;
use axum::Json;
use std::time::Instant;

/// Application start time for uptime calculation.
static START_TIME: std::sync::OnceLock<Instant> = std::sync::OnceLock::new();

/// Initializes the start time.
pub fn init_start_time() {
    START_TIME.get_or_init(Instant::now);
}

/// Returns the uptime in seconds.
pub fn uptime_seconds() -> u64 {
    START_TIME
        .get()
        .map(|t| t.elapsed().as_secs())
        .unwrap_or(0)
}

/// Health check handler.
pub async fn health_handler() -> Json<HealthResponse> {
    let health = HealthResponse::healthy(
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        uptime_seconds(),
    );

    Json(health)
}

/// Liveness probe handler.
pub async fn liveness_handler() -> &'static str {
    "OK"
}

/// Readiness probe handler.
pub async fn readiness_handler() -> Result<&'static str, (axum::http::StatusCode, &'static str)> {
    // In a real implementation, check dependencies here
    Ok("OK")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::HealthStatus;

    #[tokio::test]
    async fn test_health_handler() {
        init_start_time();
        let response = health_handler().await;
        assert_eq!(response.status, HealthStatus::Healthy);
    }

    #[tokio::test]
    async fn test_liveness_handler() {
        let response = liveness_handler().await;
        assert_eq!(response, "OK");
    }

    #[tokio::test]
    async fn test_readiness_handler() {
        let response = readiness_handler().await;
        assert!(response.is_ok());
    }
}
