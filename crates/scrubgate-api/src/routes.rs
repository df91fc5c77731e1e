//! API routes.

use crate::{
    handlers::{health, submissions},
    middleware::{cors::cors_layer, logging::logging_layer},
    state::AppState,
};
use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::compression::CompressionLayer;

/// Creates the API router.
pub fn create_router(state: AppState) -> Router {
    // Headroom over the file cap for multipart framing and contact fields.
    let body_limit = state.config.max_body_size + 64 * 1024;

    Router::new()
        // Health endpoints
        .nest("/health", health_routes())
        // API v1
        .nest("/api/v1", api_v1_routes())
        // Add middleware
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CompressionLayer::new())
        .layer(cors_layer())
        .layer(middleware::from_fn(logging_layer))
        .with_state(state)
}

/// Health routes.
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(health::health_handler))
        .route("/live", get(health::liveness_handler))
        .route("/ready", get(health::readiness_handler))
}

/// API v1 routes.
fn api_v1_routes() -> Router<AppState> {
    Router::new().route("/submissions", post(submissions::create_submission))
}

/// Creates a minimal router for testing.
pub fn create_test_router() -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/health/live", get(health::liveness_handler))
        .route("/health/ready", get(health::readiness_handler))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use scrubgate_storage::MemoryBackend;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_state() -> AppState {
        AppState::builder()
            .storage(Arc::new(MemoryBackend::new()))
            .build()
            .unwrap()
    }

    fn multipart_body(parts: &[(&str, Option<&str>, &str)]) -> (String, String) {
        let boundary = "test-boundary";
        let mut lines = Vec::new();

        for (name, filename, value) in parts {
            lines.push(format!("--{boundary}"));
            match filename {
                Some(filename) => {
                    lines.push(format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\""
                    ));
                    lines.push("Content-Type: application/octet-stream".to_string());
                }
                None => {
                    lines.push(format!("Content-Disposition: form-data; name=\"{name}\""));
                }
            }
            lines.push(String::new());
            lines.push((*value).to_string());
        }
        lines.push(format!("--{boundary}--"));
        lines.push(String::new());

        (
            format!("multipart/form-data; boundary={boundary}"),
            lines.join("\r\n"),
        )
    }

    async fn post_submission(app: Router, content_type: &str, body: String) -> axum::response::Response {
        app.oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/submissions")
                .header(header::CONTENT_TYPE, content_type)
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = create_test_router();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_liveness_endpoint() {
        let app = create_test_router();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health/live")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_readiness_endpoint() {
        let app = create_test_router();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health/ready")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_create_submission() {
        let state = test_state();
        let storage = state.storage.clone();
        let app = create_router(state);

        let (content_type, body) = multipart_body(&[
            ("name", None, "Jane Doe"),
            ("email", None, "jane.doe@example.org"),
            ("phone", None, "415-555-2671"),
            ("file", Some("notes.txt"), "Contact jane.doe@example.org today."),
        ]);

        let response = post_submission(app, &content_type, body).await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(value["filename"], "notes.txt");
        assert!(value["raw_key"].as_str().unwrap().starts_with("raw/"));
        assert!(value["metadata_key"].as_str().unwrap().ends_with(".json"));
        assert_eq!(value["anomaly_report"]["has_anomaly"], false);
        assert_eq!(value["redaction_counts"]["email"], 1);

        let processed_key = value["processed_key"].as_str().unwrap();
        let stored = storage.get(processed_key).await.unwrap();
        assert_eq!(
            String::from_utf8(stored.to_vec()).unwrap(),
            "Contact [REDACTED_EMAIL] today."
        );
    }

    #[tokio::test]
    async fn test_create_submission_missing_fields() {
        let app = create_router(test_state());

        let (content_type, body) = multipart_body(&[("name", None, "Jane Doe")]);

        let response = post_submission(app, &content_type, body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_submission_flags_anomalies() {
        let app = create_router(test_state());

        let (content_type, body) = multipart_body(&[
            ("name", None, "Test"),
            ("email", None, "test@test.com"),
            ("phone", None, "1234567890"),
            ("file", Some("notes.txt"), "nothing sensitive here"),
        ]);

        let response = post_submission(app, &content_type, body).await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(value["anomaly_report"]["has_anomaly"], true);
        assert_eq!(
            value["anomaly_report"]["anomaly_details"]
                .as_array()
                .unwrap()
                .len(),
            3
        );
    }
}
