//! HTTP API layer for scrubgate.
//!
//! Axum routes, handlers and middleware around the redaction engine:
//! multipart submission ingest, health probes, request logging, and the
//! JSON error surface.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use response::JsonResponse;
pub use routes::{create_router, create_test_router};
pub use state::{AppConfig, AppState};
