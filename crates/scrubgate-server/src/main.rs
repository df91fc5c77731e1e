//! Scrubgate server.
//!
//! Binary entry point for the Scrubgate upload service.

mod config;
mod telemetry;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::info;

use scrubgate_api::handlers::health::init_start_time;
use scrubgate_api::{create_router, AppConfig, AppState};
use scrubgate_redact::{RedactionPolicy, Redactor};
use scrubgate_storage::{FilesystemBackend, MemoryBackend, StorageBackend};

use crate::config::ServerConfig;
use crate::telemetry::init_telemetry;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = ServerConfig::load().context("Failed to load configuration")?;

    // Initialize telemetry
    init_telemetry(&config.telemetry)?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting Scrubgate server"
    );

    // Initialize start time for health checks
    init_start_time();

    // Build application state
    let state = build_app_state(&config).await?;

    // Create router
    let app = create_router(state);

    // Bind server
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("Invalid server address")?;

    info!(address = %addr, "Server listening");

    // Create server with graceful shutdown
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down gracefully");
    Ok(())
}

/// Builds the application state.
async fn build_app_state(config: &ServerConfig) -> Result<AppState> {
    // Initialize storage
    let storage = init_storage(config).await?;

    // Initialize the redaction engine
    let policy = if config.redaction.mask_all {
        RedactionPolicy::mask_all()
    } else {
        RedactionPolicy::default()
    };
    let redactor = Arc::new(Redactor::with_policy(policy));

    // Build app state
    let state = AppState::builder()
        .storage(storage)
        .redactor(redactor)
        .config(AppConfig {
            service_name: config.service_name.clone(),
            max_body_size: config.max_body_size,
        })
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build app state: {}", e))?;

    Ok(state)
}

/// Initializes the storage backend.
async fn init_storage(config: &ServerConfig) -> Result<Arc<dyn StorageBackend>> {
    match config.storage.backend.as_str() {
        "filesystem" => {
            let backend = FilesystemBackend::new(&config.storage.path).await?;
            info!(path = %config.storage.path, "Using filesystem storage");
            Ok(Arc::new(backend))
        }
        _ => {
            info!("Using in-memory storage");
            Ok(Arc::new(MemoryBackend::new()))
        }
    }
}

/// Shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        }
        _ = terminate => {
            info!("Received SIGTERM, shutting down");
        }
    }
}
