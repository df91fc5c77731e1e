//! Application state.

use std::sync::Arc;

use scrubgate_redact::Redactor;
use scrubgate_storage::StorageBackend;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Storage backend for raw and processed uploads.
    pub storage: Arc<dyn StorageBackend>,
    /// Redaction engine applied to uploaded content.
    pub redactor: Arc<Redactor>,
    /// Application configuration.
    pub config: AppConfig,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Service name.
    pub service_name: String,
    /// Maximum accepted upload size in bytes.
    pub max_body_size: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            service_name: "scrubgate".to_string(),
            max_body_size: 10 * 1024 * 1024,
        }
    }
}

impl AppState {
    /// Creates a new state builder.
    pub fn builder() -> AppStateBuilder {
        AppStateBuilder::default()
    }
}

/// Builder for [`AppState`].
#[derive(Default)]
pub struct AppStateBuilder {
    storage: Option<Arc<dyn StorageBackend>>,
    redactor: Option<Arc<Redactor>>,
    config: Option<AppConfig>,
}

impl AppStateBuilder {
    /// Sets the storage backend.
    pub fn storage(mut self, storage: Arc<dyn StorageBackend>) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Sets the redactor.
    pub fn redactor(mut self, redactor: Arc<Redactor>) -> Self {
        self.redactor = Some(redactor);
        self
    }

    /// Sets the configuration.
    pub fn config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Builds the state.
    pub fn build(self) -> Result<AppState, String> {
        let storage = self.storage.ok_or("storage is required")?;

        Ok(AppState {
            storage,
            redactor: self.redactor.unwrap_or_default(),
            config: self.config.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrubgate_storage::MemoryBackend;

    #[test]
    fn test_state_builder() {
        let state = AppState::builder()
            .storage(Arc::new(MemoryBackend::new()))
            .build()
            .unwrap();

        assert_eq!(state.config.service_name, "scrubgate");
        assert_eq!(state.config.max_body_size, 10 * 1024 * 1024);
    }

    #[test]
    fn test_state_builder_requires_storage() {
        let result = AppState::builder().build();
        assert!(result.is_err());
    }

    #[test]
    fn test_state_builder_custom_config() {
        let state = AppState::builder()
            .storage(Arc::new(MemoryBackend::new()))
            .config(AppConfig {
                service_name: "uploads".to_string(),
                max_body_size: 1024,
            })
            .build()
            .unwrap();

        assert_eq!(state.config.service_name, "uploads");
        assert_eq!(state.config.max_body_size, 1024);
    }
}
