//! Storage error types.

use thiserror::Error;

/// Storage result type.
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Object not found.
    #[error("Object not found: {0}")]
    NotFound(String),

    /// Key rejected by sanitization.
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StorageError {
    /// Returns the error code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "STORE_NOT_FOUND",
            Self::InvalidKey(_) => "STORE_INVALID_KEY",
            Self::Io(_) => "STORE_IO",
        }
    }
}
