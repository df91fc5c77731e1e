//! Error types shared across the Scrubgate crates.

use std::fmt;
use thiserror::Error;

/// Result type alias using `CoreError`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Main error type for Scrubgate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Validation errors (1000-1999).
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Data/Resource errors (2000-2999).
    #[error("data error: {0}")]
    Data(#[from] DataError),

    /// Serialization errors (3000-3999).
    #[error("serialization error: {0}")]
    Serialization(String),

    /// System errors (9000-9999).
    #[error("internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Returns the error code for this error.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Validation(e) => e.code(),
            Self::Data(e) => e.code(),
            Self::Serialization(_) => ErrorCode::new(3001),
            Self::Internal(_) => ErrorCode::new(9001),
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::Data(e) => e.http_status(),
            Self::Serialization(_) => 422,
            Self::Internal(_) => 500,
        }
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Invalid input.
    #[error("invalid input: {field}: {message}")]
    InvalidInput {
        /// The field that failed validation.
        field: String,
        /// The validation error message.
        message: String,
    },

    /// Required field missing.
    #[error("required field missing: {0}")]
    RequiredField(String),

    /// Invalid format.
    #[error("invalid format for {field}: expected {expected}")]
    InvalidFormat {
        /// The field name.
        field: String,
        /// The expected format.
        expected: String,
    },
}

impl ValidationError {
    /// Returns the error code.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidInput { .. } => ErrorCode::new(1001),
            Self::RequiredField(_) => ErrorCode::new(1002),
            Self::InvalidFormat { .. } => ErrorCode::new(1003),
        }
    }
}

/// Data/Resource errors.
#[derive(Debug, Error)]
pub enum DataError {
    /// Resource not found.
    #[error("{resource_type} not found: {id}")]
    NotFound {
        /// The type of resource.
        resource_type: String,
        /// The resource ID.
        id: String,
    },

    /// Resource already exists.
    #[error("{resource_type} already exists: {id}")]
    AlreadyExists {
        /// The type of resource.
        resource_type: String,
        /// The resource ID.
        id: String,
    },
}

impl DataError {
    /// Returns the error code.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::NotFound { .. } => ErrorCode::new(2001),
            Self::AlreadyExists { .. } => ErrorCode::new(2002),
        }
    }

    /// Returns the HTTP status code.
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::AlreadyExists { .. } => 409,
        }
    }
}

/// Error code with numeric value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorCode(u16);

impl ErrorCode {
    /// Creates a new error code.
    #[must_use]
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// Returns the numeric code.
    #[must_use]
    pub const fn as_u16(&self) -> u16 {
        self.0
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SCRUB_{:04}", self.0)
    }
}
