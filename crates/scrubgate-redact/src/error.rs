//! Redaction error types.

use thiserror::Error;

/// Redaction result type.
pub type RedactResult<T> = Result<T, RedactError>;

/// Redaction errors.
///
/// The scanning path itself is infallible: text that matches no pattern
/// passes through unchanged. Errors arise only from pattern compilation
/// and from decoding tabular input.
#[derive(Error, Debug)]
pub enum RedactError {
    /// Pattern compilation error.
    #[error("Pattern compilation error: {0}")]
    PatternCompilation(String),

    /// Tabular input could not be decoded or re-encoded.
    #[error("Tabular data error: {0}")]
    Tabular(String),
}

impl RedactError {
    /// Returns the error code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::PatternCompilation(_) => "REDACT_PATTERN_COMPILATION",
            Self::Tabular(_) => "REDACT_TABULAR",
        }
    }
}

impl From<regex::Error> for RedactError {
    fn from(e: regex::Error) -> Self {
        Self::PatternCompilation(e.to_string())
    }
}

impl From<csv::Error> for RedactError {
    fn from(e: csv::Error) -> Self {
        Self::Tabular(e.to_string())
    }
}
