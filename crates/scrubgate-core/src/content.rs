//! Content kind classification for uploaded files.

use serde::{Deserialize, Serialize};

/// How an uploaded file's content is treated during redaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    /// Row/column grid with a header row; redacted cell by cell.
    Tabular,
    /// Free text; redacted as a single unit.
    Text,
}

impl ContentKind {
    /// Classifies a file by its name.
    ///
    /// Only `.csv` (case-insensitive) is treated as tabular; everything
    /// else is scanned as plain text.
    #[must_use]
    pub fn from_filename(filename: &str) -> Self {
        if filename.to_lowercase().ends_with(".csv") {
            Self::Tabular
        } else {
            Self::Text
        }
    }

    /// Returns the MIME type for this kind.
    #[must_use]
    pub const fn mime_type(&self) -> &'static str {
        match self {
            Self::Tabular => "text/csv",
            Self::Text => "text/plain",
        }
    }
}
