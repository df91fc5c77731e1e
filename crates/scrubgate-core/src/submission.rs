//! The submission entity and its storage-key conventions.

use crate::error::CoreResult;
use crate::id::SubmissionId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Timestamp slug format used in storage keys and the metadata record.
pub const TIMESTAMP_SLUG_FORMAT: &str = "%Y%m%d-%H%M%S";

/// One ingested upload: the file plus the submitter's contact fields.
///
/// Serializes to the metadata record persisted next to the raw object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    /// Unique submission identifier.
    pub id: SubmissionId,

    /// Submitter name as entered.
    pub name: String,

    /// Submitter email as entered.
    pub email: String,

    /// Submitter phone as entered.
    pub phone: String,

    /// Original filename of the upload.
    pub filename: String,

    /// Upload time, serialized in the `YYYYMMDD-HHMMSS` slug form.
    #[serde(with = "timestamp_slug")]
    pub uploaded_utc: DateTime<Utc>,

    /// Whether the phone field passed validation at ingest time.
    pub phone_valid: bool,
}

impl Submission {
    /// Creates a submission stamped with the current time.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        filename: impl Into<String>,
        phone_valid: bool,
    ) -> Self {
        Self {
            id: SubmissionId::new(),
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
            filename: filename.into(),
            uploaded_utc: Utc::now(),
            phone_valid,
        }
    }

    /// Returns the timestamp slug shared by this submission's storage keys.
    #[must_use]
    pub fn timestamp_slug(&self) -> String {
        self.uploaded_utc.format(TIMESTAMP_SLUG_FORMAT).to_string()
    }

    /// Storage key for the raw upload.
    #[must_use]
    pub fn raw_key(&self) -> String {
        format!("raw/{}-{}", self.timestamp_slug(), self.filename)
    }

    /// Storage key for the serialized metadata record.
    #[must_use]
    pub fn metadata_key(&self) -> String {
        format!(
            "raw/{}-{}.json",
            self.timestamp_slug(),
            file_stem(&self.filename)
        )
    }

    /// Storage key for the redacted copy.
    #[must_use]
    pub fn processed_key(&self) -> String {
        format!("processed/{}-redacted-{}", self.timestamp_slug(), self.filename)
    }

    /// Serializes the metadata record to JSON bytes.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> CoreResult<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }
}

/// Returns the filename without its final extension.
#[must_use]
pub fn file_stem(filename: &str) -> &str {
    match filename.rsplit_once('.') {
        // A leading dot alone is not an extension separator.
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => filename,
    }
}

mod timestamp_slug {
    use super::TIMESTAMP_SLUG_FORMAT;
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.format(TIMESTAMP_SLUG_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, TIMESTAMP_SLUG_FORMAT)
            .map(|naive| naive.and_utc())
            .map_err(serde::de::Error::custom)
    }
}
