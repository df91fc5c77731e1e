//! Upload submission handler.

use crate::error::{ApiError, ApiResult};
use crate::response::JsonResponse;
use crate::state::AppState;
use axum::extract::{Multipart, State};
use bytes::Bytes;
use scrubgate_core::{ContentKind, Submission, SubmissionId};
use scrubgate_redact::{detect_anomalies, is_valid_phone, AnomalyReport, PatternCategory};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Fallback name for uploads without a usable filename.
const FALLBACK_FILENAME: &str = "upload.bin";

/// Response returned for an accepted submission.
#[derive(Debug, Serialize, Deserialize)]
pub struct SubmissionResponse {
    /// Submission ID.
    pub id: SubmissionId,
    /// Sanitized filename of the upload.
    pub filename: String,
    /// Storage key of the raw upload.
    pub raw_key: String,
    /// Storage key of the metadata record.
    pub metadata_key: String,
    /// Storage key of the redacted copy, if processing succeeded.
    pub processed_key: Option<String>,
    /// Anomaly classification of the submitted contact fields.
    pub anomaly_report: AnomalyReport,
    /// Redaction matches per pattern category.
    pub redaction_counts: HashMap<PatternCategory, usize>,
}

/// Accepts a multipart upload and stores raw, metadata and redacted copies.
pub async fn create_submission(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<JsonResponse<SubmissionResponse>> {
    let mut file: Option<(String, Bytes)> = None;
    let mut name: Option<String> = None;
    let mut email: Option<String> = None;
    let mut phone: Option<String> = None;

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().unwrap_or_default().to_string();

        match field_name.as_str() {
            "file" => {
                let filename = field
                    .file_name()
                    .map(sanitize_filename)
                    .unwrap_or_else(|| FALLBACK_FILENAME.to_string());
                let data = field.bytes().await?;
                file = Some((filename, data));
            }
            "name" => name = Some(field.text().await?),
            "email" => email = Some(field.text().await?),
            "phone" => phone = Some(field.text().await?),
            _ => {}
        }
    }

    let (filename, data) =
        file.ok_or_else(|| ApiError::BadRequest("Missing file field".to_string()))?;
    let name = name.ok_or_else(|| ApiError::BadRequest("Missing name field".to_string()))?;
    let email = email.ok_or_else(|| ApiError::BadRequest("Missing email field".to_string()))?;
    let phone = phone.ok_or_else(|| ApiError::BadRequest("Missing phone field".to_string()))?;

    if data.len() > state.config.max_body_size {
        return Err(ApiError::PayloadTooLarge {
            size: data.len(),
            max: state.config.max_body_size,
        });
    }

    // Anomaly checks are advisory; the upload is stored either way.
    let anomaly_report = detect_anomalies(&name, &email, &phone);
    if anomaly_report.has_anomaly {
        tracing::info!(
            issues = anomaly_report.details.len(),
            "Submission fields flagged as anomalous"
        );
    }

    let submission = Submission::new(&name, &email, &phone, &filename, is_valid_phone(&phone));

    let raw_key = submission.raw_key();
    state.storage.put(&raw_key, data.clone()).await?;

    let metadata_key = submission.metadata_key();
    let metadata = submission.to_json()?;
    state.storage.put(&metadata_key, Bytes::from(metadata)).await?;

    let (processed_key, redaction_counts) = process_upload(&state, &submission, &data).await;

    tracing::info!(
        id = %submission.id,
        filename = %submission.filename,
        processed = processed_key.is_some(),
        "Submission stored"
    );

    let response = SubmissionResponse {
        id: submission.id,
        filename: submission.filename,
        raw_key,
        metadata_key,
        processed_key,
        anomaly_report,
        redaction_counts,
    };

    Ok(JsonResponse::created(response))
}

/// Redacts the upload and stores the processed copy.
///
/// Failures here leave `processed_key` unset; the raw upload and
/// metadata record are already persisted by the time this runs.
async fn process_upload(
    state: &AppState,
    submission: &Submission,
    data: &Bytes,
) -> (Option<String>, HashMap<PatternCategory, usize>) {
    let text = String::from_utf8_lossy(data);

    let output = match ContentKind::from_filename(&submission.filename) {
        ContentKind::Tabular => match state.redactor.redact_csv(&text) {
            Ok(output) => output,
            Err(e) => {
                tracing::warn!(error = %e, "Redaction failed; raw copy stored without processing");
                return (None, HashMap::new());
            }
        },
        ContentKind::Text => state.redactor.redact_detailed(&text),
    };

    let counts = output.stats.by_category;
    let key = submission.processed_key();

    match state.storage.put(&key, Bytes::from(output.text)).await {
        Ok(_) => (Some(key), counts),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to store processed copy");
            (None, HashMap::new())
        }
    }
}

/// Strips any path components from a client-supplied filename.
fn sanitize_filename(raw: &str) -> String {
    let candidate = raw.rsplit(['/', '\\']).next().unwrap_or_default().trim();

    if candidate.is_empty() || candidate == "." || candidate == ".." {
        FALLBACK_FILENAME.to_string()
    } else {
        candidate.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrubgate_storage::MemoryBackend;
    use std::sync::Arc;

    fn test_state() -> AppState {
        AppState::builder()
            .storage(Arc::new(MemoryBackend::new()))
            .build()
            .unwrap()
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("report.csv"), "report.csv");
        assert_eq!(sanitize_filename("dir/report.csv"), "report.csv");
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename(r"C:\uploads\data.txt"), "data.txt");
        assert_eq!(sanitize_filename("  notes.txt  "), "notes.txt");
    }

    #[test]
    fn test_sanitize_filename_rejects_unusable_names() {
        assert_eq!(sanitize_filename(""), FALLBACK_FILENAME);
        assert_eq!(sanitize_filename("uploads/"), FALLBACK_FILENAME);
        assert_eq!(sanitize_filename(".."), FALLBACK_FILENAME);
        assert_eq!(sanitize_filename("a/.."), FALLBACK_FILENAME);
        assert_eq!(sanitize_filename("   "), FALLBACK_FILENAME);
    }

    #[tokio::test]
    async fn test_process_upload_text() {
        let state = test_state();
        let submission = Submission::new(
            "Jane Doe",
            "jane@example.org",
            "415-555-2671",
            "notes.txt",
            true,
        );
        let data = Bytes::from("reach me at jane@example.org");

        let (key, counts) = process_upload(&state, &submission, &data).await;

        let key = key.unwrap();
        assert!(key.starts_with("processed/"));
        assert_eq!(counts.get(&PatternCategory::Email), Some(&1));

        let stored = state.storage.get(&key).await.unwrap();
        let text = String::from_utf8(stored.to_vec()).unwrap();
        assert_eq!(text, "reach me at [REDACTED_EMAIL]");
    }

    #[tokio::test]
    async fn test_process_upload_csv() {
        let state = test_state();
        let submission = Submission::new(
            "Jane Doe",
            "jane@example.org",
            "415-555-2671",
            "contacts.csv",
            true,
        );
        let data = Bytes::from("name,email\nJane,jane@example.org\n");

        let (key, counts) = process_upload(&state, &submission, &data).await;

        let key = key.unwrap();
        assert_eq!(counts.get(&PatternCategory::Email), Some(&1));

        let stored = state.storage.get(&key).await.unwrap();
        let text = String::from_utf8(stored.to_vec()).unwrap();
        assert_eq!(text, "name,email\nJane,[REDACTED_EMAIL]\n");
    }

    #[tokio::test]
    async fn test_process_upload_bad_csv_fails_open() {
        let state = test_state();
        let submission = Submission::new(
            "Jane Doe",
            "jane@example.org",
            "415-555-2671",
            "empty.csv",
            true,
        );

        let (key, counts) = process_upload(&state, &submission, &Bytes::new()).await;

        assert!(key.is_none());
        assert!(counts.is_empty());
    }
}
