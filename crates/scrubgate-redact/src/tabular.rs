//! Cell-wise redaction for tabular (CSV) content.
//!
//! Each data cell is its own text unit: matches never span cell or row
//! boundaries. The header row is passed through untouched.

use crate::error::{RedactError, RedactResult};
use crate::redactor::{RedactedOutput, RedactionStats, Redactor};
use csv::{ReaderBuilder, WriterBuilder};

impl Redactor {
    /// Redacts a CSV document cell by cell.
    ///
    /// Row order, column counts (including ragged rows) and the header
    /// row are preserved; only data cell contents change. Stats are
    /// aggregated across all cells.
    ///
    /// # Errors
    /// Returns an error if the input has no header row or cannot be
    /// parsed as CSV.
    pub fn redact_csv(&self, input: &str) -> RedactResult<RedactedOutput> {
        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .from_reader(input.as_bytes());
        let mut writer = WriterBuilder::new().flexible(true).from_writer(Vec::new());

        let headers = reader.headers()?.clone();
        if headers.is_empty() {
            return Err(RedactError::Tabular("input has no header row".to_string()));
        }
        writer.write_record(&headers)?;

        let mut stats = RedactionStats::default();
        for record in reader.records() {
            let record = record?;
            let mut redacted = Vec::with_capacity(record.len());
            for cell in &record {
                let output = self.redact_detailed(cell);
                stats.merge(&output.stats);
                redacted.push(output.text);
            }
            writer.write_record(&redacted)?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| RedactError::Tabular(e.to_string()))?;
        let text =
            String::from_utf8(bytes).map_err(|e| RedactError::Tabular(e.to_string()))?;

        Ok(RedactedOutput {
            text,
            input_len: input.len(),
            stats,
        })
    }
}
