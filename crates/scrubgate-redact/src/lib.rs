//! PII detection and redaction for Scrubgate.
//!
//! Two independent components, composed by the ingestion flow:
//! - [`Redactor`] scans text (or each cell of a CSV grid) and replaces
//!   recognized PII spans with placeholder tokens, applying a fixed
//!   precedence among pattern categories.
//! - The anomaly classifier ([`detect_anomalies`]) validates submitted
//!   contact fields against structural and heuristic rules.
//!
//! Both are pure functions over their inputs and never fail on
//! unclassifiable data: text that matches nothing passes through
//! unchanged, and field values that cannot be validated are flagged,
//! not rejected.

pub mod anomaly;
pub mod error;
pub mod patterns;
pub mod policy;
pub mod redactor;
pub mod tabular;

pub use anomaly::{
    detect_anomalies, is_valid_email, is_valid_phone, AnomalyDetails, AnomalyField, AnomalyReport,
};
pub use error::{RedactError, RedactResult};
pub use patterns::{CompiledPattern, Pattern, PatternCategory, PatternMatch, PatternSet, PATTERNS};
pub use policy::{RedactionAction, RedactionPolicy};
pub use redactor::{RedactedOutput, RedactionStats, Redactor};
