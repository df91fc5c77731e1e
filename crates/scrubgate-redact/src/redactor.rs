//! Text redaction over the built-in pattern table.
//!
//! A [`Redactor`] runs the selection pass from [`crate::patterns`] and
//! rewrites the text in a single left-to-right sweep: bytes outside
//! selected matches are emitted verbatim, masked matches become their
//! placeholder token, detect-only matches are counted and emitted
//! unchanged.

use crate::patterns::{PatternCategory, PATTERNS};
use crate::policy::{RedactionAction, RedactionPolicy};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Redacts PII from text according to a [`RedactionPolicy`].
#[derive(Debug, Clone, Default)]
pub struct Redactor {
    policy: RedactionPolicy,
}

impl Redactor {
    /// Creates a redactor with the default policy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a redactor with an explicit policy.
    #[must_use]
    pub fn with_policy(policy: RedactionPolicy) -> Self {
        Self { policy }
    }

    /// The active policy.
    #[must_use]
    pub fn policy(&self) -> &RedactionPolicy {
        &self.policy
    }

    /// Redacts a text unit, discarding match details.
    #[must_use]
    pub fn redact(&self, text: &str) -> String {
        self.redact_detailed(text).text
    }

    /// Redacts a text unit and reports what was found.
    ///
    /// Never fails: text with no matches comes back unchanged.
    #[must_use]
    pub fn redact_detailed(&self, text: &str) -> RedactedOutput {
        let selected = PATTERNS.find_all(text);

        let mut stats = RedactionStats::default();
        let mut output = String::with_capacity(text.len());
        let mut last_end = 0;

        for m in &selected {
            stats.total_matches += 1;
            *stats.by_category.entry(m.category).or_insert(0) += 1;

            output.push_str(&text[last_end..m.start]);
            match self.policy.action_for(m.category) {
                RedactionAction::Mask => {
                    output.push_str(m.category.mask_token());
                    stats.total_masked += 1;
                }
                RedactionAction::DetectOnly => {
                    tracing::debug!(category = %m.category, "PII detected, left verbatim");
                    output.push_str(&m.text);
                }
            }
            last_end = m.end;
        }
        output.push_str(&text[last_end..]);

        RedactedOutput {
            text: output,
            input_len: text.len(),
            stats,
        }
    }
}

/// Result of redacting one text unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedactedOutput {
    /// The redacted text.
    pub text: String,
    /// Length of the input in bytes.
    pub input_len: usize,
    /// Match and replacement counts.
    pub stats: RedactionStats,
}

/// Counts collected during redaction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RedactionStats {
    /// Selected matches across all categories.
    pub total_matches: usize,
    /// Matches replaced with a placeholder.
    pub total_masked: usize,
    /// Selected matches per category.
    pub by_category: HashMap<PatternCategory, usize>,
}

impl RedactionStats {
    /// Folds another unit's counts into this one.
    pub fn merge(&mut self, other: &RedactionStats) {
        self.total_matches += other.total_matches;
        self.total_masked += other.total_masked;
        for (category, count) in &other.by_category {
            *self.by_category.entry(*category).or_insert(0) += count;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_masks_email_and_phone() {
        let redactor = Redactor::new();
        assert_eq!(
            redactor.redact("Contact jane.doe@example.org or 555-123-4567"),
            "Contact [REDACTED_EMAIL] or [REDACTED_PHONE]"
        );
    }

    #[test]
    fn test_text_without_pii_is_unchanged() {
        let redactor = Redactor::new();
        let text = "The quarterly report is attached below.";
        assert_eq!(redactor.redact(text), text);
    }

    #[test]
    fn test_empty_text() {
        let redactor = Redactor::new();
        let output = redactor.redact_detailed("");
        assert_eq!(output.text, "");
        assert_eq!(output.stats.total_matches, 0);
    }

    #[test]
    fn test_detect_only_categories_left_verbatim() {
        let redactor = Redactor::new();
        let text = "SSN 123-45-6789 card 4111 1111 1111 1111 born 1990-07-04";
        let output = redactor.redact_detailed(text);
        assert_eq!(output.text, text);
        assert_eq!(output.stats.total_matches, 3);
        assert_eq!(output.stats.total_masked, 0);
    }

    #[test]
    fn test_redaction_is_idempotent() {
        let redactor = Redactor::new();
        let text = "Reach jane.doe@example.org, 555-123-4567, SSN 123-45-6789";
        let once = redactor.redact(text);
        let twice = redactor.redact(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_mask_all_policy() {
        let redactor = Redactor::with_policy(RedactionPolicy::mask_all());
        let output = redactor.redact_detailed("SSN 123-45-6789");
        assert_eq!(output.text, "SSN [REDACTED_SSN]");
        assert_eq!(output.stats.total_masked, 1);
    }

    #[test]
    fn test_multiple_matches_of_one_category() {
        let redactor = Redactor::new();
        assert_eq!(
            redactor.redact("cc a@b.co and c@d.co"),
            "cc [REDACTED_EMAIL] and [REDACTED_EMAIL]"
        );
    }

    #[test]
    fn test_stats_by_category() {
        let redactor = Redactor::new();
        let output = redactor.redact_detailed("Contact jane.doe@example.org or 555-123-4567");
        assert_eq!(output.stats.total_matches, 2);
        assert_eq!(output.stats.total_masked, 2);
        assert_eq!(output.stats.by_category[&PatternCategory::Email], 1);
        assert_eq!(output.stats.by_category[&PatternCategory::PhoneNumber], 1);
        assert_eq!(output.input_len, 44);
    }

    #[test]
    fn test_stats_merge() {
        let redactor = Redactor::new();
        let mut total = RedactionStats::default();
        total.merge(&redactor.redact_detailed("a@b.co").stats);
        total.merge(&redactor.redact_detailed("555-123-4567").stats);
        assert_eq!(total.total_matches, 2);
        assert_eq!(total.by_category.len(), 2);
    }
}
