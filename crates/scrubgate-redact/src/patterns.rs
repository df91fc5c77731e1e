//! PII pattern definitions and candidate matching.
//!
//! The five categories form a fixed, ordered table: each entry carries its
//! regular expression, its position in the precedence order, and whether the
//! category is masked by default. The table is immutable after process
//! start; [`PATTERNS`] is the single compiled instance.

use crate::error::RedactResult;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Built-in patterns for the five PII categories.
pub static PATTERNS: Lazy<PatternSet> = Lazy::new(PatternSet::builtin);

/// Structural email pattern, shared by the redactor and the anomaly
/// classifier: `local@domain.tld`, ASCII local part, alphabetic TLD of
/// length >= 2.
pub const EMAIL_PATTERN: &str = r"\b[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}\b";

const SSN_PATTERN: &str = r"\b\d{3}-\d{2}-\d{4}\b";

const DOB_PATTERN: &str = r"\b((19\d{2}|20\d{2})-(0[1-9]|1[0-2])-(0[1-9]|[12]\d|3[01])|(0[1-9]|[12]\d|3[01])-(0[1-9]|1[0-2])-(19\d{2}|20\d{2})|(0[1-9]|1[0-2])/(0[1-9]|[12]\d|3[01])/(19\d{2}|20\d{2})|(0[1-9]|[12]\d|3[01])/(0[1-9]|1[0-2])/(19\d{2}|20\d{2}))\b";

const CREDIT_CARD_PATTERN: &str = r"\b(?:\d[ -]?){13,19}\b";

/// Broad by design: almost any 7-22 digit run with optional separators.
/// The digit-adjacency guard (see [`Pattern::with_digit_guard`]) keeps it
/// from matching the middle of longer numeric tokens.
const PHONE_PATTERN: &str = r"(?:\+?\d{1,3}[\s\-.]?)?(?:\(?\d{2,4}\)?[\s\-.]?)?(?:\d[\s\-.]?){6,14}\d";

/// Categories of detectable PII, in descending match precedence.
///
/// The order matters: phone patterns are intentionally broad and would
/// swallow emails, SSNs, dates and card numbers if they were not
/// outranked at equal start positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PatternCategory {
    /// Email address.
    #[serde(rename = "email")]
    Email,
    /// US Social Security Number (`DDD-DD-DDDD`).
    #[serde(rename = "ssn")]
    SocialSecurityNumber,
    /// Calendar-date shaped sequence with valid month/day ranges.
    #[serde(rename = "dob")]
    DateOfBirth,
    /// 13-19 digit run with optional single space/hyphen separators.
    #[serde(rename = "credit_card")]
    CreditCardNumber,
    /// 7-22 digit run with optional separators and area-code group.
    #[serde(rename = "phone")]
    PhoneNumber,
}

impl PatternCategory {
    /// All categories, in precedence order.
    pub const ALL: [Self; 5] = [
        Self::Email,
        Self::SocialSecurityNumber,
        Self::DateOfBirth,
        Self::CreditCardNumber,
        Self::PhoneNumber,
    ];

    /// Position in the tie-break order. Lower wins.
    #[must_use]
    pub const fn precedence(self) -> usize {
        match self {
            Self::Email => 0,
            Self::SocialSecurityNumber => 1,
            Self::DateOfBirth => 2,
            Self::CreditCardNumber => 3,
            Self::PhoneNumber => 4,
        }
    }

    /// The placeholder token substituted when this category is masked.
    #[must_use]
    pub const fn mask_token(self) -> &'static str {
        match self {
            Self::Email => "[REDACTED_EMAIL]",
            Self::SocialSecurityNumber => "[REDACTED_SSN]",
            Self::DateOfBirth => "[REDACTED_DOB]",
            Self::CreditCardNumber => "[REDACTED_CC]",
            Self::PhoneNumber => "[REDACTED_PHONE]",
        }
    }

    /// The placeholder under the default policy, or `None` for
    /// detect-only categories.
    #[must_use]
    pub const fn default_placeholder(self) -> Option<&'static str> {
        match self {
            Self::Email | Self::PhoneNumber => Some(self.mask_token()),
            _ => None,
        }
    }

    /// Short stable name, matching the serialized form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::SocialSecurityNumber => "ssn",
            Self::DateOfBirth => "dob",
            Self::CreditCardNumber => "credit_card",
            Self::PhoneNumber => "phone",
        }
    }
}

impl fmt::Display for PatternCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the pattern table.
#[derive(Debug, Clone, Copy)]
pub struct Pattern {
    /// Pattern name.
    pub name: &'static str,
    /// Category this pattern detects.
    pub category: PatternCategory,
    /// Regular expression source.
    pub regex: &'static str,
    /// Reject candidates immediately preceded or followed by a digit.
    pub digit_guard: bool,
}

impl Pattern {
    /// Creates a new pattern entry.
    #[must_use]
    pub const fn new(
        name: &'static str,
        category: PatternCategory,
        regex: &'static str,
    ) -> Self {
        Self {
            name,
            category,
            regex,
            digit_guard: false,
        }
    }

    /// Enables the digit-adjacency guard.
    ///
    /// The regex engine here guarantees linear-time matching and has no
    /// lookaround, so the guard is enforced as a post-filter on candidate
    /// boundaries instead.
    #[must_use]
    pub const fn with_digit_guard(mut self) -> Self {
        self.digit_guard = true;
        self
    }
}

/// A compiled pattern ready for matching.
pub struct CompiledPattern {
    /// Original table entry.
    pub pattern: Pattern,
    regex: Regex,
}

impl CompiledPattern {
    /// Compiles a pattern entry.
    ///
    /// # Errors
    /// Returns an error if the regular expression fails to compile.
    pub fn compile(pattern: Pattern) -> RedactResult<Self> {
        let regex = Regex::new(pattern.regex)?;
        Ok(Self { pattern, regex })
    }

    /// Finds all candidate matches in text.
    pub fn find_matches(&self, text: &str) -> Vec<PatternMatch> {
        if self.pattern.digit_guard {
            self.find_guarded(text)
        } else {
            self.regex
                .find_iter(text)
                .map(|m| PatternMatch::new(self.pattern.category, &m))
                .collect()
        }
    }

    /// Checks if the pattern matches anywhere in text.
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// Scan with the digit-adjacency guard: candidates flanked by a digit
    /// sit inside a longer numeric token and are skipped, resuming past
    /// the digit run so trailing content is still scanned.
    fn find_guarded(&self, text: &str) -> Vec<PatternMatch> {
        let bytes = text.as_bytes();
        let mut matches = Vec::new();
        let mut pos = 0;

        while pos <= text.len() {
            let Some(m) = self.regex.find_at(text, pos) else {
                break;
            };

            let digit_before = m.start() > 0 && bytes[m.start() - 1].is_ascii_digit();
            let digit_after = m.end() < bytes.len() && bytes[m.end()].is_ascii_digit();

            if digit_before || digit_after {
                let mut k = m.start();
                while k < bytes.len() && bytes[k].is_ascii_digit() {
                    k += 1;
                }
                pos = k + 1;
                while pos < text.len() && !text.is_char_boundary(pos) {
                    pos += 1;
                }
            } else {
                matches.push(PatternMatch::new(self.pattern.category, &m));
                pos = m.end();
            }
        }

        matches
    }
}

/// An occurrence of a category within a text unit.
///
/// Offsets are half-open byte offsets into the scanned text. Matches are
/// transient, produced per scan, never persisted.
#[derive(Debug, Clone)]
pub struct PatternMatch {
    /// Category detected.
    pub category: PatternCategory,
    /// Start offset in text.
    pub start: usize,
    /// End offset in text (exclusive).
    pub end: usize,
    /// The exact matched substring.
    pub text: String,
}

impl PatternMatch {
    fn new(category: PatternCategory, m: &regex::Match<'_>) -> Self {
        Self {
            category,
            start: m.start(),
            end: m.end(),
            text: m.as_str().to_string(),
        }
    }
}

/// The compiled pattern table.
pub struct PatternSet {
    patterns: Vec<CompiledPattern>,
}

impl PatternSet {
    /// Creates an empty pattern set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            patterns: Vec::new(),
        }
    }

    /// Creates the built-in table, one entry per category, in precedence
    /// order.
    #[must_use]
    pub fn builtin() -> Self {
        let mut set = Self::new();

        set.add(Pattern::new("email", PatternCategory::Email, EMAIL_PATTERN));
        set.add(Pattern::new(
            "ssn",
            PatternCategory::SocialSecurityNumber,
            SSN_PATTERN,
        ));
        set.add(Pattern::new(
            "dob",
            PatternCategory::DateOfBirth,
            DOB_PATTERN,
        ));
        set.add(Pattern::new(
            "credit_card",
            PatternCategory::CreditCardNumber,
            CREDIT_CARD_PATTERN,
        ));
        set.add(
            Pattern::new("phone", PatternCategory::PhoneNumber, PHONE_PATTERN)
                .with_digit_guard(),
        );

        set
    }

    /// Adds a pattern to the set.
    pub fn add(&mut self, pattern: Pattern) {
        match CompiledPattern::compile(pattern) {
            Ok(compiled) => self.patterns.push(compiled),
            Err(e) => {
                tracing::warn!("Failed to compile pattern '{}': {}", pattern.name, e);
            }
        }
    }

    /// Finds the selected, non-overlapping matches in text.
    ///
    /// Candidates from every pattern are collected independently, sorted
    /// by start offset with category precedence as the tie-break, then
    /// swept left to right keeping each candidate that begins at or after
    /// the previous selection's end.
    pub fn find_all(&self, text: &str) -> Vec<PatternMatch> {
        let mut matches: Vec<PatternMatch> = self
            .patterns
            .iter()
            .flat_map(|p| p.find_matches(text))
            .collect();

        matches.sort_by_key(|m| (m.start, m.category.precedence()));

        let mut selected = Vec::new();
        let mut last_end = 0;

        for m in matches {
            if m.start >= last_end {
                last_end = m.end;
                selected.push(m);
            }
        }

        selected
    }

    /// Finds candidates for a single category.
    pub fn find_category(&self, text: &str, category: PatternCategory) -> Vec<PatternMatch> {
        self.patterns
            .iter()
            .filter(|p| p.pattern.category == category)
            .flat_map(|p| p.find_matches(text))
            .collect()
    }

    /// Returns the compiled regex for a category, if present.
    #[must_use]
    pub fn regex_for(&self, category: PatternCategory) -> Option<&Regex> {
        self.patterns
            .iter()
            .find(|p| p.pattern.category == category)
            .map(|p| &p.regex)
    }

    /// Returns the number of patterns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Returns true if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl Default for PatternSet {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_compiles_all_categories() {
        assert_eq!(PATTERNS.len(), 5);
        for category in PatternCategory::ALL {
            assert!(PATTERNS.regex_for(category).is_some());
        }
    }

    #[test]
    fn test_precedence_order() {
        let ranks: Vec<usize> = PatternCategory::ALL
            .iter()
            .map(|c| c.precedence())
            .collect();
        assert_eq!(ranks, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_email_pattern() {
        let matches = PATTERNS.find_category("Contact: jane.doe@example.org", PatternCategory::Email);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].text, "jane.doe@example.org");
    }

    #[test]
    fn test_ssn_pattern() {
        let matches = PATTERNS.find_category("SSN: 123-45-6789", PatternCategory::SocialSecurityNumber);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].text, "123-45-6789");
    }

    #[test]
    fn test_dob_pattern_forms() {
        for text in ["1990-07-04", "07-04-1990", "07/04/1990", "25/12/1999"] {
            let matches = PATTERNS.find_category(text, PatternCategory::DateOfBirth);
            assert_eq!(matches.len(), 1, "expected a date match in {text:?}");
        }
    }

    #[test]
    fn test_invalid_month_is_not_a_date() {
        let matches = PATTERNS.find_category("2025-13-40", PatternCategory::DateOfBirth);
        assert!(matches.is_empty());
    }

    #[test]
    fn test_credit_card_pattern() {
        let matches =
            PATTERNS.find_category("Card: 4111 1111 1111 1111", PatternCategory::CreditCardNumber);
        assert_eq!(matches.len(), 1);
    }

    #[test]
    fn test_phone_pattern_forms() {
        for text in ["555-123-4567", "(415) 555-2671", "+1 415 555 2671", "5551234"] {
            let matches = PATTERNS.find_category(text, PatternCategory::PhoneNumber);
            assert_eq!(matches.len(), 1, "expected a phone match in {text:?}");
        }
    }

    #[test]
    fn test_phone_six_digits_never_match() {
        let matches = PATTERNS.find_category("code 123456 ok", PatternCategory::PhoneNumber);
        assert!(matches.is_empty());
    }

    #[test]
    fn test_phone_seven_digits_match() {
        let matches = PATTERNS.find_category("call 5551234 now", PatternCategory::PhoneNumber);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].text, "5551234");
    }

    #[test]
    fn test_digit_guard_skips_long_runs() {
        // 26 digits: longer than any phone parse, and flanked candidates
        // are rejected rather than partially consumed.
        let matches =
            PATTERNS.find_category("12345678901234567890123456", PatternCategory::PhoneNumber);
        assert!(matches.is_empty());
    }

    #[test]
    fn test_digit_guard_still_scans_trailing_text() {
        let text = "12345678901234567890123456 then 555-1234";
        let matches = PATTERNS.find_category(text, PatternCategory::PhoneNumber);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].text, "555-1234");
    }

    #[test]
    fn test_find_all_prefers_email_over_phone() {
        let selected = PATTERNS.find_all("Contact jane.doe@example.org or 555-123-4567");
        let categories: Vec<PatternCategory> = selected.iter().map(|m| m.category).collect();
        assert_eq!(
            categories,
            vec![PatternCategory::Email, PatternCategory::PhoneNumber]
        );
    }

    #[test]
    fn test_find_all_ssn_outranks_phone_at_same_start() {
        let selected = PATTERNS.find_all("123-45-6789");
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].category, PatternCategory::SocialSecurityNumber);
    }

    #[test]
    fn test_find_all_date_outranks_phone_at_same_start() {
        let selected = PATTERNS.find_all("born 1990-07-04 maybe");
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].category, PatternCategory::DateOfBirth);
    }

    #[test]
    fn test_invalid_date_falls_through_to_phone() {
        let selected = PATTERNS.find_all("2025-13-40");
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].category, PatternCategory::PhoneNumber);
    }

    #[test]
    fn test_mask_tokens_contain_no_matchable_text() {
        for category in PatternCategory::ALL {
            let token = category.mask_token();
            assert!(PATTERNS.find_all(token).is_empty(), "{token} re-matches");
        }
    }
}
