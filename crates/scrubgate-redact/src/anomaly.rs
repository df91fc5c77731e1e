//! Input anomaly classification for submitter contact fields.
//!
//! Pure validators over name, email and phone strings. Classification
//! never fails: any value it cannot positively validate is reported as
//! an anomaly, and the report is advisory only. Callers decide what to
//! do with flagged input; nothing here rejects it.

use crate::patterns::{PatternCategory, PATTERNS};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Whole-email denylist, matched case-insensitively.
const SUSPICIOUS_EMAILS: [&str; 6] = [
    "test@test.com",
    "admin@admin.com",
    "user@user.com",
    "example@example.com",
    "fake@fake.com",
    "dummy@dummy.com",
];

/// Normalized digit strings that are never real subscriber numbers.
const SUSPICIOUS_PHONES: [&str; 12] = [
    "0000000000",
    "1111111111",
    "2222222222",
    "3333333333",
    "4444444444",
    "5555555555",
    "6666666666",
    "7777777777",
    "8888888888",
    "9999999999",
    "1234567890",
    "0987654321",
];

/// Placeholder names, matched against the trimmed lowercased input.
const SUSPICIOUS_NAMES: [&str; 6] = ["test", "admin", "user", "dummy", "fake", "example"];

/// Submission field an anomaly was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnomalyField {
    /// The email field.
    Email,
    /// The phone field.
    Phone,
    /// The name field.
    Name,
}

impl AnomalyField {
    /// Short stable name, matching the serialized form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Name => "name",
        }
    }
}

impl fmt::Display for AnomalyField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One flagged field with the offending value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnomalyDetails {
    /// Which field was flagged.
    pub field: AnomalyField,
    /// The raw value as submitted.
    pub value: String,
    /// Human-readable description of the problem.
    pub issue: String,
}

/// Classification result for one submission's contact fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnomalyReport {
    /// True if any field was flagged.
    pub has_anomaly: bool,
    /// Flagged fields, in check order.
    #[serde(rename = "anomaly_details")]
    pub details: Vec<AnomalyDetails>,
}

/// Validates an email address.
///
/// Layered checks, in order: structural match anchored at the start of
/// the string, local part 1-64 chars, domain 1-255 chars, whole-email
/// denylist, low-entropy local part (at most 2 distinct chars once
/// `.`/`_`/`-` are removed, for locals longer than 3 chars), at least
/// two domain labels, and an alphabetic TLD of 2+ chars.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    if email.is_empty() {
        return false;
    }

    let Some(re) = PATTERNS.regex_for(PatternCategory::Email) else {
        return false;
    };
    match re.find(email) {
        Some(m) if m.start() == 0 => {}
        _ => return false,
    }

    let Some((local, domain)) = email.rsplit_once('@') else {
        return false;
    };

    let local_len = local.chars().count();
    if local_len == 0 || local_len > 64 {
        return false;
    }
    let domain_len = domain.chars().count();
    if domain_len == 0 || domain_len > 255 {
        return false;
    }

    if SUSPICIOUS_EMAILS.contains(&email.to_lowercase().as_str()) {
        return false;
    }

    let distinct: HashSet<char> = local
        .chars()
        .filter(|c| !matches!(c, '.' | '_' | '-'))
        .collect();
    if distinct.len() <= 2 && local_len > 3 {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }
    let tld = labels[labels.len() - 1];
    if tld.chars().count() < 2 || !tld.chars().all(char::is_alphabetic) {
        return false;
    }

    true
}

/// Validates a phone number.
///
/// The input is normalized to its digits, then checked: 7-15 digits,
/// not a single repeated digit, not an ascending or descending run, and
/// not on the denylist of well-known fake numbers.
#[must_use]
pub fn is_valid_phone(phone: &str) -> bool {
    if phone.is_empty() {
        return false;
    }

    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    if digits.len() < 7 || digits.len() > 15 {
        return false;
    }

    let bytes = digits.as_bytes();
    if bytes.iter().all(|b| *b == bytes[0]) {
        return false;
    }
    if is_sequential(bytes) {
        return false;
    }
    if SUSPICIOUS_PHONES.contains(&digits.as_str()) {
        return false;
    }

    true
}

/// True for runs of 4+ digits where every step is +1 or every step is
/// -1. `9` to `0` is not a step, so wrapped runs do not count.
fn is_sequential(digits: &[u8]) -> bool {
    if digits.len() < 4 {
        return false;
    }
    let ascending = digits.windows(2).all(|w| w[1] == w[0] + 1);
    let descending = digits.windows(2).all(|w| w[0] == w[1] + 1);
    ascending || descending
}

/// Classifies a submission's contact fields.
///
/// Checks run in a fixed order: email, phone, name length, name
/// denylist. At most one issue is reported per field.
#[must_use]
pub fn detect_anomalies(name: &str, email: &str, phone: &str) -> AnomalyReport {
    let mut details = Vec::new();

    if !is_valid_email(email) {
        details.push(AnomalyDetails {
            field: AnomalyField::Email,
            value: email.to_string(),
            issue: "Invalid or suspicious email format".to_string(),
        });
    }

    if !is_valid_phone(phone) {
        details.push(AnomalyDetails {
            field: AnomalyField::Phone,
            value: phone.to_string(),
            issue: "Invalid or suspicious phone format".to_string(),
        });
    }

    if name.trim().chars().count() < 2 {
        details.push(AnomalyDetails {
            field: AnomalyField::Name,
            value: name.to_string(),
            issue: "Name too short or empty".to_string(),
        });
    } else if SUSPICIOUS_NAMES.contains(&name.trim().to_lowercase().as_str()) {
        details.push(AnomalyDetails {
            field: AnomalyField::Name,
            value: name.to_string(),
            issue: "Suspicious test/dummy name detected".to_string(),
        });
    }

    AnomalyReport {
        has_anomaly: !details.is_empty(),
        details,
    }
}
