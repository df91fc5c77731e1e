//! Redaction policy: which categories are masked and which are
//! detect-only.
//!
//! Detection is unconditional; the policy only decides what happens to a
//! selected match. Precedence between categories never varies with the
//! policy.

use crate::patterns::PatternCategory;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// What to do with a selected match of a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedactionAction {
    /// Replace the match with the category's placeholder token.
    Mask,
    /// Record the match but emit it verbatim.
    DetectOnly,
}

/// Per-category redaction actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedactionPolicy {
    actions: HashMap<PatternCategory, RedactionAction>,
}

impl RedactionPolicy {
    /// Policy that masks every category.
    #[must_use]
    pub fn mask_all() -> Self {
        let actions = PatternCategory::ALL
            .iter()
            .map(|&c| (c, RedactionAction::Mask))
            .collect();
        Self { actions }
    }

    /// Overrides the action for one category.
    #[must_use]
    pub fn with_action(mut self, category: PatternCategory, action: RedactionAction) -> Self {
        self.actions.insert(category, action);
        self
    }

    /// The action for a category.
    #[must_use]
    pub fn action_for(&self, category: PatternCategory) -> RedactionAction {
        self.actions
            .get(&category)
            .copied()
            .unwrap_or(RedactionAction::DetectOnly)
    }

    /// True if the category is masked under this policy.
    #[must_use]
    pub fn masks(&self, category: PatternCategory) -> bool {
        self.action_for(category) == RedactionAction::Mask
    }
}

impl Default for RedactionPolicy {
    /// Masks emails and phone numbers; SSNs, dates of birth and card
    /// numbers are detect-only.
    fn default() -> Self {
        let actions = PatternCategory::ALL
            .iter()
            .map(|&c| {
                let action = if c.default_placeholder().is_some() {
                    RedactionAction::Mask
                } else {
                    RedactionAction::DetectOnly
                };
                (c, action)
            })
            .collect();
        Self { actions }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_masks_email_and_phone_only() {
        let policy = RedactionPolicy::default();
        assert!(policy.masks(PatternCategory::Email));
        assert!(policy.masks(PatternCategory::PhoneNumber));
        assert!(!policy.masks(PatternCategory::SocialSecurityNumber));
        assert!(!policy.masks(PatternCategory::DateOfBirth));
        assert!(!policy.masks(PatternCategory::CreditCardNumber));
    }

    #[test]
    fn test_mask_all_policy() {
        let policy = RedactionPolicy::mask_all();
        for category in PatternCategory::ALL {
            assert!(policy.masks(category));
        }
    }

    #[test]
    fn test_with_action_override() {
        let policy = RedactionPolicy::default()
            .with_action(PatternCategory::SocialSecurityNumber, RedactionAction::Mask)
            .with_action(PatternCategory::Email, RedactionAction::DetectOnly);
        assert!(policy.masks(PatternCategory::SocialSecurityNumber));
        assert!(!policy.masks(PatternCategory::Email));
    }
}
