//! Policy compliance checking
//!
//! Flags exclusion phrases (cosmetic surgery, drunk driving, ...) found in a
//! claim. Every rule is checked; a claim can violate several at once.

use serde::{Deserialize, Serialize};

use crate::rules::{PolicyRule, POLICY_RULES};

/// A policy exclusion found in the claim text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyViolation {
    pub category: String,
    /// The matched phrase
    pub violation: String,
    pub rule_id: String,
}

impl From<&PolicyRule> for PolicyViolation {
    fn from(rule: &PolicyRule) -> Self {
        Self {
            category: rule.category.to_string(),
            violation: rule.phrase.to_string(),
            rule_id: rule.rule_id.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PolicyComplianceChecker {
    rules: &'static [PolicyRule],
}

impl Default for PolicyComplianceChecker {
    fn default() -> Self {
        Self::new()
    }
}

impl PolicyComplianceChecker {
    pub fn new() -> Self {
        Self::with_rules(POLICY_RULES)
    }

    pub fn with_rules(rules: &'static [PolicyRule]) -> Self {
        Self { rules }
    }

    /// Returns every violated rule, in table order
    pub fn check(&self, text: &str) -> Vec<PolicyViolation> {
        let lowered = text.to_lowercase();
        self.rules
            .iter()
            .filter(|rule| lowered.contains(rule.phrase))
            .map(PolicyViolation::from)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosmetic_surgery_violates_h1() {
        let violations = PolicyComplianceChecker::new().check("Claim for Cosmetic Surgery at clinic");
        assert_eq!(
            violations,
            vec![PolicyViolation {
                category: "health".to_string(),
                violation: "cosmetic surgery".to_string(),
                rule_id: "H1".to_string(),
            }]
        );
    }

    #[test]
    fn test_no_phrases_no_violations() {
        assert!(PolicyComplianceChecker::new()
            .check("Routine checkup at the doctor")
            .is_empty());
    }

    #[test]
    fn test_multiple_violations_in_table_order() {
        let violations = PolicyComplianceChecker::new()
            .check("Invalid visa noted. Earlier: drunk driving and racing.");
        let ids: Vec<_> = violations.iter().map(|v| v.rule_id.as_str()).collect();
        assert_eq!(ids, vec!["V1", "V3", "T2"]);
    }

    #[test]
    fn test_custom_rules() {
        static RULES: &[PolicyRule] = &[PolicyRule {
            category: "test",
            rule_id: "X1",
            phrase: "forbidden",
        }];
        let checker = PolicyComplianceChecker::with_rules(RULES);
        assert_eq!(checker.check("a FORBIDDEN act").len(), 1);
        assert!(checker.check("cosmetic surgery").is_empty());
    }
}
