//! Static rule tables
//!
//! Every analyzer reads its configuration from here. The tables are plain
//! data: ordering is significant wherever a table is scanned first-match.

use crate::classification::ClaimType;

/// Ordered category table used by the classifier
pub type CategoryTable = &'static [(ClaimType, &'static [&'static str])];

/// Category keywords, scanned in order; the first category with any keyword
/// present in the text wins. "insurance" sits under Vehicle, so a generic
/// mention of insurance only classifies as Vehicle when Health did not match.
pub const CLAIM_CATEGORIES: CategoryTable = &[
    (
        ClaimType::Health,
        &["hospital", "surgery", "medical", "doctor", "treatment", "illness", "clinic"],
    ),
    (
        ClaimType::Vehicle,
        &["car", "accident", "garage", "repair", "vehicle", "driver", "insurance"],
    ),
    (
        ClaimType::Property,
        &["house", "flood", "fire", "earthquake", "theft", "damage", "storm"],
    ),
    (
        ClaimType::Travel,
        &["flight", "luggage", "travel", "visa", "passport", "cancelled", "trip", "hotel"],
    ),
    (
        ClaimType::Life,
        &["life", "death", "funeral", "survivor", "beneficiary", "claimant"],
    ),
];

/// Any of these anywhere in the text raises a matched claim to High priority
pub const URGENCY_KEYWORDS: &[&str] = &[
    "urgent",
    "immediately",
    "emergency",
    "critical",
    "asap",
    "fast-track",
];

/// Routing destination per claim type
pub fn routing_destination(claim_type: ClaimType) -> &'static str {
    match claim_type {
        ClaimType::Health => "Route to Health Department",
        ClaimType::Vehicle => "Send to Vehicle Claims Team",
        ClaimType::Property => "Forward to Property Evaluation Unit",
        ClaimType::Travel => "Escalate to Travel Support Unit",
        ClaimType::Life => "Send to Life Insurance Review Desk",
        ClaimType::Unknown => "Send to General Claims Queue",
    }
}

/// A phrase that signals a policy exclusion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolicyRule {
    pub category: &'static str,
    pub rule_id: &'static str,
    pub phrase: &'static str,
}

const fn policy(category: &'static str, rule_id: &'static str, phrase: &'static str) -> PolicyRule {
    PolicyRule {
        category,
        rule_id,
        phrase,
    }
}

/// Exclusion phrases, checked exhaustively in declaration order
pub const POLICY_RULES: &[PolicyRule] = &[
    policy("health", "H1", "cosmetic surgery"),
    policy("health", "H2", "weight loss treatment"),
    policy("health", "H3", "experimental treatment"),
    policy("vehicle", "V1", "drunk driving"),
    policy("vehicle", "V2", "no valid license"),
    policy("vehicle", "V3", "racing"),
    policy("property", "P1", "natural disaster"),
    policy("property", "P2", "earthquake"),
    policy("property", "P3", "flood not covered"),
    policy("travel", "T1", "non-refundable booking"),
    policy("travel", "T2", "invalid visa"),
    policy("life", "L1", "pre-existing condition"),
    policy("life", "L2", "suicide clause"),
];

/// A weighted risk indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiskRule {
    /// Case-insensitive regex
    pub pattern: &'static str,
    /// Human-readable name used in reasons
    pub label: &'static str,
    pub score: u32,
}

const fn risk(pattern: &'static str, label: &'static str, score: u32) -> RiskRule {
    RiskRule {
        pattern,
        label,
        score,
    }
}

/// Risk indicators; each contributes its score once, however often it appears
pub const RISK_RULES: &[RiskRule] = &[
    risk(r"\bcrack(s|ed)?\b", "crack", 2),
    risk(r"\bleak(age|ing)?\b", "leak", 3),
    risk(r"\bdamp\b", "damp", 2),
    risk(r"\bfire\b", "fire", 4),
    risk(r"\bold building\b", "old building", 1),
    risk(r"\bshort[- ]circuit\b", "short circuit", 3),
];

/// Scores at or above this are High risk
pub const HIGH_RISK_THRESHOLD: u32 = 5;
/// Scores at or above this (and below High) are Medium risk
pub const MEDIUM_RISK_THRESHOLD: u32 = 3;

/// Field patterns for the info extractor; group 1 carries the value
pub const NAME_PATTERN: &str = r"(?i)Name[:\-]?\s*([A-Za-z ,.'-]+)";
pub const DATE_PATTERN: &str =
    r"(?i)Date[:\-]?\s*([0-9]{2}[/\-][0-9]{2}[/\-][0-9]{4}|[0-9]{4}[/\-][0-9]{2}[/\-][0-9]{2})";
pub const CLAIM_AMOUNT_PATTERN: &str =
    r"(?i)Claim Amount[:\-]?\s*[₹$€£]?\s*([\d,]+(?:\.\d{1,2})?)";
pub const POLICY_NUMBER_PATTERN: &str = r"(?i)Policy Number[:\-]?\s*(\w+)";

/// How a guideline pattern decides compliance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expectation {
    /// Compliant only when the pattern is found
    MustMatch,
    /// Compliant unless the pattern is found
    MustNotMatch,
}

/// An underwriting guideline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuidelineRule {
    pub name: &'static str,
    pub requirement: &'static str,
    /// Regex evaluated against the lower-cased text
    pub pattern: &'static str,
    pub expectation: Expectation,
}

pub const GUIDELINE_RULES: &[GuidelineRule] = &[
    GuidelineRule {
        name: "fire extinguisher",
        requirement: "Must be present",
        pattern: r"fire extinguisher",
        expectation: Expectation::MustMatch,
    },
    GuidelineRule {
        name: "electrical inspection",
        requirement: "Must be recent",
        pattern: r"electrical inspection.*(20\d{2}|recent|last\s+\d+\s+months?)",
        expectation: Expectation::MustMatch,
    },
    GuidelineRule {
        name: "construction type",
        requirement: "Must be masonry or frame",
        pattern: r"construction type[:\-]?\s*(masonry|frame)",
        expectation: Expectation::MustMatch,
    },
    GuidelineRule {
        name: "roof condition",
        requirement: "Must not be poor",
        pattern: r"roof condition[:\-]?\s*poor",
        expectation: Expectation::MustNotMatch,
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_policy_rule_ids_are_unique() {
        let ids: HashSet<_> = POLICY_RULES.iter().map(|r| r.rule_id).collect();
        assert_eq!(ids.len(), POLICY_RULES.len());
    }

    #[test]
    fn test_category_table_covers_every_known_type() {
        let types: Vec<_> = CLAIM_CATEGORIES.iter().map(|(t, _)| *t).collect();
        assert_eq!(
            types,
            vec![
                ClaimType::Health,
                ClaimType::Vehicle,
                ClaimType::Property,
                ClaimType::Travel,
                ClaimType::Life,
            ]
        );
    }

    #[test]
    fn test_all_table_patterns_compile() {
        for rule in RISK_RULES {
            assert!(regex::Regex::new(rule.pattern).is_ok(), "{}", rule.label);
        }
        for rule in GUIDELINE_RULES {
            assert!(regex::Regex::new(rule.pattern).is_ok(), "{}", rule.name);
        }
        for pattern in [NAME_PATTERN, DATE_PATTERN, CLAIM_AMOUNT_PATTERN, POLICY_NUMBER_PATTERN] {
            assert!(regex::Regex::new(pattern).is_ok(), "{pattern}");
        }
    }
}
