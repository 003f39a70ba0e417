//! Risk assessment
//!
//! Sums the scores of the risk indicators present in a claim. Each
//! indicator counts once however many times it occurs.

use std::fmt;

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ClaimRulesError;
use crate::rules::{RiskRule, HIGH_RISK_THRESHOLD, MEDIUM_RISK_THRESHOLD, RISK_RULES};

static STANDARD_RULES: Lazy<Result<Vec<CompiledRiskRule>, String>> =
    Lazy::new(|| compile_rules(RISK_RULES).map_err(|e| e.to_string()));

/// Risk band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    /// The rule table itself could not be evaluated
    Unknown,
}

impl RiskLevel {
    pub fn from_score(score: u32) -> Self {
        if score >= HIGH_RISK_THRESHOLD {
            RiskLevel::High
        } else if score >= MEDIUM_RISK_THRESHOLD {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
            RiskLevel::Unknown => "Unknown",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub risk_score: u32,
    pub risk_level: RiskLevel,
    pub reasons: Vec<String>,
}

impl RiskAssessment {
    fn failed(message: &str) -> Self {
        Self {
            risk_score: 0,
            risk_level: RiskLevel::Unknown,
            reasons: vec![format!("Error assessing risk: {message}")],
        }
    }
}

#[derive(Debug, Clone)]
struct CompiledRiskRule {
    regex: Regex,
    label: &'static str,
    score: u32,
}

fn compile_rules(rules: &[RiskRule]) -> Result<Vec<CompiledRiskRule>, ClaimRulesError> {
    rules
        .iter()
        .map(|rule| {
            RegexBuilder::new(rule.pattern)
                .case_insensitive(true)
                .build()
                .map(|regex| CompiledRiskRule {
                    regex,
                    label: rule.label,
                    score: rule.score,
                })
                .map_err(|e| ClaimRulesError::invalid_pattern(rule.label, e))
        })
        .collect()
}

/// Scores claim text against a risk rule table.
///
/// A table that fails to compile does not stop construction; every
/// assessment then reports `RiskLevel::Unknown` with the compile error.
#[derive(Debug, Clone)]
pub struct RiskAssessor {
    rules: Result<Vec<CompiledRiskRule>, String>,
}

impl Default for RiskAssessor {
    fn default() -> Self {
        Self::new()
    }
}

impl RiskAssessor {
    /// Assessor over the standard risk table, compiled once per process
    pub fn new() -> Self {
        Self {
            rules: (*STANDARD_RULES).clone(),
        }
    }

    pub fn with_rules(rules: &[RiskRule]) -> Self {
        let rules = compile_rules(rules).map_err(|e| {
            warn!(error = %e, "Risk rule table failed to compile");
            e.to_string()
        });
        Self { rules }
    }

    pub fn assess(&self, text: &str) -> RiskAssessment {
        let rules = match &self.rules {
            Ok(rules) => rules,
            Err(message) => return RiskAssessment::failed(message),
        };

        let mut risk_score = 0;
        let mut reasons = Vec::new();
        for rule in rules.iter().filter(|rule| rule.regex.is_match(text)) {
            risk_score += rule.score;
            reasons.push(format!(
                "Detected risk factor: '{}' (+{} points)",
                rule.label, rule.score
            ));
        }

        if reasons.is_empty() {
            reasons.push("No significant risk factors detected.".to_string());
        }

        RiskAssessment {
            risk_score,
            risk_level: RiskLevel::from_score(risk_score),
            reasons,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_boundaries() {
        assert_eq!(RiskLevel::from_score(0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(2), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(3), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(4), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(5), RiskLevel::High);
    }

    #[test]
    fn test_fire_and_leak_is_high() {
        let assessment = RiskAssessor::new().assess("Fire in the kitchen caused a water leak");
        assert_eq!(assessment.risk_score, 7);
        assert_eq!(assessment.risk_level, RiskLevel::High);
        assert_eq!(
            assessment.reasons,
            vec![
                "Detected risk factor: 'leak' (+3 points)",
                "Detected risk factor: 'fire' (+4 points)",
            ]
        );
    }

    #[test]
    fn test_repeated_indicator_counts_once() {
        let assessment = RiskAssessor::new().assess("crack here, cracks there, cracked everywhere");
        assert_eq!(assessment.risk_score, 2);
        assert_eq!(assessment.risk_level, RiskLevel::Low);
    }

    #[test]
    fn test_word_boundaries() {
        let assessment = RiskAssessor::new().assess("The campfire and the leakproof seal");
        assert_eq!(assessment.risk_score, 0);
        assert_eq!(assessment.reasons, vec!["No significant risk factors detected."]);
    }

    #[test]
    fn test_short_circuit_variants() {
        let assessor = RiskAssessor::new();
        assert_eq!(assessor.assess("a short-circuit").risk_score, 3);
        assert_eq!(assessor.assess("a SHORT CIRCUIT").risk_score, 3);
    }

    #[test]
    fn test_invalid_table_reports_unknown() {
        let assessor = RiskAssessor::with_rules(&[RiskRule {
            pattern: r"(unclosed",
            label: "broken",
            score: 1,
        }]);
        let assessment = assessor.assess("anything");
        assert_eq!(assessment.risk_level, RiskLevel::Unknown);
        assert_eq!(assessment.risk_score, 0);
        assert_eq!(assessment.reasons.len(), 1);
        assert!(assessment.reasons[0].starts_with("Error assessing risk: "));
    }
}
