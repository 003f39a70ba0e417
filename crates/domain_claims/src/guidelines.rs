//! Underwriting guideline checks
//!
//! Property inspection reports are checked against a short list of
//! underwriting guidelines (fire extinguisher present, recent electrical
//! inspection, acceptable construction type, roof not in poor condition).

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::rules::{Expectation, GuidelineRule, GUIDELINE_RULES};

/// Outcome of one guideline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingOutcome {
    Compliant,
    /// The guideline is not met or the text says nothing about it
    NonCompliant,
    /// The guideline pattern could not be evaluated
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuidelineFinding {
    pub rule: String,
    pub outcome: FindingOutcome,
    pub message: String,
}

/// Overall verdict across all guidelines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GuidelineStatus {
    Compliant,
    #[serde(rename = "Non-Compliant")]
    NonCompliant,
    #[serde(rename = "Partial Compliance")]
    PartialCompliance,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuidelineReport {
    pub overall_status: GuidelineStatus,
    pub details: Vec<GuidelineFinding>,
}

impl GuidelineReport {
    fn from_findings(details: Vec<GuidelineFinding>) -> Self {
        let passed = details
            .iter()
            .filter(|f| f.outcome == FindingOutcome::Compliant)
            .count();

        let overall_status = if passed == details.len() {
            GuidelineStatus::Compliant
        } else if passed == 0 {
            GuidelineStatus::NonCompliant
        } else {
            GuidelineStatus::PartialCompliance
        };

        Self {
            overall_status,
            details,
        }
    }
}

#[derive(Debug, Clone)]
struct CompiledGuideline {
    rule: GuidelineRule,
    regex: Result<Regex, String>,
}

#[derive(Debug, Clone)]
pub struct GuidelineChecker {
    guidelines: Vec<CompiledGuideline>,
}

impl Default for GuidelineChecker {
    fn default() -> Self {
        Self::new()
    }
}

impl GuidelineChecker {
    pub fn new() -> Self {
        Self::with_rules(GUIDELINE_RULES)
    }

    /// A guideline whose pattern fails to compile reports `Error` on every
    /// check; the rest still run.
    pub fn with_rules(rules: &[GuidelineRule]) -> Self {
        let guidelines = rules
            .iter()
            .map(|rule| CompiledGuideline {
                rule: *rule,
                regex: Regex::new(rule.pattern).map_err(|e| {
                    warn!(rule = rule.name, error = %e, "Guideline pattern failed to compile");
                    e.to_string()
                }),
            })
            .collect();

        Self { guidelines }
    }

    pub fn check(&self, text: &str) -> GuidelineReport {
        let lowered = text.to_lowercase();

        let details = self
            .guidelines
            .iter()
            .map(|guideline| evaluate(guideline, &lowered))
            .collect();

        GuidelineReport::from_findings(details)
    }
}

fn evaluate(guideline: &CompiledGuideline, lowered: &str) -> GuidelineFinding {
    let rule = &guideline.rule;

    let (outcome, message) = match &guideline.regex {
        Err(e) => (FindingOutcome::Error, format!("Error checking rule: {e}")),
        Ok(regex) => {
            let found = regex.is_match(lowered);
            let compliant = match rule.expectation {
                Expectation::MustMatch => found,
                Expectation::MustNotMatch => !found,
            };
            if compliant {
                (FindingOutcome::Compliant, format!("Compliant - {}", rule.requirement))
            } else {
                (
                    FindingOutcome::NonCompliant,
                    format!("Non-compliant or missing: {}", rule.requirement),
                )
            }
        }
    };

    GuidelineFinding {
        rule: rule.name.to_string(),
        outcome,
        message,
    }
}
