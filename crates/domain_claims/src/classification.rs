//! Claim classification and routing
//!
//! Keyword matching over an ordered category table decides the claim type,
//! urgency keywords decide the priority, and the pair decides where the
//! claim is routed. Entities come from the injected recognizer and policy
//! violations from the compliance checker.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use core_kernel::{Entity, EntityRecognizer, HealthCheckable};

use crate::compliance::{PolicyComplianceChecker, PolicyViolation};
use crate::error::ClaimRulesError;
use crate::rules::{routing_destination, CategoryTable, CLAIM_CATEGORIES, URGENCY_KEYWORDS};

/// Claim category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClaimType {
    Unknown,
    Health,
    Vehicle,
    Property,
    Travel,
    Life,
}

impl ClaimType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimType::Unknown => "Unknown",
            ClaimType::Health => "Health",
            ClaimType::Vehicle => "Vehicle",
            ClaimType::Property => "Property",
            ClaimType::Travel => "Travel",
            ClaimType::Life => "Life",
        }
    }
}

impl fmt::Display for ClaimType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Handling priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Confidence attached to this priority, as a fraction
    pub fn confidence(&self) -> f64 {
        match self {
            Priority::Low => 0.4,
            Priority::Medium => 0.75,
            Priority::High => 0.95,
        }
    }

    /// Confidence as a percentage
    pub fn confidence_score(&self) -> u8 {
        match self {
            Priority::Low => 40,
            Priority::Medium => 75,
            Priority::High => 95,
        }
    }

    /// Suffix appended to the routing destination
    pub fn routing_suffix(&self) -> &'static str {
        match self {
            Priority::High => "(Priority Fast-track)",
            Priority::Medium => "(Standard Processing)",
            Priority::Low => "(Low Priority Review)",
        }
    }
}

/// Audit record of a routing decision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingLogEntry {
    pub timestamp: DateTime<Utc>,
    pub action: String,
    pub status: String,
    pub priority: Priority,
}

/// Outcome of classifying one claim text.
///
/// Confidence values are derived from the priority on serialization and in
/// the accessors, so they cannot disagree with it.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationResult {
    claim_type: ClaimType,
    priority: Priority,
    rationale: String,
    routing_action: String,
    routing_log: Vec<RoutingLogEntry>,
    entities: Vec<Entity>,
    policy_violations: Vec<PolicyViolation>,
}

impl ClassificationResult {
    pub fn claim_type(&self) -> ClaimType {
        self.claim_type
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn confidence(&self) -> f64 {
        self.priority.confidence()
    }

    pub fn confidence_score(&self) -> u8 {
        self.priority.confidence_score()
    }

    pub fn rationale(&self) -> &str {
        &self.rationale
    }

    pub fn routing_action(&self) -> &str {
        &self.routing_action
    }

    pub fn routing_log(&self) -> &[RoutingLogEntry] {
        &self.routing_log
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn policy_violations(&self) -> &[PolicyViolation] {
        &self.policy_violations
    }
}

impl Serialize for ClassificationResult {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("ClassificationResult", 9)?;
        state.serialize_field("type", &self.claim_type)?;
        state.serialize_field("priority", &self.priority)?;
        state.serialize_field("confidence", &self.confidence())?;
        state.serialize_field("confidence_score", &self.confidence_score())?;
        state.serialize_field("rule_explanation", &self.rationale)?;
        state.serialize_field("routing_action", &self.routing_action)?;
        state.serialize_field("routing_log", &self.routing_log)?;
        state.serialize_field("entities", &self.entities)?;
        state.serialize_field("policy_violations", &self.policy_violations)?;
        state.end()
    }
}

/// Keyword-table classifier
#[derive(Clone)]
pub struct ClaimClassifier {
    categories: CategoryTable,
    recognizer: Arc<dyn EntityRecognizer>,
    compliance: PolicyComplianceChecker,
}

impl ClaimClassifier {
    /// Classifier over the standard category table
    pub fn new(recognizer: Arc<dyn EntityRecognizer>) -> Self {
        Self::with_categories(CLAIM_CATEGORIES, recognizer)
    }

    /// Classifier over a caller-supplied, ordered category table
    pub fn with_categories(categories: CategoryTable, recognizer: Arc<dyn EntityRecognizer>) -> Self {
        Self {
            categories,
            recognizer,
            compliance: PolicyComplianceChecker::new(),
        }
    }

    /// Classifies a claim text.
    ///
    /// # Errors
    ///
    /// Returns `ClaimRulesError::Recognizer` when entity recognition fails.
    pub fn classify(&self, text: &str) -> Result<ClassificationResult, ClaimRulesError> {
        let lowered = text.to_lowercase();

        let (claim_type, priority, rationale) = match self.match_category(&lowered) {
            Some((claim_type, keyword)) => {
                let urgent = URGENCY_KEYWORDS.iter().any(|k| lowered.contains(k));
                let priority = if urgent { Priority::High } else { Priority::Medium };
                let rationale = format!("Matched keyword '{keyword}' under '{claim_type}' category");
                (claim_type, priority, rationale)
            }
            None => (
                ClaimType::Unknown,
                Priority::Low,
                "No matching keywords found.".to_string(),
            ),
        };

        let entities = self.recognizer.recognize(text)?;
        let policy_violations = self.compliance.check(text);

        let routing_action = format!(
            "{} {}",
            routing_destination(claim_type),
            priority.routing_suffix()
        );
        let routing_log = vec![RoutingLogEntry {
            timestamp: Utc::now(),
            action: routing_action.clone(),
            status: "Routed".to_string(),
            priority,
        }];

        debug!(
            claim_type = %claim_type,
            priority = ?priority,
            entities = entities.len(),
            violations = policy_violations.len(),
            "Claim classified"
        );

        Ok(ClassificationResult {
            claim_type,
            priority,
            rationale,
            routing_action,
            routing_log,
            entities,
            policy_violations,
        })
    }

    /// First category, in table order, with a keyword present in `lowered`
    fn match_category(&self, lowered: &str) -> Option<(ClaimType, &'static str)> {
        self.categories.iter().find_map(|(claim_type, keywords)| {
            keywords
                .iter()
                .find(|keyword| lowered.contains(*keyword))
                .map(|keyword| (*claim_type, *keyword))
        })
    }
}

impl fmt::Debug for ClaimClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClaimClassifier")
            .field("categories", &self.categories.len())
            .field("recognizer", &self.recognizer.adapter_id())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_confidence() {
        assert_eq!(Priority::Low.confidence_score(), 40);
        assert_eq!(Priority::Medium.confidence(), 0.75);
        assert_eq!(Priority::High.confidence(), 0.95);
        assert_eq!(Priority::High.confidence_score(), 95);
    }

    #[test]
    fn test_priority_ordering() {
        assert!(Priority::High > Priority::Medium);
        assert!(Priority::Medium > Priority::Low);
    }

    #[test]
    fn test_claim_type_display() {
        assert_eq!(ClaimType::Property.to_string(), "Property");
        assert_eq!(serde_json::to_value(ClaimType::Unknown).unwrap(), "Unknown");
    }
}
