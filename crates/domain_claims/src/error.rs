//! Claim rule engine errors

use core_kernel::PortError;
use thiserror::Error;

/// Errors that can occur while evaluating claim rules
#[derive(Debug, Error)]
pub enum ClaimRulesError {
    #[error("Invalid pattern for rule '{rule}': {source}")]
    InvalidPattern {
        rule: String,
        #[source]
        source: regex::Error,
    },

    #[error("Entity recognition failed: {0}")]
    Recognizer(#[from] PortError),
}

impl ClaimRulesError {
    pub fn invalid_pattern(rule: impl Into<String>, source: regex::Error) -> Self {
        ClaimRulesError::InvalidPattern {
            rule: rule.into(),
            source,
        }
    }
}
