//! Structured field extraction
//!
//! Pulls claimant name, date, claim amount and policy number out of claim
//! text with labelled-field regexes ("Policy Number: AB1234").

use std::collections::BTreeMap;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::error::ClaimRulesError;
use crate::rules::{CLAIM_AMOUNT_PATTERN, DATE_PATTERN, NAME_PATTERN, POLICY_NUMBER_PATTERN};

static STANDARD_PATTERNS: Lazy<Result<Vec<(FieldName, Regex)>, String>> = Lazy::new(|| {
    compile_patterns(&[
        (FieldName::Name, NAME_PATTERN),
        (FieldName::Date, DATE_PATTERN),
        (FieldName::ClaimAmount, CLAIM_AMOUNT_PATTERN),
        (FieldName::PolicyNumber, POLICY_NUMBER_PATTERN),
    ])
    .map_err(|e| e.to_string())
});

/// A field the extractor knows how to find
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldName {
    Name,
    Date,
    ClaimAmount,
    PolicyNumber,
}

impl FieldName {
    /// Key used in serialized output
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldName::Name => "Name",
            FieldName::Date => "Date",
            FieldName::ClaimAmount => "Claim Amount",
            FieldName::PolicyNumber => "Policy Number",
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields found in a claim text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractedFields {
    /// At least one field matched; unmatched fields are absent
    Fields(BTreeMap<FieldName, String>),
    /// No field matched
    NoData,
    /// The pattern set could not be evaluated
    ParsingFailed(String),
}

impl ExtractedFields {
    pub fn get(&self, field: FieldName) -> Option<&str> {
        match self {
            ExtractedFields::Fields(fields) => fields.get(&field).map(String::as_str),
            _ => None,
        }
    }
}

impl Serialize for ExtractedFields {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ExtractedFields::Fields(fields) => {
                let mut map = serializer.serialize_map(Some(fields.len()))?;
                for (field, value) in fields {
                    map.serialize_entry(field.as_str(), value)?;
                }
                map.end()
            }
            ExtractedFields::NoData => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("error", "No relevant data extracted")?;
                map.end()
            }
            ExtractedFields::ParsingFailed(message) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("error", &format!("Regex parsing failed: {message}"))?;
                map.end()
            }
        }
    }
}

fn compile_patterns(
    patterns: &[(FieldName, &str)],
) -> Result<Vec<(FieldName, Regex)>, ClaimRulesError> {
    patterns
        .iter()
        .map(|(field, pattern)| {
            Regex::new(pattern)
                .map(|regex| (*field, regex))
                .map_err(|e| ClaimRulesError::invalid_pattern(field.as_str(), e))
        })
        .collect()
}

/// Labelled-field extractor
#[derive(Debug, Clone)]
pub struct InfoExtractor {
    patterns: Result<Vec<(FieldName, Regex)>, String>,
}

impl Default for InfoExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl InfoExtractor {
    pub fn new() -> Self {
        Self {
            patterns: (*STANDARD_PATTERNS).clone(),
        }
    }

    /// Extractor over custom patterns; group 1 of each carries the value
    pub fn with_patterns(patterns: &[(FieldName, &str)]) -> Self {
        Self {
            patterns: compile_patterns(patterns).map_err(|e| e.to_string()),
        }
    }

    pub fn extract(&self, text: &str) -> ExtractedFields {
        let patterns = match &self.patterns {
            Ok(patterns) => patterns,
            Err(message) => return ExtractedFields::ParsingFailed(message.clone()),
        };

        let fields: BTreeMap<FieldName, String> = patterns
            .iter()
            .filter_map(|(field, regex)| {
                let value = regex.captures(text)?.get(1)?.as_str().trim();
                Some((*field, normalize(*field, value)))
            })
            .collect();

        if fields.is_empty() {
            ExtractedFields::NoData
        } else {
            ExtractedFields::Fields(fields)
        }
    }
}

fn normalize(field: FieldName, value: &str) -> String {
    match field {
        FieldName::ClaimAmount => value.replace(',', ""),
        _ => value.to_string(),
    }
}
