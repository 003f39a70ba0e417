//! Pattern-based named-entity recognizer
//!
//! Default [`EntityRecognizer`] adapter. Finds dates, money amounts,
//! percentages and policy identifiers with regexes and returns them in the
//! order they appear in the text. Overlapping matches keep the earliest,
//! then the longest.

use once_cell::sync::Lazy;
use regex::Regex;

use core_kernel::{DomainPort, Entity, EntityRecognizer, HealthCheckable, PortError};

static DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:\d{2}[/-]\d{2}[/-]\d{4}|\d{4}[/-]\d{2}[/-]\d{2}|\d{1,2} (?:january|february|march|april|may|june|july|august|september|october|november|december) \d{4})\b",
    )
    .unwrap()
});

static MONEY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(?:[₹$€£]\s?\d[\d,]*(?:\.\d{1,2})?|\b\d[\d,]*(?:\.\d{1,2})?\s?(?:rupees|dollars|euros|pounds|inr|usd|eur|gbp)\b)",
    )
    .unwrap()
});

static PERCENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\d+(?:\.\d+)?\s?%").unwrap());

static POLICY_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b[A-Z]{2,4}-?\d{4,}\b").unwrap());

#[derive(Debug, Clone, Copy, Default)]
pub struct PatternEntityRecognizer;

impl PatternEntityRecognizer {
    pub fn new() -> Self {
        Self
    }
}

impl EntityRecognizer for PatternEntityRecognizer {
    fn recognize(&self, text: &str) -> Result<Vec<Entity>, PortError> {
        let labelled: [(&Regex, &str); 4] = [
            (&*DATE, "DATE"),
            (&*MONEY, "MONEY"),
            (&*PERCENT, "PERCENT"),
            (&*POLICY_ID, "POLICY_ID"),
        ];

        let mut spans: Vec<(usize, usize, &str)> = labelled
            .iter()
            .flat_map(|(regex, label)| {
                regex
                    .find_iter(text)
                    .map(move |m| (m.start(), m.end(), *label))
            })
            .collect();

        // earliest first, longest first among equal starts
        spans.sort_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)));

        let mut entities = Vec::new();
        let mut covered_to = 0;
        for (start, end, label) in spans {
            if start < covered_to {
                continue;
            }
            entities.push(Entity::new(text[start..end].trim(), label));
            covered_to = end;
        }

        Ok(entities)
    }
}

impl HealthCheckable for PatternEntityRecognizer {
    fn adapter_id(&self) -> &str {
        "pattern-ner"
    }
}

impl DomainPort for PatternEntityRecognizer {}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(text: &str) -> Vec<(String, String)> {
        PatternEntityRecognizer
            .recognize(text)
            .unwrap()
            .into_iter()
            .map(|e| (e.text, e.label))
            .collect()
    }

    #[test]
    fn test_entities_in_text_order() {
        let found = labels("Policy HLT2024001 paid ₹12,000.50 on 12/03/2024 at 80% cover");
        assert_eq!(
            found,
            vec![
                ("HLT2024001".to_string(), "POLICY_ID".to_string()),
                ("₹12,000.50".to_string(), "MONEY".to_string()),
                ("12/03/2024".to_string(), "DATE".to_string()),
                ("80%".to_string(), "PERCENT".to_string()),
            ]
        );
    }

    #[test]
    fn test_long_form_date_and_worded_money() {
        let found = labels("Admitted on 5 March 2024, bill of 45000 rupees");
        assert_eq!(
            found,
            vec![
                ("5 March 2024".to_string(), "DATE".to_string()),
                ("45000 rupees".to_string(), "MONEY".to_string()),
            ]
        );
    }

    #[test]
    fn test_no_entities() {
        assert!(labels("nothing to see here").is_empty());
    }
}
