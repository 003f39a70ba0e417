//! Property-Based Test Generators
//!
//! Proptest strategies for claim texts built from the rule tables, so
//! properties hold by construction rather than by hand-picked examples.

use proptest::prelude::*;

use domain_claims::rules::{CLAIM_CATEGORIES, RISK_RULES, URGENCY_KEYWORDS};
use domain_claims::ClaimType;

/// Filler words that contain no category, urgency, policy or risk keyword
const NEUTRAL_WORDS: &[&str] = &[
    "the", "a", "report", "was", "filed", "on", "monday", "by", "our", "customer", "with",
    "several", "notes", "about", "paperwork", "and", "follow", "up", "requested", "details",
    "pending", "review", "kindly", "update", "status",
];

/// Strategy for a space-separated run of neutral filler words
pub fn neutral_text_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(NEUTRAL_WORDS), 0..12)
        .prop_map(|words| words.join(" "))
}

/// Strategy for a category and one of its keywords
pub fn category_keyword_strategy() -> impl Strategy<Value = (ClaimType, &'static str)> {
    let pairs: Vec<(ClaimType, &'static str)> = CLAIM_CATEGORIES
        .iter()
        .flat_map(|(claim_type, keywords)| keywords.iter().map(move |k| (*claim_type, *k)))
        .collect();
    prop::sample::select(pairs)
}

/// Strategy for an urgency keyword
pub fn urgency_keyword_strategy() -> impl Strategy<Value = &'static str> {
    prop::sample::select(URGENCY_KEYWORDS)
}

/// Strategy for a subset of risk rule indices, as a set of labels and the
/// expected total score
pub fn risk_labels_strategy() -> impl Strategy<Value = (Vec<&'static str>, u32)> {
    prop::sample::subsequence((0..RISK_RULES.len()).collect::<Vec<_>>(), 0..=RISK_RULES.len())
        .prop_map(|indices| {
            let labels: Vec<&'static str> = indices.iter().map(|i| RISK_RULES[*i].label).collect();
            let score = indices.iter().map(|i| RISK_RULES[*i].score).sum();
            (labels, score)
        })
}

/// Strategy for arbitrary printable claim-like text, keywords included or not
pub fn claim_text_strategy() -> impl Strategy<Value = String> {
    (
        neutral_text_strategy(),
        prop::option::of(category_keyword_strategy()),
        prop::option::of(urgency_keyword_strategy()),
        neutral_text_strategy(),
    )
        .prop_map(|(head, keyword, urgency, tail)| {
            let mut parts = vec![head];
            if let Some((_, keyword)) = keyword {
                parts.push(keyword.to_string());
            }
            if let Some(urgency) = urgency {
                parts.push(urgency.to_string());
            }
            parts.push(tail);
            parts.join(" ")
        })
}
