//! Pre-built Test Fixtures
//!
//! Sample claim texts with known classification, risk and extraction
//! outcomes, plus the content types the dispatcher recognizes.

use domain_extraction::content_type;

/// Claim texts with predictable analyzer outcomes
pub struct ClaimTextFixtures;

impl ClaimTextFixtures {
    /// Health keyword, no urgency keyword: Health / Medium
    pub fn routine_health() -> &'static str {
        "Patient was admitted to the hospital for observation and released the next day."
    }

    /// Property keyword plus "fast-track": Property / High
    pub fn urgent_flood() -> &'static str {
        "Severe flood damage to the ground floor, please fast-track this claim."
    }

    /// No category keyword at all: Unknown / Low
    pub fn unmatched() -> &'static str {
        "Requesting an update on my paperwork."
    }

    /// "fire" (+4) and "leak" (+3): score 7, High risk
    pub fn fire_and_leak() -> &'static str {
        "A kitchen fire last week, and now there is a leak from the ceiling."
    }

    /// Contains the H1 exclusion phrase
    pub fn cosmetic_surgery() -> &'static str {
        "Reimbursement request for cosmetic surgery performed at the clinic."
    }

    /// Every labelled field present
    pub fn full_claim_form() -> &'static str {
        "Name: Priya Sharma\n\
         Date: 12/03/2024\n\
         Policy Number: HLT2024001\n\
         Claim Amount: ₹12,000.50\n\
         Treatment at City Hospital following an accident."
    }

    /// Property inspection report meeting every underwriting guideline
    pub fn compliant_inspection() -> &'static str {
        "Inspection report. Fire extinguisher present in kitchen. \
         Electrical inspection completed in 2023. Construction type: masonry. \
         Roof condition: good."
    }

    /// Only a poor roof is mentioned; no guideline passes
    pub fn poor_roof_only() -> &'static str {
        "Roof condition: poor"
    }
}

/// Content types as sent by upload clients
pub struct ContentTypeFixtures;

impl ContentTypeFixtures {
    pub fn pdf() -> &'static str {
        content_type::PDF
    }

    pub fn png() -> &'static str {
        content_type::PNG
    }

    pub fn jpeg() -> &'static str {
        content_type::JPEG
    }

    pub fn docx() -> &'static str {
        content_type::DOCX
    }

    pub fn plain_text() -> &'static str {
        content_type::PLAIN_TEXT
    }

    /// Plain text with parameters and odd casing
    pub fn plain_text_with_charset() -> &'static str {
        "Text/Plain; charset=utf-8"
    }

    /// Not on the whitelist
    pub fn unsupported() -> &'static str {
        "application/zip"
    }
}
