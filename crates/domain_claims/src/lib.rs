//! Claim Rule Engines
//!
//! Deterministic analyzers that all consume the same extracted claim text.
//! None of them share state; each is built once and then used read-only.
//!
//! ```text
//!                      claim text
//!      ┌──────────────┬─────┴──────┬──────────────┐
//!      ▼              ▼            ▼              ▼
//!  Classifier    RiskAssessor  InfoExtractor  GuidelineChecker
//!  (+ policy
//!   compliance)
//! ```
//!
//! [`ClaimAnalyzer`] runs all of them over one text and bundles the results.

pub mod rules;
pub mod classification;
pub mod compliance;
pub mod guidelines;
pub mod risk;
pub mod info;
pub mod entities;
pub mod analysis;
pub mod error;

pub use classification::{ClaimClassifier, ClaimType, ClassificationResult, Priority, RoutingLogEntry};
pub use compliance::{PolicyComplianceChecker, PolicyViolation};
pub use guidelines::{FindingOutcome, GuidelineChecker, GuidelineFinding, GuidelineReport, GuidelineStatus};
pub use risk::{RiskAssessment, RiskAssessor, RiskLevel};
pub use info::{ExtractedFields, FieldName, InfoExtractor};
pub use entities::PatternEntityRecognizer;
pub use analysis::{ClaimAnalysis, ClaimAnalyzer};
pub use error::ClaimRulesError;
