//! Runs every rule engine over one claim text

use std::sync::Arc;

use serde::Serialize;

use core_kernel::EntityRecognizer;

use crate::classification::{ClaimClassifier, ClassificationResult};
use crate::error::ClaimRulesError;
use crate::guidelines::{GuidelineChecker, GuidelineReport};
use crate::info::{ExtractedFields, InfoExtractor};
use crate::risk::{RiskAssessment, RiskAssessor};

/// Combined output of all analyzers for one text
#[derive(Debug, Clone, Serialize)]
pub struct ClaimAnalysis {
    #[serde(flatten)]
    pub classification: ClassificationResult,
    #[serde(flatten)]
    pub risk: RiskAssessment,
    pub extracted_info: ExtractedFields,
    pub guideline_compliance: GuidelineReport,
}

/// Bundle of the claim analyzers, built once and shared
#[derive(Debug, Clone)]
pub struct ClaimAnalyzer {
    classifier: ClaimClassifier,
    risk: RiskAssessor,
    info: InfoExtractor,
    guidelines: GuidelineChecker,
}

impl ClaimAnalyzer {
    /// Analyzer over the standard rule tables
    pub fn new(recognizer: Arc<dyn EntityRecognizer>) -> Self {
        Self::from_parts(
            ClaimClassifier::new(recognizer),
            RiskAssessor::new(),
            InfoExtractor::new(),
            GuidelineChecker::new(),
        )
    }

    pub fn from_parts(
        classifier: ClaimClassifier,
        risk: RiskAssessor,
        info: InfoExtractor,
        guidelines: GuidelineChecker,
    ) -> Self {
        Self {
            classifier,
            risk,
            info,
            guidelines,
        }
    }

    /// Runs each analyzer exactly once.
    ///
    /// # Errors
    ///
    /// Only classification can fail (entity recognition); the other
    /// analyzers fold their failures into their own results.
    pub fn analyze(&self, text: &str) -> Result<ClaimAnalysis, ClaimRulesError> {
        Ok(ClaimAnalysis {
            classification: self.classifier.classify(text)?,
            risk: self.risk.assess(text),
            extracted_info: self.info.extract(text),
            guideline_compliance: self.guidelines.check(text),
        })
    }

    pub fn guidelines(&self) -> &GuidelineChecker {
        &self.guidelines
    }
}
