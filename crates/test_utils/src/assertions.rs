//! Custom Test Assertions
//!
//! Assertion helpers for domain types that give more meaningful failure
//! messages than a bare `assert_eq!`.

use domain_claims::{ClaimType, ClassificationResult, PolicyViolation, Priority};
use domain_extraction::{ExtractedText, ExtractorKind};
use domain_intake::{DocumentResult, DocumentStatus};

/// Asserts type and priority, and that confidence agrees with the priority
pub fn assert_classified(result: &ClassificationResult, claim_type: ClaimType, priority: Priority) {
    assert_eq!(
        result.claim_type(),
        claim_type,
        "Unexpected claim type; rationale was: {}",
        result.rationale()
    );
    assert_eq!(result.priority(), priority, "Unexpected priority for {claim_type}");
    assert_eq!(result.confidence(), priority.confidence());
    assert_eq!(result.confidence_score(), priority.confidence_score());
}

/// Asserts the violated rule ids, in order
pub fn assert_violation_ids(violations: &[PolicyViolation], expected: &[&str]) {
    let ids: Vec<&str> = violations.iter().map(|v| v.rule_id.as_str()).collect();
    assert_eq!(ids, expected, "Unexpected policy violations: {violations:?}");
}

/// Asserts extraction succeeded and returns the text
pub fn assert_extracted(text: &ExtractedText) -> &str {
    match text {
        ExtractedText::Success(content) => content,
        other => panic!("Expected successful extraction, got {other:?}"),
    }
}

/// Asserts extraction failed in the given extractor and the rendered form
/// carries the matching `[Error in ...]` prefix
pub fn assert_extraction_failed(text: &ExtractedText, kind: ExtractorKind) {
    match text {
        ExtractedText::Failed { kind: actual, .. } => {
            assert_eq!(*actual, kind, "Failure reported by the wrong extractor");
        }
        other => panic!("Expected {kind:?} extraction failure, got {other:?}"),
    }

    let prefix = format!("[Error in {}] ", kind.failure_label());
    assert!(
        text.render().starts_with(&prefix),
        "Rendered failure {:?} does not start with {prefix:?}",
        text.render()
    );
}

/// Asserts a document failed with an error containing `fragment`
pub fn assert_document_failed(result: &DocumentResult, fragment: &str) {
    assert_eq!(
        result.status,
        DocumentStatus::Failed,
        "Expected {} to fail",
        result.filename
    );
    let error = result.error.as_deref().unwrap_or_default();
    assert!(
        error.contains(fragment),
        "Error {error:?} for {} does not mention {fragment:?}",
        result.filename
    );
    assert!(result.analysis.is_none());
}

/// Asserts a document was processed and returns its classification
pub fn assert_document_processed(result: &DocumentResult) -> &ClassificationResult {
    assert_eq!(
        result.status,
        DocumentStatus::Processed,
        "Expected {} to be processed, error: {:?}",
        result.filename,
        result.error
    );
    assert!(result.error.is_none());
    &result
        .analysis
        .as_ref()
        .expect("processed result carries an analysis")
        .classification
}

/// Asserts results are in the given filename order
pub fn assert_result_order(results: &[DocumentResult], filenames: &[&str]) {
    let actual: Vec<&str> = results.iter().map(|r| r.filename.as_str()).collect();
    assert_eq!(actual, filenames, "Results are not in upload order");
}
