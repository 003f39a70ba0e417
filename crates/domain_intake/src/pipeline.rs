//! Result aggregator
//!
//! Runs one document through extraction and every analyzer, exactly once
//! each, and folds the outputs into a [`DocumentResult`]. Errors stop at
//! this boundary and become a Failed result.

use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use core_kernel::{CollaboratorRegistry, EntityRecognizer};
use domain_claims::{ClaimAnalysis, ClaimAnalyzer};
use domain_extraction::DocumentExtractor;

use crate::document::Document;
use crate::error::IntakeError;
use crate::result::DocumentResult;

/// Characters of extracted text echoed back in each result
pub const PREVIEW_CHARS: usize = 1500;

#[derive(Clone)]
pub struct ClaimIntakePipeline {
    extractor: DocumentExtractor,
    analyzer: ClaimAnalyzer,
}

impl ClaimIntakePipeline {
    pub fn new(extractor: DocumentExtractor, analyzer: ClaimAnalyzer) -> Self {
        Self {
            extractor,
            analyzer,
        }
    }

    /// Pipeline wired to the registry's collaborators and the standard rule tables
    pub fn from_registry(registry: &CollaboratorRegistry) -> Self {
        Self::with_recognizer(
            DocumentExtractor::from_registry(registry),
            registry.entity_recognizer(),
        )
    }

    pub fn with_recognizer(
        extractor: DocumentExtractor,
        recognizer: Arc<dyn EntityRecognizer>,
    ) -> Self {
        Self::new(extractor, ClaimAnalyzer::new(recognizer))
    }

    pub fn analyzer(&self) -> &ClaimAnalyzer {
        &self.analyzer
    }

    /// Processes one document to completion. Never fails; errors come back
    /// as a Failed result.
    pub fn process(&self, document: &Document) -> DocumentResult {
        let started_at = Utc::now();
        let started = Instant::now();

        info!(
            document_id = %document.id,
            filename = %document.filename,
            content_type = %document.content_type,
            bytes = document.size(),
            "Processing document"
        );

        match self.try_process(document, started_at) {
            Ok(result) => {
                info!(
                    document_id = %document.id,
                    duration_ms = started.elapsed().as_millis() as u64,
                    "Document processed"
                );
                result
            }
            Err(e) => {
                warn!(document_id = %document.id, error = %e, "Document processing failed");
                DocumentResult::failed(document.filename.clone(), started_at, e.to_string())
            }
        }
    }

    fn try_process(
        &self,
        document: &Document,
        started_at: DateTime<Utc>,
    ) -> Result<DocumentResult, IntakeError> {
        let extracted = self
            .extractor
            .extract(&document.content_type, &document.content);
        let analysis = self.analyzer.analyze(extracted.analysis_text())?;

        Ok(DocumentResult::processed(
            document.filename.clone(),
            started_at,
            extracted.preview(PREVIEW_CHARS),
            extracted.status(),
            analysis,
        ))
    }

    /// Runs the analyzers over text that needs no extraction
    pub fn analyze_text(&self, text: &str) -> Result<ClaimAnalysis, IntakeError> {
        Ok(self.analyzer.analyze(text)?)
    }
}
