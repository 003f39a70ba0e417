//! Per-document result

use chrono::{DateTime, Utc};
use serde::Serialize;

use domain_claims::ClaimAnalysis;
use domain_extraction::ExtractionStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DocumentStatus {
    Processed,
    Failed,
}

/// Outcome of processing one uploaded document.
///
/// A processed result carries the text preview and every analyzer's output
/// flattened into the top level; a failed one carries only `error`.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentResult {
    pub filename: String,
    pub status: DocumentStatus,
    /// Processing start time
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extraction_status: Option<ExtractionStatus>,
    #[serde(flatten)]
    pub analysis: Option<ClaimAnalysis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DocumentResult {
    pub fn processed(
        filename: impl Into<String>,
        timestamp: DateTime<Utc>,
        text: String,
        extraction_status: ExtractionStatus,
        analysis: ClaimAnalysis,
    ) -> Self {
        Self {
            filename: filename.into(),
            status: DocumentStatus::Processed,
            timestamp,
            text: Some(text),
            extraction_status: Some(extraction_status),
            analysis: Some(analysis),
            error: None,
        }
    }

    pub fn failed(
        filename: impl Into<String>,
        timestamp: DateTime<Utc>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            filename: filename.into(),
            status: DocumentStatus::Failed,
            timestamp,
            text: None,
            extraction_status: None,
            analysis: None,
            error: Some(error.into()),
        }
    }

    pub fn is_processed(&self) -> bool {
        self.status == DocumentStatus::Processed
    }
}
