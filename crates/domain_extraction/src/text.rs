//! Tagged extraction outcome

use serde::{Deserialize, Serialize};

use crate::content_type::ExtractorKind;

/// Placeholder text for content types outside the whitelist
pub const UNSUPPORTED_PLACEHOLDER: &str = "[Unsupported file type]";

/// Outcome of converting one document's bytes into text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractedText {
    /// Text was extracted (possibly empty for a blank document)
    Success(String),
    /// The declared content type is not on the whitelist
    Unsupported,
    /// The selected extractor failed
    Failed {
        kind: ExtractorKind,
        message: String,
    },
}

/// Serializable tag of an [`ExtractedText`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionStatus {
    Success,
    Unsupported,
    Error,
}

impl ExtractedText {
    pub fn failed(kind: ExtractorKind, message: impl Into<String>) -> Self {
        ExtractedText::Failed {
            kind,
            message: message.into(),
        }
    }

    pub fn status(&self) -> ExtractionStatus {
        match self {
            ExtractedText::Success(_) => ExtractionStatus::Success,
            ExtractedText::Unsupported => ExtractionStatus::Unsupported,
            ExtractedText::Failed { .. } => ExtractionStatus::Error,
        }
    }

    /// Text form shown to users: the content itself, the unsupported
    /// placeholder, or `[Error in <extractor>] <message>`.
    pub fn render(&self) -> String {
        match self {
            ExtractedText::Success(text) => text.clone(),
            ExtractedText::Unsupported => UNSUPPORTED_PLACEHOLDER.to_string(),
            ExtractedText::Failed { kind, message } => {
                format!("[Error in {}] {}", kind.failure_label(), message)
            }
        }
    }

    /// Text handed to the rule engines.
    ///
    /// Unsupported documents are analysed as their placeholder; failed
    /// extractions are analysed as empty text so error messages never feed
    /// keyword matching.
    pub fn analysis_text(&self) -> &str {
        match self {
            ExtractedText::Success(text) => text,
            ExtractedText::Unsupported => UNSUPPORTED_PLACEHOLDER,
            ExtractedText::Failed { .. } => "",
        }
    }

    /// First `max_chars` characters of the rendered text
    pub fn preview(&self, max_chars: usize) -> String {
        self.render().chars().take(max_chars).collect()
    }
}
