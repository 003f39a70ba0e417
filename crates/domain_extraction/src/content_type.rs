//! Declared content type to extractor mapping

use serde::{Deserialize, Serialize};

pub const PDF: &str = "application/pdf";
pub const JPEG: &str = "image/jpeg";
pub const PNG: &str = "image/png";
pub const DOCX: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const PLAIN_TEXT: &str = "text/plain";

/// Whitelisted content types and the extractor each one selects
const WHITELIST: &[(&str, ExtractorKind)] = &[
    (PDF, ExtractorKind::Pdf),
    (JPEG, ExtractorKind::Image),
    (PNG, ExtractorKind::Image),
    (DOCX, ExtractorKind::Docx),
    (PLAIN_TEXT, ExtractorKind::Text),
];

/// Extraction strategy selected from a declared content type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractorKind {
    Pdf,
    Image,
    Docx,
    Text,
}

impl ExtractorKind {
    /// Looks up the extractor for a declared content type.
    ///
    /// Matching ignores letter case and any parameters after `;`, so
    /// `text/plain; charset=utf-8` selects the text extractor.
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        WHITELIST
            .iter()
            .find(|(mime, _)| *mime == essence)
            .map(|(_, kind)| *kind)
    }

    /// Label used in the `[Error in ...]` text of a failed extraction
    pub fn failure_label(&self) -> &'static str {
        match self {
            ExtractorKind::Pdf => "PDF extraction",
            ExtractorKind::Image => "image OCR",
            ExtractorKind::Docx => "DOCX extraction",
            ExtractorKind::Text => "TXT extraction",
        }
    }
}
