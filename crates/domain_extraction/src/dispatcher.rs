//! Format dispatcher

use std::sync::Arc;
use std::time::Instant;

use core_kernel::{CollaboratorRegistry, DocxReader, OcrEngine, PdfRenderer};

use crate::content_type::ExtractorKind;
use crate::docx::extract_docx;
use crate::image_ocr::extract_image;
use crate::pdf::extract_pdf;
use crate::plain_text::extract_plain_text;
use crate::text::ExtractedText;

/// Selects an extractor from the declared content type and runs it.
///
/// Holds the collaborators behind trait objects so tests can inject mocks.
#[derive(Clone)]
pub struct DocumentExtractor {
    ocr: Arc<dyn OcrEngine>,
    pdf_renderer: Arc<dyn PdfRenderer>,
    docx_reader: Arc<dyn DocxReader>,
}

impl DocumentExtractor {
    pub fn new(
        ocr: Arc<dyn OcrEngine>,
        pdf_renderer: Arc<dyn PdfRenderer>,
        docx_reader: Arc<dyn DocxReader>,
    ) -> Self {
        Self {
            ocr,
            pdf_renderer,
            docx_reader,
        }
    }

    pub fn from_registry(registry: &CollaboratorRegistry) -> Self {
        Self::new(registry.ocr(), registry.pdf_renderer(), registry.docx_reader())
    }

    /// Extracts text from `content`.
    ///
    /// Never fails: unsupported content types and extractor errors come back
    /// as [`ExtractedText::Unsupported`] and [`ExtractedText::Failed`].
    pub fn extract(&self, content_type: &str, content: &[u8]) -> ExtractedText {
        let Some(kind) = ExtractorKind::from_content_type(content_type) else {
            tracing::info!(content_type, "Rejected unsupported content type");
            return ExtractedText::Unsupported;
        };

        let started = Instant::now();
        let outcome = match kind {
            ExtractorKind::Pdf => extract_pdf(&*self.pdf_renderer, &*self.ocr, content),
            ExtractorKind::Image => extract_image(&*self.ocr, content),
            ExtractorKind::Docx => extract_docx(&*self.docx_reader, content),
            ExtractorKind::Text => extract_plain_text(content),
        };
        let duration_ms = started.elapsed().as_millis() as u64;

        match outcome {
            Ok(text) => {
                tracing::info!(
                    extractor = ?kind,
                    chars = text.chars().count(),
                    duration_ms,
                    "Extracted document text"
                );
                ExtractedText::Success(text)
            }
            Err(e) => {
                tracing::warn!(extractor = ?kind, error = %e, duration_ms, "Extraction failed");
                ExtractedText::failed(kind, e.to_string())
            }
        }
    }
}
