//! PDF extraction with per-page OCR fallback

use core_kernel::{OcrEngine, PdfRenderer};

use crate::error::ExtractionError;

/// Extracts the text of every page, in page order.
///
/// A page whose text layer is empty or whitespace is rasterized and run
/// through OCR instead. Page texts are joined with `\n` and the result is
/// trimmed.
pub fn extract_pdf(
    renderer: &dyn PdfRenderer,
    ocr: &dyn OcrEngine,
    pdf_bytes: &[u8],
) -> Result<String, ExtractionError> {
    let document = renderer.open(pdf_bytes)?;
    let page_count = document.page_count();
    let mut full_text = String::new();
    let mut ocr_pages = 0usize;

    for index in 0..page_count {
        let layer = document.page_text(index)?;
        let layer = layer.trim();

        if layer.is_empty() {
            let image = document.rasterize_page(index)?;
            let recognized = ocr.recognize(&image)?;
            ocr_pages += 1;
            full_text.push_str(&recognized);
        } else {
            full_text.push_str(layer);
        }
        full_text.push('\n');
    }

    tracing::debug!(page_count, ocr_pages, "Extracted PDF text");

    Ok(full_text.trim().to_string())
}
