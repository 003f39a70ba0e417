//! Image OCR extraction

use std::io::Cursor;

use image::ImageOutputFormat;

use core_kernel::OcrEngine;

use crate::error::ExtractionError;

/// Decodes the image, normalises it to PNG and runs OCR on it.
pub fn extract_image(ocr: &dyn OcrEngine, image_bytes: &[u8]) -> Result<String, ExtractionError> {
    let decoded = image::load_from_memory(image_bytes)
        .map_err(|e| ExtractionError::ImageDecode(e.to_string()))?;

    let mut png = Cursor::new(Vec::new());
    decoded
        .write_to(&mut png, ImageOutputFormat::Png)
        .map_err(|e| ExtractionError::ImageDecode(e.to_string()))?;

    tracing::debug!(
        width = decoded.width(),
        height = decoded.height(),
        "Running OCR on uploaded image"
    );

    let text = ocr.recognize(png.get_ref())?;
    Ok(text.trim().to_string())
}
