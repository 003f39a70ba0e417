//! DOCX extraction through a scoped temporary file

use std::io::Write;

use tempfile::Builder;

use core_kernel::DocxReader;

use crate::error::ExtractionError;

/// Writes the bytes to a temporary `.docx` file and hands its path to the
/// reader.
///
/// The file is a `NamedTempFile`, removed when it goes out of scope on
/// every return path, including errors from the reader.
pub fn extract_docx(reader: &dyn DocxReader, docx_bytes: &[u8]) -> Result<String, ExtractionError> {
    let mut staged = Builder::new()
        .prefix("claim-upload-")
        .suffix(".docx")
        .tempfile()?;
    staged.write_all(docx_bytes)?;
    staged.flush()?;

    let text = reader.read_text(staged.path())?;
    Ok(text.trim().to_string())
}
