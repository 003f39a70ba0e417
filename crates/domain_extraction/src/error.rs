//! Extraction domain errors

use thiserror::Error;

use core_kernel::PortError;

/// Errors raised inside a single extractor
///
/// These never leave the crate as errors: the dispatcher folds them into
/// [`crate::ExtractedText::Failed`].
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("{0}")]
    Collaborator(#[from] PortError),

    #[error("Cannot decode image: {0}")]
    ImageDecode(String),

    #[error("Invalid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    #[error("Temporary file error: {0}")]
    TempFile(#[from] std::io::Error),
}
