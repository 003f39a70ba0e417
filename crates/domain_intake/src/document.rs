//! Uploaded document

use core_kernel::DocumentId;

/// One uploaded file, exactly as received
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub id: DocumentId,
    pub filename: String,
    /// Declared MIME type, possibly with parameters
    pub content_type: String,
    pub content: Vec<u8>,
}

impl Document {
    pub fn new(
        filename: impl Into<String>,
        content_type: impl Into<String>,
        content: Vec<u8>,
    ) -> Self {
        Self {
            id: DocumentId::new(),
            filename: filename.into(),
            content_type: content_type.into(),
            content,
        }
    }

    pub fn size(&self) -> usize {
        self.content.len()
    }
}
