//! Upload DTOs

use domain_intake::DocumentResult;
use serde::Serialize;

/// Multipart field that carries the uploaded files
pub const FILES_FIELD: &str = "files";

/// Content type assumed when a part does not declare one
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Results for an upload, one per file, in upload order
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub results: Vec<DocumentResult>,
}
