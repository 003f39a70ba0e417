//! Document upload handlers

use axum::{
    extract::{Multipart, State},
    Json,
};
use domain_intake::Document;
use tracing::{debug, info};

use crate::dto::upload::{UploadResponse, DEFAULT_CONTENT_TYPE, FILES_FIELD};
use crate::{error::ApiError, AppState};

/// Accepts one or more files and returns a result per file, in upload order.
///
/// A file that fails to extract or analyze still gets a result; only a
/// malformed or empty upload is rejected as a whole.
pub async fn upload_documents(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut documents = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILES_FIELD) {
            debug!(field = ?field.name(), "Skipping unknown multipart field");
            continue;
        }

        let filename = field.file_name().unwrap_or("upload").to_string();
        let content_type = field
            .content_type()
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();
        let content = field.bytes().await?;

        documents.push(Document::new(filename, content_type, content.to_vec()));
    }

    if documents.is_empty() {
        return Err(ApiError::BadRequest(format!(
            "No files uploaded; send them in the '{FILES_FIELD}' field"
        )));
    }

    info!(count = documents.len(), "Processing uploaded documents");

    let results = state.batch.process_batch(documents).await;
    Ok(Json(UploadResponse { results }))
}
