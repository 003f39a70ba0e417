//! Text analysis handlers

use axum::{extract::State, Json};
use domain_claims::{ClaimAnalysis, GuidelineReport};

use crate::dto::analysis::TextRequest;
use crate::{error::ApiError, AppState};

/// Runs the claim analyzers over raw text, skipping extraction
pub async fn analyze_claim(
    State(state): State<AppState>,
    Json(request): Json<TextRequest>,
) -> Result<Json<ClaimAnalysis>, ApiError> {
    let analysis = state.batch.pipeline().analyze_text(&request.text)?;
    Ok(Json(analysis))
}

/// Checks raw text against the underwriting guidelines
pub async fn check_guidelines(
    State(state): State<AppState>,
    Json(request): Json<TextRequest>,
) -> Json<GuidelineReport> {
    Json(state.batch.pipeline().analyzer().guidelines().check(&request.text))
}
