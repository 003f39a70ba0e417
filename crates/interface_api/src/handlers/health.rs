//! Health check handlers

use axum::{extract::State, Json};
use tracing::warn;

use crate::dto::health::{HealthResponse, ReadinessResponse};
use crate::{error::ApiError, AppState};

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness check (includes every collaborator)
///
/// A degraded registry is still ready; only a fully unhealthy one is not.
pub async fn readiness_check(
    State(state): State<AppState>,
) -> Result<Json<ReadinessResponse>, ApiError> {
    let report = state.registry.health_report().await;

    if !report.is_operational() {
        warn!(
            unhealthy = report.unhealthy_count,
            total = report.total_count,
            "No collaborator is healthy"
        );
        return Err(ApiError::Unavailable(
            "no collaborator is healthy".to_string(),
        ));
    }

    Ok(Json(ReadinessResponse::from(report)))
}
