//! HTTP API Layer
//!
//! This crate provides the REST API for claim document intake using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: upload, raw-text analysis and health endpoints
//! - **Middleware**: tracing, audit logging, CORS, body size limit
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent error responses
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::create_router;
//!
//! let app = create_router(registry, config);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use core_kernel::CollaboratorRegistry;
use domain_intake::{BatchProcessor, ClaimIntakePipeline};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::config::ApiConfig;
use crate::handlers::{analysis, health, upload};
use crate::middleware::audit_middleware;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub batch: BatchProcessor,
    pub registry: CollaboratorRegistry,
    pub config: ApiConfig,
}

impl AppState {
    /// Wires the intake pipeline to the registry's collaborators
    pub fn new(registry: CollaboratorRegistry, config: ApiConfig) -> Self {
        let pipeline = Arc::new(ClaimIntakePipeline::from_registry(&registry));
        let batch = BatchProcessor::new(pipeline, config.batch_config());
        Self {
            batch,
            registry,
            config,
        }
    }
}

/// Creates the main API router
///
/// # Arguments
///
/// * `registry` - Collaborators used for extraction and entity recognition
/// * `config` - API configuration
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(registry: CollaboratorRegistry, config: ApiConfig) -> Router {
    let state = AppState::new(registry, config);
    let max_upload_bytes = state.config.max_upload_bytes;

    // Public routes
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    // Upload routes; multipart bodies are capped by the configured size
    let upload_routes = Router::new()
        .route("/upload", post(upload::upload_documents))
        .route("/api/v1/claims/documents", post(upload::upload_documents))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_upload_bytes));

    // Raw-text analysis routes
    let api_routes = Router::new()
        .route("/claims/analyze", post(analysis::analyze_claim))
        .route("/guidelines/check", post(analysis::check_guidelines));

    // Combine all routes
    Router::new()
        .merge(public_routes)
        .merge(upload_routes)
        .nest("/api/v1", api_routes)
        .layer(axum_middleware::from_fn(audit_middleware))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
