//! Claim intake API server binary
//!
//! This binary starts the HTTP API server for claim document intake.
//!
//! # Usage
//!
//! ```bash
//! # Run with default configuration
//! cargo run --bin claimpilot-api
//!
//! # Run with environment variables
//! API_HOST=0.0.0.0 API_PORT=8000 API_TESSERACT_PATH=/usr/bin/tesseract cargo run --bin claimpilot-api
//! ```
//!
//! # Environment Variables
//!
//! * `API_HOST` - Server host (default: 0.0.0.0)
//! * `API_PORT` - Server port (default: 8000)
//! * `API_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `API_MAX_UPLOAD_BYTES` - Largest accepted upload body (default: 25 MiB)
//! * `API_MAX_CONCURRENT_DOCUMENTS` - Documents processed at once (default: 4)
//! * `API_DOCUMENT_TIMEOUT_SECS` - Per-document budget (default: 120)
//! * `API_TESSERACT_PATH` - Tesseract binary (default: tesseract)
//! * `API_OCR_LANGUAGE` - Tesseract language pack (default: eng)
//! * `API_OCR_TIMEOUT_SECS` - Kill deadline for one Tesseract run (default: 60)

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use core_kernel::CollaboratorRegistry;
use domain_claims::PatternEntityRecognizer;
use domain_extraction::adapters::{LopdfRenderer, TesseractCli, ZipDocxReader};
use interface_api::{config::ApiConfig, create_router};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Main entry point for the API server.
///
/// Initializes logging, loads configuration, wires the collaborators and
/// starts the HTTP server.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = load_config();

    init_tracing(&config.log_level);

    config.validate()?;

    tracing::info!(
        host = %config.host,
        port = %config.port,
        max_concurrent_documents = config.max_concurrent_documents,
        "Starting claim intake API server"
    );

    let registry = build_registry(&config)?;

    let report = registry.health_report().await;
    tracing::info!(
        status = ?report.overall_status,
        healthy = report.healthy_count,
        total = report.total_count,
        "Collaborators checked"
    );

    let app = create_router(registry, config.clone());

    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .with_context(|| format!("invalid server address {}", config.server_addr()))?;

    tracing::info!(%addr, "Server listening");

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Loads API configuration from environment variables.
///
/// Falls back to individual variables and defaults if the `API_` source
/// cannot be deserialized as a whole.
fn load_config() -> ApiConfig {
    ApiConfig::from_env().unwrap_or_else(|_| {
        let defaults = ApiConfig::default();
        ApiConfig {
            host: std::env::var("API_HOST").unwrap_or(defaults.host),
            port: env_parse("API_PORT").unwrap_or(defaults.port),
            log_level: std::env::var("API_LOG_LEVEL")
                .or_else(|_| std::env::var("RUST_LOG"))
                .unwrap_or(defaults.log_level),
            max_upload_bytes: env_parse("API_MAX_UPLOAD_BYTES").unwrap_or(defaults.max_upload_bytes),
            max_concurrent_documents: env_parse("API_MAX_CONCURRENT_DOCUMENTS")
                .unwrap_or(defaults.max_concurrent_documents),
            document_timeout_secs: env_parse("API_DOCUMENT_TIMEOUT_SECS")
                .unwrap_or(defaults.document_timeout_secs),
            tesseract_path: std::env::var("API_TESSERACT_PATH").unwrap_or(defaults.tesseract_path),
            ocr_language: std::env::var("API_OCR_LANGUAGE").unwrap_or(defaults.ocr_language),
            ocr_timeout_secs: env_parse("API_OCR_TIMEOUT_SECS").unwrap_or(defaults.ocr_timeout_secs),
        }
    })
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}

/// Initializes the tracing subscriber for structured logging.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Wires the production collaborators: Tesseract, lopdf, the zip DOCX reader
/// and the pattern entity recognizer.
fn build_registry(config: &ApiConfig) -> anyhow::Result<CollaboratorRegistry> {
    let registry = CollaboratorRegistry::builder()
        .ocr(Arc::new(
            TesseractCli::new(&config.tesseract_path, &config.ocr_language)
                .with_timeout(config.ocr_timeout()),
        ))
        .pdf_renderer(Arc::new(LopdfRenderer))
        .docx_reader(Arc::new(ZipDocxReader))
        .entity_recognizer(Arc::new(PatternEntityRecognizer::new()))
        .build()?;
    Ok(registry)
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            tracing::error!(%error, "Failed to listen for Ctrl+C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::error!(%error, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
