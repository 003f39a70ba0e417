//! Collaborator Ports
//!
//! The intake pipeline leans on four off-the-shelf capabilities that it never
//! implements itself: an OCR engine, a PDF renderer, a DOCX text puller and a
//! named-entity recognizer. Each one is reached through a narrow port trait
//! defined here, so adapters can be swapped (Tesseract, lopdf, a mock in
//! tests) without touching the pipeline.
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │        Intake pipeline / rule engines          │
//! └───────────────────────────────────────────────┘
//!                        │
//!                        ▼
//! ┌───────────────────────────────────────────────┐
//! │   OcrEngine  PdfRenderer  DocxReader           │
//! │   EntityRecognizer                             │
//! └───────────────────────────────────────────────┘
//!            ▲                        ▲
//!   ┌────────┴────────┐     ┌────────┴────────┐
//!   │ Default adapter │     │   Mock adapter  │
//!   └─────────────────┘     └─────────────────┘
//! ```
//!
//! All ports are synchronous: extraction is CPU and process bound, and the
//! batch processor already moves each document onto a blocking thread.

use std::fmt;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for port operations
///
/// Every adapter reports failures through this type so the extraction layer
/// can fold them into a single extraction-error message.
#[derive(Debug, Error)]
pub enum PortError {
    /// The input could not be understood by the collaborator
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
    },

    /// The collaborator ran but failed to produce a result
    #[error("{operation} failed: {message}")]
    Processing {
        operation: String,
        message: String,
    },

    /// The collaborator is not installed or cannot be reached
    #[error("Service unavailable: {service}")]
    Unavailable {
        service: String,
    },

    /// The operation timed out
    #[error("Timeout after {duration_ms}ms: {operation}")]
    Timeout {
        operation: String,
        duration_ms: u64,
    },

    /// An I/O error occurred while staging data for the collaborator
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PortError {
    /// Creates an InvalidInput error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        PortError::InvalidInput {
            message: message.into(),
        }
    }

    /// Creates a Processing error
    pub fn processing(operation: impl Into<String>, message: impl fmt::Display) -> Self {
        PortError::Processing {
            operation: operation.into(),
            message: message.to_string(),
        }
    }

    /// Creates an Unavailable error
    pub fn unavailable(service: impl Into<String>) -> Self {
        PortError::Unavailable {
            service: service.into(),
        }
    }

    /// Creates a Timeout error for an operation cut off after `limit`
    pub fn timeout(operation: impl Into<String>, limit: std::time::Duration) -> Self {
        PortError::Timeout {
            operation: operation.into(),
            duration_ms: limit.as_millis() as u64,
        }
    }
}

/// Marker trait for all collaborator ports
pub trait DomainPort: HealthCheckable + 'static {}

/// Optical character recognition: image in, best-effort text out.
///
/// The image is handed over as encoded bytes (PNG or JPEG). An empty string
/// is a valid answer for a blank page.
pub trait OcrEngine: DomainPort {
    fn recognize(&self, image: &[u8]) -> Result<String, PortError>;
}

/// An opened PDF whose pages can be read in order.
pub trait PdfDocument: Send {
    /// Number of pages
    fn page_count(&self) -> usize;

    /// Text layer of the page at `index` (zero based); may be empty for scans
    fn page_text(&self, index: usize) -> Result<String, PortError>;

    /// Page at `index` rendered to an encoded image suitable for OCR
    fn rasterize_page(&self, index: usize) -> Result<Vec<u8>, PortError>;
}

/// Opens PDF bytes into an ordered sequence of pages.
pub trait PdfRenderer: DomainPort {
    fn open(&self, pdf_bytes: &[u8]) -> Result<Box<dyn PdfDocument>, PortError>;
}

/// Pulls plain text out of a DOCX file on disk.
pub trait DocxReader: DomainPort {
    fn read_text(&self, path: &Path) -> Result<String, PortError>;
}

/// A named entity found in free text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Surface text of the entity
    pub text: String,
    /// Entity label such as `DATE` or `MONEY`
    pub label: String,
}

impl Entity {
    pub fn new(text: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            label: label.into(),
        }
    }
}

/// Named-entity recognition over free text, results in document order.
pub trait EntityRecognizer: DomainPort {
    fn recognize(&self, text: &str) -> Result<Vec<Entity>, PortError>;
}

/// Health status for an adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdapterHealth {
    /// Adapter is healthy and operational
    Healthy,
    /// Adapter is degraded but operational
    Degraded,
    /// Adapter is unhealthy and not operational
    Unhealthy,
    /// Health status is unknown
    Unknown,
}

/// Health check result for an adapter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheckResult {
    /// Adapter identifier
    pub adapter_id: String,
    /// Current health status
    pub status: AdapterHealth,
    /// Latency of the health check in milliseconds
    pub latency_ms: u64,
    /// Optional message with additional details
    pub message: Option<String>,
    /// Timestamp of the health check
    pub checked_at: DateTime<Utc>,
}

impl HealthCheckResult {
    /// A healthy result with no message
    pub fn healthy(adapter_id: impl Into<String>) -> Self {
        Self::with_status(adapter_id, AdapterHealth::Healthy, None)
    }

    /// An unhealthy result carrying the reason
    pub fn unhealthy(adapter_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::with_status(adapter_id, AdapterHealth::Unhealthy, Some(message.into()))
    }

    fn with_status(
        adapter_id: impl Into<String>,
        status: AdapterHealth,
        message: Option<String>,
    ) -> Self {
        Self {
            adapter_id: adapter_id.into(),
            status,
            latency_ms: 0,
            message,
            checked_at: Utc::now(),
        }
    }
}

/// Trait for adapters that support health checks
///
/// In-process adapters are healthy by construction and only need to name
/// themselves; adapters backed by an external binary override the check.
#[async_trait::async_trait]
pub trait HealthCheckable: Send + Sync {
    /// Stable identifier used in health reports and logs
    fn adapter_id(&self) -> &str;

    /// Performs a health check on the adapter
    async fn health_check(&self) -> HealthCheckResult {
        HealthCheckResult::healthy(self.adapter_id())
    }
}
