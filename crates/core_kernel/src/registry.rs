//! Collaborator Registry
//!
//! A single place to configure and retrieve the collaborator adapters used
//! by the intake pipeline. The registry is built once at process start and
//! then shared read-only (it is cheap to clone: every slot is an `Arc`).
//!
//! # Usage
//!
//! ```rust,ignore
//! use core_kernel::registry::CollaboratorRegistry;
//!
//! let registry = CollaboratorRegistry::builder()
//!     .ocr(Arc::new(TesseractCli::new("tesseract", "eng")))
//!     .pdf_renderer(Arc::new(LopdfRenderer))
//!     .docx_reader(Arc::new(ZipDocxReader))
//!     .entity_recognizer(Arc::new(PatternEntityRecognizer::new()))
//!     .build()?;
//!
//! let report = registry.health_report().await;
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::CoreError;
use crate::ports::{
    AdapterHealth, DocxReader, EntityRecognizer, HealthCheckResult, HealthCheckable, OcrEngine,
    PdfRenderer,
};

/// The four collaborators the pipeline needs, fully wired
#[derive(Clone)]
pub struct CollaboratorRegistry {
    ocr: Arc<dyn OcrEngine>,
    pdf_renderer: Arc<dyn PdfRenderer>,
    docx_reader: Arc<dyn DocxReader>,
    entity_recognizer: Arc<dyn EntityRecognizer>,
}

impl CollaboratorRegistry {
    /// Starts a registry builder
    pub fn builder() -> CollaboratorRegistryBuilder {
        CollaboratorRegistryBuilder::default()
    }

    pub fn ocr(&self) -> Arc<dyn OcrEngine> {
        Arc::clone(&self.ocr)
    }

    pub fn pdf_renderer(&self) -> Arc<dyn PdfRenderer> {
        Arc::clone(&self.pdf_renderer)
    }

    pub fn docx_reader(&self) -> Arc<dyn DocxReader> {
        Arc::clone(&self.docx_reader)
    }

    pub fn entity_recognizer(&self) -> Arc<dyn EntityRecognizer> {
        Arc::clone(&self.entity_recognizer)
    }

    /// Runs every adapter's health check and folds the results into one report
    pub async fn health_report(&self) -> RegistryHealthReport {
        let checks = [
            ("ocr", self.ocr.health_check().await),
            ("pdf_renderer", self.pdf_renderer.health_check().await),
            ("docx_reader", self.docx_reader.health_check().await),
            ("entity_recognizer", self.entity_recognizer.health_check().await),
        ];

        let mut collaborator_health = HashMap::new();
        for (slot, result) in checks {
            if result.status != AdapterHealth::Healthy {
                tracing::warn!(
                    slot,
                    adapter = %result.adapter_id,
                    status = ?result.status,
                    message = result.message.as_deref().unwrap_or(""),
                    "Collaborator health check failed"
                );
            }
            collaborator_health.insert(slot.to_string(), result);
        }

        RegistryHealthReport::from_results(collaborator_health)
    }
}

impl std::fmt::Debug for CollaboratorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollaboratorRegistry")
            .field("ocr", &self.ocr.adapter_id())
            .field("pdf_renderer", &self.pdf_renderer.adapter_id())
            .field("docx_reader", &self.docx_reader.adapter_id())
            .field("entity_recognizer", &self.entity_recognizer.adapter_id())
            .finish()
    }
}

/// Builder for [`CollaboratorRegistry`]
#[derive(Default)]
pub struct CollaboratorRegistryBuilder {
    ocr: Option<Arc<dyn OcrEngine>>,
    pdf_renderer: Option<Arc<dyn PdfRenderer>>,
    docx_reader: Option<Arc<dyn DocxReader>>,
    entity_recognizer: Option<Arc<dyn EntityRecognizer>>,
}

impl CollaboratorRegistryBuilder {
    pub fn ocr(mut self, ocr: Arc<dyn OcrEngine>) -> Self {
        self.ocr = Some(ocr);
        self
    }

    pub fn pdf_renderer(mut self, renderer: Arc<dyn PdfRenderer>) -> Self {
        self.pdf_renderer = Some(renderer);
        self
    }

    pub fn docx_reader(mut self, reader: Arc<dyn DocxReader>) -> Self {
        self.docx_reader = Some(reader);
        self
    }

    pub fn entity_recognizer(mut self, recognizer: Arc<dyn EntityRecognizer>) -> Self {
        self.entity_recognizer = Some(recognizer);
        self
    }

    /// Builds the registry
    ///
    /// # Errors
    ///
    /// Returns `CoreError::MissingCollaborator` naming the first empty slot.
    pub fn build(self) -> Result<CollaboratorRegistry, CoreError> {
        Ok(CollaboratorRegistry {
            ocr: self.ocr.ok_or_else(|| CoreError::missing_collaborator("ocr"))?,
            pdf_renderer: self
                .pdf_renderer
                .ok_or_else(|| CoreError::missing_collaborator("pdf_renderer"))?,
            docx_reader: self
                .docx_reader
                .ok_or_else(|| CoreError::missing_collaborator("docx_reader"))?,
            entity_recognizer: self
                .entity_recognizer
                .ok_or_else(|| CoreError::missing_collaborator("entity_recognizer"))?,
        })
    }
}

/// Result of health checks across all registered collaborators
#[derive(Debug, Clone)]
pub struct RegistryHealthReport {
    /// Overall health status
    pub overall_status: AdapterHealth,

    /// Health results by registry slot
    pub collaborator_health: HashMap<String, HealthCheckResult>,

    /// Number of healthy adapters
    pub healthy_count: usize,

    /// Number of unhealthy adapters
    pub unhealthy_count: usize,

    /// Total number of registered adapters
    pub total_count: usize,
}

impl RegistryHealthReport {
    /// Builds a report; one unhealthy adapter degrades the whole, all unhealthy fails it
    pub fn from_results(collaborator_health: HashMap<String, HealthCheckResult>) -> Self {
        let total_count = collaborator_health.len();
        let healthy_count = collaborator_health
            .values()
            .filter(|r| r.status == AdapterHealth::Healthy)
            .count();
        let unhealthy_count = total_count - healthy_count;

        let overall_status = if unhealthy_count == 0 {
            AdapterHealth::Healthy
        } else if healthy_count == 0 {
            AdapterHealth::Unhealthy
        } else {
            AdapterHealth::Degraded
        };

        Self {
            overall_status,
            collaborator_health,
            healthy_count,
            unhealthy_count,
            total_count,
        }
    }

    /// Returns true if all adapters are healthy
    pub fn is_fully_healthy(&self) -> bool {
        self.overall_status == AdapterHealth::Healthy
    }

    /// Returns true if the system is at least partially operational
    pub fn is_operational(&self) -> bool {
        matches!(
            self.overall_status,
            AdapterHealth::Healthy | AdapterHealth::Degraded
        )
    }
}
