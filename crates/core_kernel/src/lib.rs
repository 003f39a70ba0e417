//! Core Kernel - Foundational types shared by the claim intake system
//!
//! This crate provides the building blocks used across all domain crates:
//! - Strongly-typed identifiers for documents and batches
//! - Collaborator ports (OCR, PDF rendering, DOCX reading, entity recognition)
//! - A registry that wires the collaborators together and health-checks them

pub mod identifiers;
pub mod ports;
pub mod registry;
pub mod error;

pub use identifiers::{DocumentId, BatchId};
pub use ports::{
    AdapterHealth, DocxReader, DomainPort, Entity, EntityRecognizer, HealthCheckResult,
    HealthCheckable, OcrEngine, PdfDocument, PdfRenderer, PortError,
};
pub use registry::{CollaboratorRegistry, CollaboratorRegistryBuilder, RegistryHealthReport};
pub use error::CoreError;
