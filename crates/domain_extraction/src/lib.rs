//! Document Extraction Domain
//!
//! Turns an uploaded document (raw bytes plus a declared content type) into
//! text the claim rule engines can read.
//!
//! # Flow
//!
//! ```text
//! content type ──► ExtractorKind ──► pdf | image | docx | text extractor
//!                       │                         │
//!                  unsupported              ExtractionError
//!                       ▼                         ▼
//!                  ExtractedText::Unsupported   ExtractedText::Failed
//! ```
//!
//! Extraction never fails out of [`DocumentExtractor::extract`]: every
//! outcome, including errors, is a variant of [`ExtractedText`].

pub mod content_type;
pub mod text;
pub mod pdf;
pub mod image_ocr;
pub mod docx;
pub mod plain_text;
pub mod dispatcher;
pub mod adapters;
pub mod error;

pub use content_type::ExtractorKind;
pub use text::{ExtractedText, ExtractionStatus};
pub use dispatcher::DocumentExtractor;
pub use error::ExtractionError;
