//! Claim Document Intake
//!
//! Glues extraction and the claim rule engines together: one uploaded
//! document in, one [`DocumentResult`] out, and a batch processor that runs
//! many documents under a concurrency bound and per-document timeout.
//!
//! # Document lifecycle
//!
//! ```text
//! Document ──► extract ──► analyze ──► DocumentResult::Processed
//!                 │            │
//!                 └── error ───┴────► DocumentResult::Failed
//! ```

pub mod document;
pub mod result;
pub mod pipeline;
pub mod batch;
pub mod error;

pub use document::Document;
pub use result::{DocumentResult, DocumentStatus};
pub use pipeline::{ClaimIntakePipeline, PREVIEW_CHARS};
pub use batch::{BatchConfig, BatchProcessor};
pub use error::IntakeError;
