//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! ClaimPilot test suite.
//!
//! # Modules
//!
//! - `fixtures`: Sample claim texts and content types
//! - `builders`: Real PDF, DOCX and PNG bytes, and uploaded documents
//! - `mocks`: Scriptable collaborator adapters and a test registry
//! - `assertions`: Custom assertion helpers for domain types
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod mocks;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use mocks::*;
pub use assertions::*;
pub use generators::*;
