//! Intake errors
//!
//! Document processing never returns these as `Err`: the pipeline and batch
//! processor turn each into a Failed document result carrying its message.
//! Only raw-text analysis hands them back to the caller.

use domain_claims::ClaimRulesError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IntakeError {
    #[error(transparent)]
    Analysis(#[from] ClaimRulesError),

    #[error("Processing timed out after {duration_ms}ms")]
    Timeout { duration_ms: u64 },

    #[error("Processing task failed: {0}")]
    TaskFailed(String),
}
