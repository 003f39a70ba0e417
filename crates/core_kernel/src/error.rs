//! Core error types used across the system

use thiserror::Error;

/// Core error type for the kernel
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Collaborator not registered: {0}")]
    MissingCollaborator(String),
}

impl CoreError {
    pub fn configuration(message: impl Into<String>) -> Self {
        CoreError::Configuration(message.into())
    }

    pub fn missing_collaborator(name: impl Into<String>) -> Self {
        CoreError::MissingCollaborator(name.into())
    }
}
