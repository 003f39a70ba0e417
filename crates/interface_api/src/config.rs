//! API configuration

use std::time::Duration;

use core_kernel::CoreError;
use domain_intake::BatchConfig;
use serde::Deserialize;

/// API configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Log level
    pub log_level: String,
    /// Largest accepted upload request body, in bytes
    pub max_upload_bytes: usize,
    /// Documents processed at the same time across all uploads
    pub max_concurrent_documents: usize,
    /// Per-document processing budget, in seconds
    pub document_timeout_secs: u64,
    /// Path to the `tesseract` binary
    pub tesseract_path: String,
    /// Tesseract language pack
    pub ocr_language: String,
    /// Longest a single Tesseract run may take before it is killed, in seconds
    pub ocr_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            log_level: "info".to_string(),
            max_upload_bytes: 25 * 1024 * 1024,
            max_concurrent_documents: 4,
            document_timeout_secs: 120,
            tesseract_path: "tesseract".to_string(),
            ocr_language: "eng".to_string(),
            ocr_timeout_secs: 60,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from environment
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("API"))
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Rejects settings the server cannot run with
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.max_concurrent_documents == 0 {
            return Err(CoreError::configuration(
                "max_concurrent_documents must be at least 1",
            ));
        }
        if self.document_timeout_secs == 0 {
            return Err(CoreError::configuration(
                "document_timeout_secs must be at least 1",
            ));
        }
        if self.ocr_timeout_secs == 0 {
            return Err(CoreError::configuration("ocr_timeout_secs must be at least 1"));
        }
        if self.max_upload_bytes == 0 {
            return Err(CoreError::configuration("max_upload_bytes must be positive"));
        }
        Ok(())
    }

    /// Batch settings for the document processor
    pub fn batch_config(&self) -> BatchConfig {
        BatchConfig {
            max_concurrent_documents: self.max_concurrent_documents,
            document_timeout: Duration::from_secs(self.document_timeout_secs),
        }
    }

    /// Kill deadline for one OCR run
    pub fn ocr_timeout(&self) -> Duration {
        Duration::from_secs(self.ocr_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.server_addr(), "0.0.0.0:8000");
        assert_eq!(config.max_upload_bytes, 26_214_400);
    }

    #[test]
    fn test_validate() {
        assert!(ApiConfig::default().validate().is_ok());

        let zero_workers = ApiConfig {
            max_concurrent_documents: 0,
            ..ApiConfig::default()
        };
        let error = zero_workers.validate().unwrap_err();
        assert!(error.to_string().contains("max_concurrent_documents"));

        let zero_timeout = ApiConfig {
            document_timeout_secs: 0,
            ..ApiConfig::default()
        };
        assert!(zero_timeout.validate().is_err());

        let zero_ocr_timeout = ApiConfig {
            ocr_timeout_secs: 0,
            ..ApiConfig::default()
        };
        let error = zero_ocr_timeout.validate().unwrap_err();
        assert!(error.to_string().contains("ocr_timeout_secs"));
        assert_eq!(ApiConfig::default().ocr_timeout(), Duration::from_secs(60));
    }

    #[test]
    fn test_batch_config() {
        let config = ApiConfig {
            max_concurrent_documents: 2,
            document_timeout_secs: 30,
            ..ApiConfig::default()
        };

        let batch = config.batch_config();
        assert_eq!(batch.max_concurrent_documents, 2);
        assert_eq!(batch.document_timeout, Duration::from_secs(30));
    }
}
