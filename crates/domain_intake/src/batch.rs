//! Bounded batch processing
//!
//! Each document runs on a blocking thread (extraction and OCR block),
//! at most `max_concurrent_documents` at a time, under a per-document
//! timeout that also covers queueing for a slot. Results come back in
//! upload order.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::Semaphore;
use tokio::task::JoinError;
use tokio::time::{timeout_at, Instant};
use tracing::{info, warn};

use core_kernel::BatchId;

use crate::document::Document;
use crate::error::IntakeError;
use crate::pipeline::ClaimIntakePipeline;
use crate::result::DocumentResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchConfig {
    pub max_concurrent_documents: usize,
    pub document_timeout: Duration,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_concurrent_documents: 4,
            document_timeout: Duration::from_secs(120),
        }
    }
}

#[derive(Clone)]
pub struct BatchProcessor {
    pipeline: Arc<ClaimIntakePipeline>,
    permits: Arc<Semaphore>,
    config: BatchConfig,
}

impl BatchProcessor {
    pub fn new(pipeline: Arc<ClaimIntakePipeline>, config: BatchConfig) -> Self {
        Self {
            pipeline,
            permits: Arc::new(Semaphore::new(config.max_concurrent_documents.max(1))),
            config,
        }
    }

    pub fn pipeline(&self) -> &ClaimIntakePipeline {
        &self.pipeline
    }

    pub fn config(&self) -> BatchConfig {
        self.config
    }

    /// Processes every document; one result per document, in input order.
    ///
    /// The concurrency bound is shared by all batches running through this
    /// processor.
    pub async fn process_batch(&self, documents: Vec<Document>) -> Vec<DocumentResult> {
        let batch_id = BatchId::new();
        info!(batch_id = %batch_id, documents = documents.len(), "Processing batch");

        let tasks: Vec<_> = documents
            .into_iter()
            .map(|document| {
                let filename = document.filename.clone();
                let processor = self.clone();
                let handle = tokio::spawn(async move { processor.process_one(document).await });
                (filename, handle)
            })
            .collect();

        let mut results = Vec::with_capacity(tasks.len());
        for (filename, handle) in tasks {
            let result = match handle.await {
                Ok(result) => result,
                Err(e) => DocumentResult::failed(
                    filename,
                    Utc::now(),
                    IntakeError::TaskFailed(describe_join_error(e)).to_string(),
                ),
            };
            results.push(result);
        }

        let failed = results.iter().filter(|r| !r.is_processed()).count();
        info!(batch_id = %batch_id, processed = results.len() - failed, failed, "Batch complete");

        results
    }

    /// Runs one document under a single deadline that covers both the wait
    /// for a permit and the work itself.
    async fn process_one(&self, document: Document) -> DocumentResult {
        let started_at = Utc::now();
        let deadline = Instant::now() + self.config.document_timeout;
        let filename = document.filename.clone();
        let document_id = document.id;

        let error = match timeout_at(deadline, Arc::clone(&self.permits).acquire_owned()).await {
            Ok(Ok(permit)) => {
                // The permit moves onto the blocking thread so it is held until
                // the work really finishes, even if the wait below times out.
                let pipeline = Arc::clone(&self.pipeline);
                let task = tokio::task::spawn_blocking(move || {
                    let _permit = permit;
                    pipeline.process(&document)
                });

                match timeout_at(deadline, task).await {
                    Ok(Ok(result)) => return result,
                    Ok(Err(e)) => IntakeError::TaskFailed(describe_join_error(e)),
                    Err(_) => self.timeout_error(),
                }
            }
            Ok(Err(_)) => IntakeError::TaskFailed("batch processor is shut down".to_string()),
            Err(_) => {
                warn!(document_id = %document_id, filename = %filename, "No processing slot freed up before the deadline");
                self.timeout_error()
            }
        };

        warn!(document_id = %document_id, filename = %filename, error = %error, "Document abandoned");
        DocumentResult::failed(filename, started_at, error.to_string())
    }

    fn timeout_error(&self) -> IntakeError {
        IntakeError::Timeout {
            duration_ms: self.config.document_timeout.as_millis() as u64,
        }
    }
}

fn describe_join_error(error: JoinError) -> String {
    if !error.is_panic() {
        return error.to_string();
    }

    let payload = error.into_panic();
    let detail = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string());
    format!("panicked: {detail}")
}
