//! Integration tests for the intake pipeline and batch processor

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use domain_claims::{ClaimType, Priority, RiskLevel};
use domain_extraction::ExtractionStatus;
use domain_intake::{BatchConfig, BatchProcessor, ClaimIntakePipeline, DocumentStatus, PREVIEW_CHARS};
use test_utils::{
    assert_classified, assert_document_failed, assert_document_processed, assert_result_order,
    ClaimTextFixtures, ContentTypeFixtures, DocumentBuilder, FailingEntityRecognizer,
    PanickingRecognizer, SlowRecognizer, StubPage, StubPdfRenderer, TestRegistry,
};

fn pipeline() -> ClaimIntakePipeline {
    ClaimIntakePipeline::from_registry(&TestRegistry::new().build())
}

fn batch(pipeline: ClaimIntakePipeline, max_concurrent: usize, timeout: Duration) -> BatchProcessor {
    BatchProcessor::new(
        Arc::new(pipeline),
        BatchConfig {
            max_concurrent_documents: max_concurrent,
            document_timeout: timeout,
        },
    )
}

mod pipeline_tests {
    use super::*;

    #[test]
    fn test_text_document_is_processed() {
        let before = Utc::now();
        let document = DocumentBuilder::text("health.txt", ClaimTextFixtures::routine_health()).build();

        let result = pipeline().process(&document);

        let classification = assert_document_processed(&result);
        assert_classified(classification, ClaimType::Health, Priority::Medium);
        assert_eq!(result.filename, "health.txt");
        assert_eq!(result.text.as_deref(), Some(ClaimTextFixtures::routine_health()));
        assert_eq!(result.extraction_status, Some(ExtractionStatus::Success));
        assert!(result.timestamp >= before && result.timestamp <= Utc::now());
    }

    #[test]
    fn test_pdf_through_registry_collaborators() {
        let registry = TestRegistry::new()
            .with_pdf_renderer(Arc::new(StubPdfRenderer::new(vec![
                StubPage::text("Cover letter"),
                StubPage::scanned("Kitchen fire, water leak, urgent"),
            ])))
            .build();
        let document = DocumentBuilder::new()
            .with_filename("scan.pdf")
            .with_content_type(ContentTypeFixtures::pdf())
            .with_content(b"%PDF-1.5".to_vec())
            .build();

        let result = ClaimIntakePipeline::from_registry(&registry).process(&document);

        let classification = assert_document_processed(&result);
        assert_classified(classification, ClaimType::Property, Priority::High);
        assert_eq!(
            result.text.as_deref(),
            Some("Cover letter\nKitchen fire, water leak, urgent")
        );
        let analysis = result.analysis.as_ref().unwrap();
        assert_eq!(analysis.risk.risk_score, 7);
        assert_eq!(analysis.risk.risk_level, RiskLevel::High);
    }

    #[test]
    fn test_unsupported_type_is_analysed_as_placeholder() {
        let document = DocumentBuilder::new()
            .with_filename("archive.zip")
            .with_content_type(ContentTypeFixtures::unsupported())
            .with_content(vec![0x50, 0x4b, 0x03, 0x04])
            .build();

        let result = pipeline().process(&document);

        let classification = assert_document_processed(&result);
        assert_eq!(result.text.as_deref(), Some("[Unsupported file type]"));
        assert_eq!(result.extraction_status, Some(ExtractionStatus::Unsupported));
        assert_eq!(classification.claim_type(), ClaimType::Unknown);
    }

    #[test]
    fn test_extraction_error_is_shown_but_not_analysed() {
        let document = DocumentBuilder::new()
            .with_filename("broken.txt")
            .with_content(vec![b'f', b'i', b'r', b'e', 0xff])
            .build();

        let result = pipeline().process(&document);

        let classification = assert_document_processed(&result);
        assert!(result
            .text
            .as_deref()
            .unwrap()
            .starts_with("[Error in TXT extraction] "));
        assert_eq!(result.extraction_status, Some(ExtractionStatus::Error));
        assert_eq!(classification.claim_type(), ClaimType::Unknown);
        assert_eq!(result.analysis.as_ref().unwrap().risk.risk_score, 0);
    }

    #[test]
    fn test_preview_is_truncated() {
        let body = "flood ".repeat(1000);
        let document = DocumentBuilder::text("long.txt", &body).build();

        let result = pipeline().process(&document);

        assert_eq!(result.text.as_ref().unwrap().chars().count(), PREVIEW_CHARS);
        assert_document_processed(&result);
    }

    #[test]
    fn test_recognizer_failure_fails_the_document() {
        let registry = TestRegistry::new()
            .with_entity_recognizer(Arc::new(FailingEntityRecognizer))
            .build();
        let document = DocumentBuilder::text("a.txt", "hospital").build();

        let result = ClaimIntakePipeline::from_registry(&registry).process(&document);

        assert_document_failed(&result, "Entity recognition failed");
        assert!(result.text.is_none());
    }

    #[test]
    fn test_processed_json_shape() {
        let document = DocumentBuilder::text("form.txt", ClaimTextFixtures::full_claim_form()).build();

        let json = serde_json::to_value(pipeline().process(&document)).unwrap();

        assert_eq!(json["filename"], "form.txt");
        assert_eq!(json["status"], "Processed");
        assert_eq!(json["extraction_status"], "success");
        assert_eq!(json["type"], "Health");
        assert_eq!(json["extracted_info"]["Policy Number"], "HLT2024001");
        assert!(json["risk_level"].is_string());
        assert!(json["guideline_compliance"]["details"].is_array());
        assert!(json["timestamp"].is_string());
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_failed_json_shape() {
        let registry = TestRegistry::new()
            .with_entity_recognizer(Arc::new(FailingEntityRecognizer))
            .build();
        let document = DocumentBuilder::text("a.txt", "hospital").build();

        let json = serde_json::to_value(ClaimIntakePipeline::from_registry(&registry).process(&document))
            .unwrap();

        assert_eq!(json["filename"], "a.txt");
        assert_eq!(json["status"], "Failed");
        assert!(json["error"].as_str().unwrap().contains("model not loaded"));
        assert!(json.get("type").is_none());
        assert!(json.get("text").is_none());
    }
}

mod batch_tests {
    use super::*;

    #[tokio::test]
    async fn test_results_in_upload_order() {
        let slow = Arc::new(SlowRecognizer::on("slow", Duration::from_millis(150)));
        let registry = TestRegistry::new().with_entity_recognizer(slow).build();
        let processor = batch(
            ClaimIntakePipeline::from_registry(&registry),
            4,
            Duration::from_secs(10),
        );

        let results = processor
            .process_batch(vec![
                DocumentBuilder::text("first.txt", "slow hospital claim").build(),
                DocumentBuilder::text("second.txt", "car accident").build(),
                DocumentBuilder::text("third.txt", "flight cancelled").build(),
            ])
            .await;

        assert_result_order(&results, &["first.txt", "second.txt", "third.txt"]);
        assert!(results.iter().all(|r| r.status == DocumentStatus::Processed));
    }

    #[tokio::test]
    async fn test_panic_fails_only_that_document() {
        let registry = TestRegistry::new()
            .with_entity_recognizer(Arc::new(PanickingRecognizer::on("boom")))
            .build();
        let processor = batch(
            ClaimIntakePipeline::from_registry(&registry),
            2,
            Duration::from_secs(10),
        );

        let results = processor
            .process_batch(vec![
                DocumentBuilder::text("ok-1.txt", "hospital").build(),
                DocumentBuilder::text("bad.txt", "boom").build(),
                DocumentBuilder::text("ok-2.txt", "house fire").build(),
            ])
            .await;

        assert_result_order(&results, &["ok-1.txt", "bad.txt", "ok-2.txt"]);
        assert_document_processed(&results[0]);
        assert_document_failed(&results[1], "panicked");
        assert_document_processed(&results[2]);
    }

    #[tokio::test]
    async fn test_timeout_fails_only_that_document() {
        let slow = Arc::new(SlowRecognizer::on("stuck", Duration::from_millis(500)));
        let registry = TestRegistry::new().with_entity_recognizer(slow).build();
        let processor = batch(
            ClaimIntakePipeline::from_registry(&registry),
            2,
            Duration::from_millis(100),
        );

        let results = processor
            .process_batch(vec![
                DocumentBuilder::text("stuck.txt", "stuck").build(),
                DocumentBuilder::text("quick.txt", "hospital").build(),
            ])
            .await;

        assert_document_failed(&results[0], "timed out");
        assert_document_processed(&results[1]);
    }

    #[tokio::test]
    async fn test_queued_document_is_bounded_by_its_deadline() {
        let slow = Arc::new(SlowRecognizer::on("stuck", Duration::from_secs(2)));
        let registry = TestRegistry::new().with_entity_recognizer(slow).build();
        let processor = batch(
            ClaimIntakePipeline::from_registry(&registry),
            1,
            Duration::from_millis(150),
        );

        let started = Instant::now();
        let results = processor
            .process_batch(vec![
                DocumentBuilder::text("stuck.txt", "stuck").build(),
                DocumentBuilder::text("quick.txt", "hospital").build(),
            ])
            .await;
        let elapsed = started.elapsed();

        assert!(elapsed < Duration::from_secs(1), "batch took {elapsed:?}");
        assert_result_order(&results, &["stuck.txt", "quick.txt"]);
        assert_document_failed(&results[0], "timed out");
        assert_document_failed(&results[1], "timed out");
    }

    #[tokio::test]
    async fn test_queued_document_runs_once_a_slot_frees() {
        let slow = Arc::new(SlowRecognizer::on("slow", Duration::from_millis(100)));
        let registry = TestRegistry::new().with_entity_recognizer(slow).build();
        let processor = batch(
            ClaimIntakePipeline::from_registry(&registry),
            1,
            Duration::from_secs(5),
        );

        let results = processor
            .process_batch(vec![
                DocumentBuilder::text("slow.txt", "slow hospital visit").build(),
                DocumentBuilder::text("next.txt", "car accident").build(),
            ])
            .await;

        assert_document_processed(&results[0]);
        assert_document_processed(&results[1]);
    }

    #[tokio::test]
    async fn test_concurrency_is_bounded() {
        let slow = Arc::new(SlowRecognizer::always(Duration::from_millis(40)));
        let registry = TestRegistry::new().with_entity_recognizer(slow.clone()).build();
        let processor = batch(
            ClaimIntakePipeline::from_registry(&registry),
            2,
            Duration::from_secs(10),
        );

        let documents = (0..6)
            .map(|i| DocumentBuilder::text(format!("doc-{i}.txt"), "hospital").build())
            .collect();
        let results = processor.process_batch(documents).await;

        assert_eq!(results.len(), 6);
        assert!(results.iter().all(|r| r.is_processed()));
        assert!(slow.max_in_flight() <= 2, "saw {} in flight", slow.max_in_flight());
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let processor = batch(pipeline(), 4, Duration::from_secs(1));
        assert!(processor.process_batch(Vec::new()).await.is_empty());
    }
}
