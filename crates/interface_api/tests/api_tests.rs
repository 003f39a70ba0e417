//! HTTP tests for the claim intake API

use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use interface_api::{config::ApiConfig, create_router};
use serde_json::{json, Value};
use test_utils::{
    ClaimTextFixtures, ContentTypeFixtures, DocxBuilder, FailingEntityRecognizer, TestRegistry,
};

fn server_with(registry: TestRegistry, config: ApiConfig) -> TestServer {
    TestServer::new(create_router(registry.build(), config)).unwrap()
}

fn server() -> TestServer {
    server_with(TestRegistry::new(), ApiConfig::default())
}

fn file(bytes: impl Into<Vec<u8>>, filename: &str, content_type: &str) -> Part {
    Part::bytes(bytes.into())
        .file_name(filename)
        .mime_type(content_type)
}

mod upload_tests {
    use super::*;

    #[tokio::test]
    async fn test_mixed_upload_in_order() {
        let form = MultipartForm::new()
            .add_part(
                "files",
                file(
                    ClaimTextFixtures::urgent_flood(),
                    "flood.txt",
                    ContentTypeFixtures::plain_text(),
                ),
            )
            .add_part("files", file(b"%PDF-1.5".to_vec(), "report.pdf", ContentTypeFixtures::pdf()))
            .add_part(
                "files",
                file(
                    DocxBuilder::new().paragraph("ignored").build(),
                    "visit.docx",
                    ContentTypeFixtures::docx(),
                ),
            )
            .add_part(
                "files",
                file(vec![0x50, 0x4b], "bundle.zip", ContentTypeFixtures::unsupported()),
            );

        let response = server().post("/upload").multipart(form).await;

        response.assert_status_ok();
        let body: Value = response.json();
        let results = body["results"].as_array().unwrap();
        let filenames: Vec<&str> = results
            .iter()
            .map(|r| r["filename"].as_str().unwrap())
            .collect();
        assert_eq!(filenames, ["flood.txt", "report.pdf", "visit.docx", "bundle.zip"]);

        assert_eq!(results[0]["type"], "Property");
        assert_eq!(results[0]["priority"], "High");
        assert_eq!(results[0]["confidence_score"], 95);
        assert_eq!(results[1]["type"], "Vehicle");
        assert_eq!(results[1]["text"], "Vehicle accident report");
        assert_eq!(results[2]["type"], "Health");
        assert_eq!(results[3]["type"], "Unknown");
        assert_eq!(results[3]["text"], "[Unsupported file type]");
        assert_eq!(results[3]["extraction_status"], "unsupported");
        assert!(results.iter().all(|r| r["status"] == "Processed"));
    }

    #[tokio::test]
    async fn test_versioned_route() {
        let form = MultipartForm::new().add_part(
            "files",
            file(
                ClaimTextFixtures::full_claim_form(),
                "form.txt",
                ContentTypeFixtures::plain_text(),
            ),
        );

        let response = server().post("/api/v1/claims/documents").multipart(form).await;

        response.assert_status_ok();
        let body: Value = response.json();
        let result = &body["results"][0];
        assert_eq!(result["extracted_info"]["Policy Number"], "HLT2024001");
        assert_eq!(result["extracted_info"]["Claim Amount"], "12000.50");
        assert!(result["guideline_compliance"]["overall_status"].is_string());
    }

    #[tokio::test]
    async fn test_no_files_is_rejected() {
        let form = MultipartForm::new().add_text("note", "no attachments");

        let response = server().post("/upload").multipart(form).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["error"], "bad_request");
    }

    #[tokio::test]
    async fn test_document_failure_does_not_fail_upload() {
        let registry = TestRegistry::new().with_entity_recognizer(Arc::new(FailingEntityRecognizer));
        let form = MultipartForm::new().add_part(
            "files",
            file("hospital visit", "a.txt", ContentTypeFixtures::plain_text()),
        );

        let response = server_with(registry, ApiConfig::default())
            .post("/upload")
            .multipart(form)
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["results"][0]["status"], "Failed");
        assert!(body["results"][0]["error"].as_str().unwrap().contains("model not loaded"));
    }

    #[tokio::test]
    async fn test_body_limit() {
        let config = ApiConfig {
            max_upload_bytes: 1024,
            ..ApiConfig::default()
        };
        let form = MultipartForm::new().add_part(
            "files",
            file(vec![b'a'; 8 * 1024], "big.txt", ContentTypeFixtures::plain_text()),
        );

        let response = server_with(TestRegistry::new(), config)
            .post("/upload")
            .multipart(form)
            .await;

        response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
    }
}

mod analysis_tests {
    use super::*;

    #[tokio::test]
    async fn test_analyze_text() {
        let response = server()
            .post("/api/v1/claims/analyze")
            .json(&json!({ "text": "Kitchen fire and a water leak" }))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["type"], "Property");
        assert_eq!(body["risk_score"], 7);
        assert_eq!(body["risk_level"], "High");
        assert!(body.get("filename").is_none());
    }

    #[tokio::test]
    async fn test_analyze_reports_recognizer_failure() {
        let registry = TestRegistry::new().with_entity_recognizer(Arc::new(FailingEntityRecognizer));

        let response = server_with(registry, ApiConfig::default())
            .post("/api/v1/claims/analyze")
            .json(&json!({ "text": "hospital" }))
            .await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = response.json();
        assert_eq!(body["error"], "internal_error");
    }

    #[tokio::test]
    async fn test_guideline_check() {
        let response = server()
            .post("/api/v1/guidelines/check")
            .json(&json!({ "text": ClaimTextFixtures::compliant_inspection() }))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["overall_status"], "Compliant");
        assert_eq!(body["details"].as_array().unwrap().len(), 4);
    }
}

mod health_tests {
    use super::*;

    #[tokio::test]
    async fn test_health() {
        let response = server().get("/health").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_ready_with_healthy_collaborators() {
        let response = server().get("/health/ready").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["total_count"], 4);
    }

    #[tokio::test]
    async fn test_ready_but_degraded() {
        let registry = TestRegistry::new().with_entity_recognizer(Arc::new(FailingEntityRecognizer));

        let response = server_with(registry, ApiConfig::default()).get("/health/ready").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["status"], "degraded");
        assert_eq!(body["healthy_count"], 3);
        assert_eq!(body["collaborators"]["entity_recognizer"]["status"], "unhealthy");
    }
}
