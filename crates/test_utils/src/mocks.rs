//! Mock Collaborators
//!
//! Scriptable stand-ins for the OCR engine, PDF renderer, DOCX reader and
//! entity recognizer, plus [`TestRegistry`] to wire them into a
//! [`CollaboratorRegistry`].

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use core_kernel::{
    CollaboratorRegistry, DocxReader, DomainPort, Entity, EntityRecognizer, HealthCheckResult,
    HealthCheckable, OcrEngine, PdfDocument, PdfRenderer, PortError,
};
use domain_claims::PatternEntityRecognizer;

macro_rules! mock_port {
    ($name:ty, $id:literal) => {
        impl HealthCheckable for $name {
            fn adapter_id(&self) -> &str {
                $id
            }
        }

        impl DomainPort for $name {}
    };
}

/// OCR engine that returns the same text for every image
#[derive(Debug, Default)]
pub struct StaticOcr {
    text: String,
    calls: AtomicUsize,
}

impl StaticOcr {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of images recognized so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl OcrEngine for StaticOcr {
    fn recognize(&self, _image: &[u8]) -> Result<String, PortError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.text.clone())
    }
}

mock_port!(StaticOcr, "static-ocr");

/// OCR engine that "reads" the image bytes as UTF-8, so a stub page
/// rendered as `b"scanned page 2"` OCRs to `"scanned page 2"`
#[derive(Debug, Default, Clone, Copy)]
pub struct EchoOcr;

impl OcrEngine for EchoOcr {
    fn recognize(&self, image: &[u8]) -> Result<String, PortError> {
        Ok(String::from_utf8_lossy(image).into_owned())
    }
}

mock_port!(EchoOcr, "echo-ocr");

/// OCR engine that always fails
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingOcr;

impl OcrEngine for FailingOcr {
    fn recognize(&self, _image: &[u8]) -> Result<String, PortError> {
        Err(PortError::unavailable("tesseract"))
    }
}

mock_port!(FailingOcr, "failing-ocr");

/// One page of a [`StubPdfRenderer`] document
#[derive(Debug, Clone)]
pub struct StubPage {
    /// Text layer; blank for a scanned page
    pub text: String,
    /// Bytes handed to OCR when the text layer is blank
    pub raster: Vec<u8>,
}

impl StubPage {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            raster: Vec::new(),
        }
    }

    /// A page with no text layer whose raster echoes `ocr_text`
    pub fn scanned(ocr_text: impl Into<String>) -> Self {
        Self {
            text: String::new(),
            raster: ocr_text.into().into_bytes(),
        }
    }
}

/// PDF renderer that ignores the input bytes and serves fixed pages
#[derive(Debug, Clone, Default)]
pub struct StubPdfRenderer {
    pages: Vec<StubPage>,
}

impl StubPdfRenderer {
    pub fn new(pages: Vec<StubPage>) -> Self {
        Self { pages }
    }
}

impl PdfRenderer for StubPdfRenderer {
    fn open(&self, _pdf_bytes: &[u8]) -> Result<Box<dyn PdfDocument>, PortError> {
        Ok(Box::new(StubPdfDocument {
            pages: self.pages.clone(),
        }))
    }
}

mock_port!(StubPdfRenderer, "stub-pdf");

struct StubPdfDocument {
    pages: Vec<StubPage>,
}

impl StubPdfDocument {
    fn page(&self, index: usize) -> Result<&StubPage, PortError> {
        self.pages
            .get(index)
            .ok_or_else(|| PortError::invalid_input(format!("no page {index}")))
    }
}

impl PdfDocument for StubPdfDocument {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_text(&self, index: usize) -> Result<String, PortError> {
        Ok(self.page(index)?.text.clone())
    }

    fn rasterize_page(&self, index: usize) -> Result<Vec<u8>, PortError> {
        Ok(self.page(index)?.raster.clone())
    }
}

/// PDF renderer that rejects every document
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingPdfRenderer;

impl PdfRenderer for FailingPdfRenderer {
    fn open(&self, _pdf_bytes: &[u8]) -> Result<Box<dyn PdfDocument>, PortError> {
        Err(PortError::invalid_input("Failed to parse PDF: corrupt xref table"))
    }
}

mock_port!(FailingPdfRenderer, "failing-pdf");

/// What a [`RecordingDocxReader`] saw on one call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocxCall {
    pub path: PathBuf,
    /// Whether the file existed when the reader was invoked
    pub existed: bool,
    pub bytes: usize,
}

/// DOCX reader that records the temp file it was handed and then either
/// returns fixed text or fails
#[derive(Debug, Default)]
pub struct RecordingDocxReader {
    outcome: Option<String>,
    calls: Mutex<Vec<DocxCall>>,
}

impl RecordingDocxReader {
    pub fn returning(text: impl Into<String>) -> Self {
        Self {
            outcome: Some(text.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            outcome: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<DocxCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl DocxReader for RecordingDocxReader {
    fn read_text(&self, path: &Path) -> Result<String, PortError> {
        let bytes = std::fs::metadata(path).map(|m| m.len() as usize).ok();
        self.calls.lock().unwrap().push(DocxCall {
            path: path.to_path_buf(),
            existed: bytes.is_some(),
            bytes: bytes.unwrap_or(0),
        });

        self.outcome
            .clone()
            .ok_or_else(|| PortError::processing("DOCX parsing", "document.xml is malformed"))
    }
}

mock_port!(RecordingDocxReader, "recording-docx");

/// Recognizer returning a fixed entity list
#[derive(Debug, Clone, Default)]
pub struct StaticEntityRecognizer {
    entities: Vec<Entity>,
}

impl StaticEntityRecognizer {
    pub fn new(entities: Vec<Entity>) -> Self {
        Self { entities }
    }
}

impl EntityRecognizer for StaticEntityRecognizer {
    fn recognize(&self, _text: &str) -> Result<Vec<Entity>, PortError> {
        Ok(self.entities.clone())
    }
}

mock_port!(StaticEntityRecognizer, "static-ner");

/// Recognizer that always fails
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingEntityRecognizer;

impl EntityRecognizer for FailingEntityRecognizer {
    fn recognize(&self, _text: &str) -> Result<Vec<Entity>, PortError> {
        Err(PortError::processing("NER", "model not loaded"))
    }
}

#[async_trait::async_trait]
impl HealthCheckable for FailingEntityRecognizer {
    fn adapter_id(&self) -> &str {
        "failing-ner"
    }

    async fn health_check(&self) -> HealthCheckResult {
        HealthCheckResult::unhealthy(self.adapter_id(), "model not loaded")
    }
}

impl DomainPort for FailingEntityRecognizer {}

/// Recognizer that panics when the text contains `trigger`
#[derive(Debug, Clone)]
pub struct PanickingRecognizer {
    trigger: String,
}

impl PanickingRecognizer {
    pub fn on(trigger: impl Into<String>) -> Self {
        Self {
            trigger: trigger.into(),
        }
    }
}

impl EntityRecognizer for PanickingRecognizer {
    fn recognize(&self, text: &str) -> Result<Vec<Entity>, PortError> {
        if text.contains(&self.trigger) {
            panic!("recognizer crashed on '{}'", self.trigger);
        }
        Ok(Vec::new())
    }
}

mock_port!(PanickingRecognizer, "panicking-ner");

/// Recognizer that blocks for `delay` when the text contains `trigger`,
/// and tracks how many calls overlap
#[derive(Debug)]
pub struct SlowRecognizer {
    trigger: String,
    delay: Duration,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl SlowRecognizer {
    pub fn on(trigger: impl Into<String>, delay: Duration) -> Self {
        Self {
            trigger: trigger.into(),
            delay,
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    /// Every call is slow
    pub fn always(delay: Duration) -> Self {
        Self::on("", delay)
    }

    /// Highest number of calls observed running at once
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

impl EntityRecognizer for SlowRecognizer {
    fn recognize(&self, text: &str) -> Result<Vec<Entity>, PortError> {
        let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(running, Ordering::SeqCst);

        if text.contains(&self.trigger) {
            std::thread::sleep(self.delay);
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        Ok(Vec::new())
    }
}

mock_port!(SlowRecognizer, "slow-ner");

/// Builds a [`CollaboratorRegistry`] from mocks, defaulting every slot
pub struct TestRegistry {
    ocr: Arc<dyn OcrEngine>,
    pdf_renderer: Arc<dyn PdfRenderer>,
    docx_reader: Arc<dyn DocxReader>,
    entity_recognizer: Arc<dyn EntityRecognizer>,
}

impl Default for TestRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TestRegistry {
    /// Echo OCR, a one-page text PDF, a DOCX reader returning a health
    /// claim, and the pattern recognizer
    pub fn new() -> Self {
        Self {
            ocr: Arc::new(EchoOcr),
            pdf_renderer: Arc::new(StubPdfRenderer::new(vec![StubPage::text(
                "Vehicle accident report",
            )])),
            docx_reader: Arc::new(RecordingDocxReader::returning(
                "Doctor visit for treatment of illness",
            )),
            entity_recognizer: Arc::new(PatternEntityRecognizer::new()),
        }
    }

    pub fn with_ocr(mut self, ocr: Arc<dyn OcrEngine>) -> Self {
        self.ocr = ocr;
        self
    }

    pub fn with_pdf_renderer(mut self, renderer: Arc<dyn PdfRenderer>) -> Self {
        self.pdf_renderer = renderer;
        self
    }

    pub fn with_docx_reader(mut self, reader: Arc<dyn DocxReader>) -> Self {
        self.docx_reader = reader;
        self
    }

    pub fn with_entity_recognizer(mut self, recognizer: Arc<dyn EntityRecognizer>) -> Self {
        self.entity_recognizer = recognizer;
        self
    }

    pub fn build(self) -> CollaboratorRegistry {
        CollaboratorRegistry::builder()
            .ocr(self.ocr)
            .pdf_renderer(self.pdf_renderer)
            .docx_reader(self.docx_reader)
            .entity_recognizer(self.entity_recognizer)
            .build()
            .unwrap()
    }
}
