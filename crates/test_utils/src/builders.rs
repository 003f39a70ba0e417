//! Test Data Builders
//!
//! Produce real document bytes (PDF via lopdf, DOCX via zip, PNG via
//! image) so extraction can be exercised against the default adapters, and
//! uploaded [`Document`]s with sensible defaults.

use std::io::{Cursor, Write};

use image::{DynamicImage, ImageOutputFormat, Rgb, RgbImage};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document as PdfDocument, Object, Stream};

use domain_intake::Document;

use crate::fixtures::{ClaimTextFixtures, ContentTypeFixtures};

enum PdfPageSpec {
    Text(String),
    /// One grayscale image XObject and no text layer
    Image {
        width: u32,
        height: u32,
        bits: i64,
        filter: Option<&'static str>,
        samples: Vec<u8>,
    },
}

/// Builder for multi-page PDFs
#[derive(Default)]
pub struct PdfBuilder {
    pages: Vec<PdfPageSpec>,
}

impl PdfBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a page with a Helvetica text layer
    pub fn text_page(mut self, text: impl Into<String>) -> Self {
        self.pages.push(PdfPageSpec::Text(text.into()));
        self
    }

    /// Adds a scanned-style page: one image XObject, no text
    pub fn image_page(mut self, width: u32, height: u32, shade: u8) -> Self {
        self.pages.push(PdfPageSpec::Image {
            width,
            height,
            bits: 8,
            filter: None,
            samples: vec![shade; (width * height) as usize],
        });
        self
    }

    /// Adds a black-and-white scan: a 1-bit DeviceGray image
    pub fn bilevel_image_page(mut self, width: u32, height: u32) -> Self {
        let row_bytes = width.div_ceil(8) as usize;
        self.pages.push(PdfPageSpec::Image {
            width,
            height,
            bits: 1,
            filter: None,
            samples: vec![0b1010_1010; row_bytes * height as usize],
        });
        self
    }

    /// Adds a scanned page whose only image uses a filter lopdf cannot
    /// decode (JBIG2)
    pub fn jbig2_image_page(mut self, width: u32, height: u32) -> Self {
        self.pages.push(PdfPageSpec::Image {
            width,
            height,
            bits: 1,
            filter: Some("JBIG2Decode"),
            samples: vec![0x97, 0x4a, 0x42, 0x32, 0x0d, 0x0a, 0x1a, 0x0a],
        });
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut doc = PdfDocument::with_version("1.5");
        let pages_id = doc.new_object_id();

        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });

        let mut kids: Vec<Object> = Vec::new();
        for spec in self.pages {
            let (operations, resources) = match spec {
                PdfPageSpec::Text(text) => (
                    vec![
                        Operation::new("BT", vec![]),
                        Operation::new("Tf", vec!["F1".into(), 12.into()]),
                        Operation::new("Td", vec![72.into(), 720.into()]),
                        Operation::new("Tj", vec![Object::string_literal(text)]),
                        Operation::new("ET", vec![]),
                    ],
                    dictionary! {
                        "Font" => dictionary! { "F1" => font_id },
                    },
                ),
                PdfPageSpec::Image {
                    width,
                    height,
                    bits,
                    filter,
                    samples,
                } => {
                    let mut image_dict = dictionary! {
                        "Type" => "XObject",
                        "Subtype" => "Image",
                        "Width" => width as i64,
                        "Height" => height as i64,
                        "ColorSpace" => "DeviceGray",
                        "BitsPerComponent" => bits,
                    };
                    if let Some(filter) = filter {
                        image_dict.set("Filter", Object::Name(filter.as_bytes().to_vec()));
                    }
                    let image_id = doc.add_object(Stream::new(image_dict, samples));
                    (
                        vec![
                            Operation::new("q", vec![]),
                            Operation::new(
                                "cm",
                                vec![
                                    (width as i64).into(),
                                    0.into(),
                                    0.into(),
                                    (height as i64).into(),
                                    0.into(),
                                    0.into(),
                                ],
                            ),
                            Operation::new("Do", vec!["Im1".into()]),
                            Operation::new("Q", vec![]),
                        ],
                        dictionary! {
                            "XObject" => dictionary! { "Im1" => image_id },
                        },
                    )
                }
            };

            let content = Content { operations };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
                "Contents" => content_id,
                "Resources" => resources,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut buf = Vec::new();
        doc.save_to(&mut buf).unwrap();
        buf
    }
}

/// Builder for minimal DOCX files (a zip with `word/document.xml`)
#[derive(Default)]
pub struct DocxBuilder {
    paragraphs: Vec<String>,
}

impl DocxBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn paragraph(mut self, text: impl Into<String>) -> Self {
        self.paragraphs.push(text.into());
        self
    }

    pub fn document_xml(&self) -> String {
        let body: String = self
            .paragraphs
            .iter()
            .map(|p| format!("<w:p><w:r><w:t xml:space=\"preserve\">{}</w:t></w:r></w:p>", escape_xml(p)))
            .collect();

        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
             <w:document xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\">\
             <w:body>{body}</w:body></w:document>"
        )
    }

    pub fn build(self) -> Vec<u8> {
        let xml = self.document_xml();
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options = zip::write::SimpleFileOptions::default();

        writer.start_file("[Content_Types].xml", options).unwrap();
        writer
            .write_all(
                b"<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
                  <Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\"/>",
            )
            .unwrap();

        writer.start_file("word/document.xml", options).unwrap();
        writer.write_all(xml.as_bytes()).unwrap();

        writer.finish().unwrap().into_inner()
    }
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// A solid white PNG of the given size
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([255, 255, 255])));
    let mut png = Cursor::new(Vec::new());
    image.write_to(&mut png, ImageOutputFormat::Png).unwrap();
    png.into_inner()
}

/// Builder for uploaded documents
pub struct DocumentBuilder {
    filename: String,
    content_type: String,
    content: Vec<u8>,
}

impl Default for DocumentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentBuilder {
    /// A plain-text routine health claim
    pub fn new() -> Self {
        Self {
            filename: "claim.txt".to_string(),
            content_type: ContentTypeFixtures::plain_text().to_string(),
            content: ClaimTextFixtures::routine_health().as_bytes().to_vec(),
        }
    }

    /// A plain-text document with the given body
    pub fn text(filename: impl Into<String>, body: &str) -> Self {
        Self::new().with_filename(filename).with_text(body)
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = filename.into();
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    pub fn with_content(mut self, content: Vec<u8>) -> Self {
        self.content = content;
        self
    }

    pub fn with_text(self, body: &str) -> Self {
        self.with_content(body.as_bytes().to_vec())
    }

    pub fn build(self) -> Document {
        Document::new(self.filename, self.content_type, self.content)
    }
}
