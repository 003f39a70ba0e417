//! PDF page access using lopdf
//!
//! Text comes from each page's content stream. Rasterization pulls the
//! largest embedded image XObject off the page, which is the page itself for
//! scanned documents, and re-encodes it as PNG for OCR.

use std::io::Cursor;

use image::{DynamicImage, GrayImage, ImageOutputFormat, RgbImage, Rgba, RgbaImage};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

use core_kernel::{DomainPort, HealthCheckable, PdfDocument, PdfRenderer, PortError};

/// Side length of the canvas produced for a page with neither text nor images
const BLANK_PAGE_SIZE: u32 = 16;

#[derive(Debug, Clone, Copy, Default)]
pub struct LopdfRenderer;

impl PdfRenderer for LopdfRenderer {
    fn open(&self, pdf_bytes: &[u8]) -> Result<Box<dyn PdfDocument>, PortError> {
        let document = Document::load_mem(pdf_bytes)
            .map_err(|e| PortError::invalid_input(format!("Failed to parse PDF: {e}")))?;

        // get_pages is keyed by 1-based page number, so iteration is page order
        let pages: Vec<(u32, ObjectId)> = document.get_pages().into_iter().collect();

        Ok(Box::new(LopdfDocument { document, pages }))
    }
}

impl HealthCheckable for LopdfRenderer {
    fn adapter_id(&self) -> &str {
        "lopdf"
    }
}

impl DomainPort for LopdfRenderer {}

struct LopdfDocument {
    document: Document,
    pages: Vec<(u32, ObjectId)>,
}

impl LopdfDocument {
    fn page(&self, index: usize) -> Result<(u32, ObjectId), PortError> {
        self.pages.get(index).copied().ok_or_else(|| {
            PortError::invalid_input(format!(
                "Page {} not found (PDF has {} pages)",
                index + 1,
                self.pages.len()
            ))
        })
    }
}

impl PdfDocument for LopdfDocument {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_text(&self, index: usize) -> Result<String, PortError> {
        let (number, _) = self.page(index)?;
        self.document
            .extract_text(&[number])
            .map_err(|e| PortError::processing("PDF text extraction", e))
    }

    fn rasterize_page(&self, index: usize) -> Result<Vec<u8>, PortError> {
        let (number, page_id) = self.page(index)?;

        let image = match largest_page_image(&self.document, page_id)? {
            PageImage::Decoded(image) => image,
            PageImage::Undecodable(count) => {
                return Err(PortError::processing(
                    "PDF rasterization",
                    format!("page {number} has {count} image(s), none in a supported encoding"),
                ));
            }
            PageImage::Absent => {
                tracing::debug!(page = number, "Page has no text layer and no image, rendering blank");
                DynamicImage::ImageLuma8(GrayImage::from_pixel(
                    BLANK_PAGE_SIZE,
                    BLANK_PAGE_SIZE,
                    image::Luma([255]),
                ))
            }
        };

        encode_png(&image)
    }
}

fn encode_png(image: &DynamicImage) -> Result<Vec<u8>, PortError> {
    let mut png = Cursor::new(Vec::new());
    image
        .write_to(&mut png, ImageOutputFormat::Png)
        .map_err(|e| PortError::processing("PNG encoding", e))?;
    Ok(png.into_inner())
}

/// What a page offers for OCR
enum PageImage {
    Decoded(DynamicImage),
    /// The page has image XObjects (this many) but none could be decoded
    Undecodable(usize),
    Absent,
}

/// Finds the largest decodable image XObject on a page.
///
/// Walks: page dict → /Resources → /XObject → entries with /Subtype /Image.
fn largest_page_image(document: &Document, page_id: ObjectId) -> Result<PageImage, PortError> {
    let page = document
        .get_object(page_id)
        .and_then(Object::as_dict)
        .map_err(|e| PortError::processing("PDF page lookup", e))?;

    let Some(resources) = resolve_dict(document, page, b"Resources") else {
        return Ok(PageImage::Absent);
    };
    let Some(xobjects) = resolve_dict(document, resources, b"XObject") else {
        return Ok(PageImage::Absent);
    };

    let mut images = 0;
    let mut largest: Option<(u64, DynamicImage)> = None;
    for (_name, entry) in xobjects.iter() {
        let Object::Stream(stream) = resolve(document, entry) else {
            continue;
        };
        if !is_image(stream) {
            continue;
        }
        images += 1;
        let Some(image) = decode_image_stream(stream) else {
            tracing::debug!(filter = ?stream.dict.get(b"Filter").ok(), "Skipping undecodable image XObject");
            continue;
        };

        let area = u64::from(image.width()) * u64::from(image.height());
        if largest.as_ref().map_or(true, |(best, _)| area > *best) {
            largest = Some((area, image));
        }
    }

    Ok(match largest {
        Some((_, image)) => PageImage::Decoded(image),
        None if images > 0 => PageImage::Undecodable(images),
        None => PageImage::Absent,
    })
}

fn resolve<'a>(document: &'a Document, object: &'a Object) -> &'a Object {
    match object {
        Object::Reference(id) => document.get_object(*id).unwrap_or(object),
        other => other,
    }
}

fn resolve_dict<'a>(
    document: &'a Document,
    dict: &'a Dictionary,
    key: &[u8],
) -> Option<&'a Dictionary> {
    let entry = dict.get(key).ok()?;
    resolve(document, entry).as_dict().ok()
}

fn is_image(stream: &Stream) -> bool {
    matches!(stream.dict.get(b"Subtype"), Ok(Object::Name(name)) if name == b"Image")
}

fn has_filter(stream: &Stream, filter: &[u8]) -> bool {
    match stream.dict.get(b"Filter") {
        Ok(Object::Name(name)) => name == filter,
        Ok(Object::Array(filters)) => filters
            .iter()
            .any(|f| matches!(f, Object::Name(name) if name == filter)),
        _ => false,
    }
}

/// Decodes an image XObject: JPEG streams directly, raw samples by
/// reconstructing from /Width, /Height and the colour space.
///
/// Streams whose filter lopdf cannot undo (CCITT, JBIG2, JPX) yield `None`.
fn decode_image_stream(stream: &Stream) -> Option<DynamicImage> {
    if has_filter(stream, b"DCTDecode") {
        return image::load_from_memory(&stream.content).ok();
    }

    let samples = if stream.dict.get(b"Filter").is_ok() {
        stream.decompressed_content().ok()?
    } else {
        stream.content.clone()
    };

    if let Ok(image) = image::load_from_memory(&samples) {
        return Some(image);
    }

    let width = dict_u32(&stream.dict, b"Width")?;
    let height = dict_u32(&stream.dict, b"Height")?;
    let bits = dict_u32(&stream.dict, b"BitsPerComponent").unwrap_or(8);
    let channels = channel_count(&stream.dict);

    if bits != 8 {
        // Packed gray (bilevel scans and the like) is widened to 8 bits
        if channels != 1 {
            return None;
        }
        let gray = expand_packed_gray(&samples, width, height, bits)?;
        return GrayImage::from_raw(width, height, gray).map(DynamicImage::ImageLuma8);
    }

    match channels {
        1 => GrayImage::from_raw(width, height, samples).map(DynamicImage::ImageLuma8),
        3 => RgbImage::from_raw(width, height, samples).map(DynamicImage::ImageRgb8),
        4 => RgbaImage::from_raw(width, height, samples)
            .map(|cmyk| DynamicImage::ImageRgba8(cmyk_to_rgba(cmyk))),
        _ => None,
    }
}

/// Unpacks 1, 2 or 4 bit gray samples into one byte per pixel.
///
/// Rows start on a byte boundary; sample value 0 is black.
fn expand_packed_gray(packed: &[u8], width: u32, height: u32, bits: u32) -> Option<Vec<u8>> {
    if !matches!(bits, 1 | 2 | 4) {
        return None;
    }
    let width = width as usize;
    let row_bytes = (width * bits as usize).div_ceil(8);
    if packed.len() < row_bytes * height as usize {
        return None;
    }

    let max = (1u16 << bits) - 1;
    let per_byte = 8 / bits as usize;
    let mut gray = Vec::with_capacity(width * height as usize);
    for row in packed.chunks_exact(row_bytes).take(height as usize) {
        for x in 0..width {
            let byte = row[x / per_byte];
            let shift = 8 - bits as usize * (x % per_byte + 1);
            let value = u16::from(byte >> shift) & max;
            gray.push((value * 255 / max) as u8);
        }
    }
    Some(gray)
}

fn dict_u32(dict: &Dictionary, key: &[u8]) -> Option<u32> {
    match dict.get(key) {
        Ok(Object::Integer(value)) => u32::try_from(*value).ok(),
        _ => None,
    }
}

fn channel_count(dict: &Dictionary) -> u32 {
    match dict.get(b"ColorSpace") {
        Ok(Object::Name(name)) => match name.as_slice() {
            b"DeviceGray" => 1,
            b"DeviceCMYK" => 4,
            _ => 3,
        },
        _ => 3,
    }
}

fn cmyk_to_rgba(mut pixels: RgbaImage) -> RgbaImage {
    for pixel in pixels.pixels_mut() {
        let [c, m, y, k] = pixel.0;
        let white = 255 - u16::from(k);
        let channel = |v: u8| ((255 - u16::from(v)) * white / 255) as u8;
        *pixel = Rgba([channel(c), channel(m), channel(y), 255]);
    }
    pixels
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bilevel_rows_are_padded_to_whole_bytes() {
        // 10 pixels per row: two bytes, the last six bits of each row unused
        let packed = [0b1010_1010, 0b1100_0000, 0b0000_0000, 0b0100_0000];
        let gray = expand_packed_gray(&packed, 10, 2, 1).unwrap();

        assert_eq!(
            gray,
            [
                255, 0, 255, 0, 255, 0, 255, 0, 255, 255, //
                0, 0, 0, 0, 0, 0, 0, 0, 0, 255,
            ]
        );
    }

    #[test]
    fn four_bit_gray_is_scaled() {
        let gray = expand_packed_gray(&[0x0f, 0x80], 4, 1, 4).unwrap();
        assert_eq!(gray, [0, 255, 136, 0]);
    }

    #[test]
    fn short_sample_data_is_rejected() {
        assert!(expand_packed_gray(&[0xff], 16, 2, 1).is_none());
        assert!(expand_packed_gray(&[0xff; 8], 4, 1, 3).is_none());
    }
}
