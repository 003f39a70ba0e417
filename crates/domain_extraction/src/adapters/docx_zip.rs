//! DOCX text puller reading `word/document.xml` out of the zip container

use std::fs::File;
use std::io::Read;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use core_kernel::{DocxReader, DomainPort, HealthCheckable, PortError};

const DOCUMENT_PART: &str = "word/document.xml";

static PARAGRAPH_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"</w:p>").unwrap());
static LINE_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"<w:(br|cr)\b[^>]*/>").unwrap());
static TAB: Lazy<Regex> = Lazy::new(|| Regex::new(r"<w:tab\b[^>]*/>").unwrap());
static ANY_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());
static ENTITY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&(#[xX][0-9a-fA-F]+|#[0-9]+|amp|lt|gt|quot|apos);").unwrap());

/// Reads the main document part of a DOCX file and flattens it to text,
/// one line per paragraph.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipDocxReader;

impl DocxReader for ZipDocxReader {
    fn read_text(&self, path: &Path) -> Result<String, PortError> {
        let file = File::open(path)?;
        let mut archive = zip::ZipArchive::new(file)
            .map_err(|e| PortError::invalid_input(format!("Not a DOCX archive: {e}")))?;

        let mut xml = String::new();
        archive
            .by_name(DOCUMENT_PART)
            .map_err(|e| PortError::invalid_input(format!("Missing {DOCUMENT_PART}: {e}")))?
            .read_to_string(&mut xml)?;

        Ok(document_xml_to_text(&xml))
    }
}

impl HealthCheckable for ZipDocxReader {
    fn adapter_id(&self) -> &str {
        "zip-docx"
    }
}

impl DomainPort for ZipDocxReader {}

/// Converts WordprocessingML body markup into plain text
pub fn document_xml_to_text(xml: &str) -> String {
    let text = PARAGRAPH_END.replace_all(xml, "\n");
    let text = LINE_BREAK.replace_all(&text, "\n");
    let text = TAB.replace_all(&text, "\t");
    let text = ANY_TAG.replace_all(&text, "");
    unescape_xml(&text)
}

/// Decodes the predefined entities and numeric character references in one
/// pass, so `&amp;lt;` stays `&lt;`. References to invalid code points are
/// left as written.
fn unescape_xml(text: &str) -> String {
    ENTITY
        .replace_all(text, |caps: &Captures| {
            let name = &caps[1];
            let decoded = match name {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                _ => decode_char_ref(name),
            };
            decoded.map_or_else(|| caps[0].to_string(), String::from)
        })
        .into_owned()
}

fn decode_char_ref(reference: &str) -> Option<char> {
    let digits = reference.strip_prefix('#')?;
    let code = match digits.strip_prefix(['x', 'X']) {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => digits.parse().ok()?,
    };
    char::from_u32(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paragraphs_become_lines() {
        let xml = r#"<w:document><w:body><w:p><w:r><w:t>Name: Asha Rao</w:t></w:r></w:p><w:p><w:r><w:t xml:space="preserve">Policy Number: </w:t></w:r><w:r><w:t>PN778</w:t></w:r></w:p></w:body></w:document>"#;
        assert_eq!(document_xml_to_text(xml), "Name: Asha Rao\nPolicy Number: PN778\n");
    }

    #[test]
    fn entities_are_unescaped() {
        let xml = "<w:p><w:r><w:t>Fire &amp; smoke &lt;urgent&gt;</w:t></w:r></w:p>";
        assert_eq!(document_xml_to_text(xml), "Fire & smoke <urgent>\n");
    }

    #[test]
    fn character_references_are_decoded() {
        let xml = "<w:p><w:r><w:t>Owner&#8217;s claim &#x2014; A&#X26;E</w:t></w:r></w:p>";
        assert_eq!(document_xml_to_text(xml), "Owner\u{2019}s claim \u{2014} A&E\n");
    }

    #[test]
    fn escaped_entities_are_decoded_once() {
        assert_eq!(unescape_xml("&amp;lt;b&amp;gt; &amp;#38;"), "&lt;b&gt; &#38;");
    }

    #[test]
    fn invalid_code_points_are_left_as_written() {
        assert_eq!(unescape_xml("bad &#xD800; ref &#99999999999;"), "bad &#xD800; ref &#99999999999;");
    }

    #[test]
    fn tabs_and_breaks_are_kept() {
        let xml = "<w:p><w:r><w:t>A</w:t><w:tab/><w:t>B</w:t><w:br/><w:t>C</w:t></w:r></w:p>";
        assert_eq!(document_xml_to_text(xml), "A\tB\nC\n");
    }
}
