//! Plain text extraction

use crate::error::ExtractionError;

/// Decodes the bytes as UTF-8 and trims surrounding whitespace.
pub fn extract_plain_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    Ok(std::str::from_utf8(bytes)?.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_valid_utf8() {
        let text = extract_plain_text("  Claim Amount: ₹12,000.50 \n".as_bytes()).unwrap();
        assert_eq!(text, "Claim Amount: ₹12,000.50");
    }

    #[test]
    fn rejects_invalid_utf8() {
        let error = extract_plain_text(&[0x66, 0x69, 0xff, 0xfe]).unwrap_err();
        assert!(matches!(error, ExtractionError::Encoding(_)));
    }
}
