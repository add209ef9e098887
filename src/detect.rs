//! PDF format detection and validation.

use crate::error::{Error, Result};

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";
const PDF_MAGIC_LEN: usize = 5;
const VERSION_LEN: usize = 3; // e.g., "1.7"

/// Check that a byte stream starts with a valid PDF header and return
/// the declared version string (e.g., "1.7").
///
/// # Returns
/// * `Ok(version)` if the data starts with a valid PDF header
/// * `Err(Error::UnreadablePdf)` otherwise
pub fn detect_version(data: &[u8]) -> Result<String> {
    if data.len() < PDF_MAGIC_LEN + VERSION_LEN {
        return Err(Error::UnreadablePdf("truncated header".to_string()));
    }

    if !data.starts_with(PDF_MAGIC) {
        return Err(Error::UnreadablePdf("missing %PDF- magic".to_string()));
    }

    let version_bytes = &data[PDF_MAGIC_LEN..PDF_MAGIC_LEN + VERSION_LEN];
    let version = String::from_utf8_lossy(version_bytes).to_string();

    if !is_valid_version(&version) {
        return Err(Error::UnreadablePdf(format!(
            "malformed version '{}'",
            version
        )));
    }

    Ok(version)
}

/// Check if a version string is valid (like "1.0" to "2.0").
fn is_valid_version(version: &str) -> bool {
    if version.len() != 3 {
        return false;
    }

    let chars: Vec<char> = version.chars().collect();
    chars[0].is_ascii_digit() && chars[1] == '.' && chars[2].is_ascii_digit()
}

/// Check if bytes represent a valid PDF header.
pub fn is_pdf_bytes(data: &[u8]) -> bool {
    detect_version(data).is_ok()
}
