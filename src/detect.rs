//! Input format detection for character dumps.

use crate::error::{Error, Result};

/// Layout of a character dump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// A JSON array of character objects
    JsonArray,
    /// One character object per line
    JsonLines,
    /// `{"pages": [[...], [...]]}`, one array of characters per page
    PagedJson,
}

impl std::fmt::Display for InputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            InputFormat::JsonArray => "JSON array",
            InputFormat::JsonLines => "JSON Lines",
            InputFormat::PagedJson => "paged JSON",
        };
        f.write_str(name)
    }
}

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";
const PDF_MAGIC_LEN: usize = 5;
const VERSION_LEN: usize = 3; // e.g., "1.7"

/// UTF-8 byte order mark, written by some Windows tools.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Detect the layout of a character dump.
///
/// # Returns
/// * `Ok(InputFormat)` for a recognized dump
/// * `Err(Error::PdfInput)` if the data is a raw PDF
/// * `Err(Error::UnknownFormat)` otherwise
pub fn detect_format_from_bytes(data: &[u8]) -> Result<InputFormat> {
    if let Some(version) = pdf_version(data) {
        return Err(Error::PdfInput(version));
    }

    let data = data.strip_prefix(UTF8_BOM).unwrap_or(data);
    let start = data
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .ok_or(Error::UnknownFormat)?;
    let data = &data[start..];

    match data[0] {
        b'[' => Ok(InputFormat::JsonArray),
        b'{' => {
            // A first line that is a whole object without "pages" is JSON Lines
            let first_line = data.split(|&b| b == b'\n').next().unwrap_or(data);
            match serde_json::from_slice::<serde_json::Value>(first_line) {
                Ok(serde_json::Value::Object(map)) if !map.contains_key("pages") => {
                    Ok(InputFormat::JsonLines)
                }
                _ => Ok(InputFormat::PagedJson),
            }
        }
        _ => Err(Error::UnknownFormat),
    }
}

/// PDF version from the header, if the data is a PDF.
fn pdf_version(data: &[u8]) -> Option<String> {
    if data.len() < PDF_MAGIC_LEN + VERSION_LEN || !data.starts_with(PDF_MAGIC) {
        return None;
    }
    let version_bytes = &data[PDF_MAGIC_LEN..PDF_MAGIC_LEN + VERSION_LEN];
    Some(String::from_utf8_lossy(version_bytes).to_string())
}

/// Check if bytes look like a raw PDF file.
pub fn is_pdf_bytes(data: &[u8]) -> bool {
    pdf_version(data).is_some()
}
