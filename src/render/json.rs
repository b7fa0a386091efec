//! JSON rendering for paper documents.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::model::{Extraction, PaperDocument};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a document to a JSON object, keys in document order.
pub fn to_json(doc: &PaperDocument, format: JsonFormat) -> Result<String> {
    serialize(doc, format)
}

/// Convert a full extraction (document, fallbacks and statistics) to JSON.
pub fn to_json_report(extraction: &Extraction, format: JsonFormat) -> Result<String> {
    serialize(extraction, format)
}

fn serialize<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}
