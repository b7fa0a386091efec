//! Error types for paperparse.
//!
//! The structure engine itself never fails: degraded inputs are reported as
//! [`Fallback`](crate::model::Fallback) values inside an
//! [`Extraction`](crate::model::Extraction). The errors below belong to the
//! layers around it, reading character dumps and writing exports.

use std::io;
use thiserror::Error;

/// Result type alias for paperparse operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while loading character streams or exporting results.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The character dump is not valid JSON for the detected layout.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The input is not a recognized character dump.
    #[error("Unknown input format: expected a JSON character dump")]
    UnknownFormat,

    /// A raw PDF was supplied where a character dump was expected.
    #[error("Input is a PDF {0} file; extract its characters first and pass the JSON dump")]
    PdfInput(String),

    /// A character carries a non-finite coordinate or font size.
    #[error("Invalid character #{index} on page {page}: {reason}")]
    InvalidCharacter {
        /// Position of the character in the input stream
        index: usize,
        /// Page the character belongs to
        page: u32,
        /// What is wrong with it
        reason: String,
    },

    /// Error writing tabular output.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Error writing an xlsx workbook.
    #[error("Workbook error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// Error during rendering (table, JSON, Markdown).
    #[error("Rendering error: {0}")]
    Render(String),
}
