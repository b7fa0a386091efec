//! # paperparse
//!
//! Structure inference for academic papers.
//!
//! Given the positioned characters of a PDF (text, position, font size and
//! font name per glyph, as dumped by tools like pdfplumber), this library
//! recovers the paper's title, author block and sections into one ordered
//! mapping, and exports it as a single-row table, JSON or Markdown.
//!
//! ## Quick Start
//!
//! ```no_run
//! use paperparse::{extract_file, render};
//!
//! fn main() -> paperparse::Result<()> {
//!     let extraction = extract_file("paper.chars.json")?;
//!
//!     for fallback in &extraction.fallbacks {
//!         eprintln!("degraded: {}", fallback);
//!     }
//!
//!     let csv = render::to_table(&extraction.document, render::TableFormat::Csv)?;
//!     println!("{}", csv);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! - **Lines**: characters grouped by page and baseline, with max font size
//!   and a bold flag per line
//! - **Title**: every line within 95% of the largest font size
//! - **Authors**: lines between the title and the abstract, cleaned of
//!   affiliation markers and publication metadata
//! - **Sections**: fixed heading vocabulary plus bold-line headings, with
//!   body lines filtered by font size
//!
//! Extraction never fails once characters are loaded. Degraded inputs are
//! reported as [`Fallback`] values in the [`Extraction`].

pub mod detect;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;
pub mod source;

// Re-export commonly used types
pub use detect::{detect_format_from_bytes, InputFormat};
pub use error::{Error, Result};
pub use model::{
    Character, Extraction, ExtractionStats, Fallback, HeadingKind, Line, PaperDocument, Section,
    StandardHeading, AUTHORS_KEY, TITLE_KEY,
};
pub use parser::{ExtractOptions, PaperParser};
pub use render::{JsonFormat, RenderOptions, TableFormat, TableLayout};
pub use source::{CharacterSource, JsonDump};

use std::io::Read;
use std::path::Path;

/// Infer structure from in-memory characters.
///
/// # Example
///
/// ```
/// use paperparse::{extract_characters, Character, ExtractOptions};
///
/// let chars: Vec<Character> = "Title"
///     .chars()
///     .enumerate()
///     .map(|(i, c)| Character::new(c, 1, 50.0, i as f64 * 10.0, 20.0, "Helvetica-Bold"))
///     .collect();
///
/// let extraction = extract_characters(&chars, &ExtractOptions::default());
/// assert_eq!(extraction.document.title(), Some("Title"));
/// ```
pub fn extract_characters(chars: &[Character], options: &ExtractOptions) -> Extraction {
    parser::extract_structure(chars, options)
}

/// Extract the structure of a paper from a character dump file.
///
/// # Arguments
///
/// * `path` - Path to a JSON, JSON Lines or paged JSON character dump
///
/// # Example
///
/// ```no_run
/// use paperparse::extract_file;
///
/// let extraction = extract_file("paper.chars.json").unwrap();
/// println!("{:?}", extraction.document.title());
/// ```
pub fn extract_file<P: AsRef<Path>>(path: P) -> Result<Extraction> {
    let parser = PaperParser::open(path)?;
    Ok(parser.parse())
}

/// Extract from a character dump file with custom options.
///
/// # Example
///
/// ```no_run
/// use paperparse::{extract_file_with_options, ExtractOptions};
///
/// let options = ExtractOptions::new().with_title_size_ratio(0.9);
/// let extraction = extract_file_with_options("paper.chars.json", options).unwrap();
/// ```
pub fn extract_file_with_options<P: AsRef<Path>>(
    path: P,
    options: ExtractOptions,
) -> Result<Extraction> {
    let parser = PaperParser::open_with_options(path, options)?;
    Ok(parser.parse())
}

/// Extract from character dump bytes.
pub fn extract_bytes(data: &[u8]) -> Result<Extraction> {
    let parser = PaperParser::from_bytes(data)?;
    Ok(parser.parse())
}

/// Extract from character dump bytes with custom options.
pub fn extract_bytes_with_options(data: &[u8], options: ExtractOptions) -> Result<Extraction> {
    let parser = PaperParser::from_bytes_with_options(data, options)?;
    Ok(parser.parse())
}

/// Extract from a reader yielding a character dump.
///
/// # Example
///
/// ```no_run
/// use paperparse::extract_reader;
/// use std::fs::File;
///
/// let file = File::open("paper.chars.json").unwrap();
/// let extraction = extract_reader(file).unwrap();
/// ```
pub fn extract_reader<R: Read>(reader: R) -> Result<Extraction> {
    let parser = PaperParser::from_reader(reader)?;
    Ok(parser.parse())
}

/// Extract from a reader with custom options.
pub fn extract_reader_with_options<R: Read>(
    reader: R,
    options: ExtractOptions,
) -> Result<Extraction> {
    let parser = PaperParser::from_reader_with_options(reader, options)?;
    Ok(parser.parse())
}

/// Convert a character dump file to a single-row table.
///
/// # Example
///
/// ```no_run
/// use paperparse::{to_table, TableFormat};
///
/// let csv = to_table("paper.chars.json", TableFormat::Csv).unwrap();
/// std::fs::write("paper.csv", csv).unwrap();
/// ```
pub fn to_table<P: AsRef<Path>>(path: P, format: TableFormat) -> Result<String> {
    let extraction = extract_file(path)?;
    render::to_table(&extraction.document, format)
}

/// Convert a character dump file to an xlsx workbook.
pub fn to_xlsx<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
    let extraction = extract_file(path)?;
    render::to_xlsx(&extraction.document)
}

/// Convert a character dump file to JSON.
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let extraction = extract_file(path)?;
    render::to_json(&extraction.document, format)
}

/// Convert a character dump file to Markdown.
pub fn to_markdown<P: AsRef<Path>>(path: P) -> Result<String> {
    to_markdown_with_options(path, &RenderOptions::default())
}

/// Convert a character dump file to Markdown with custom options.
pub fn to_markdown_with_options<P: AsRef<Path>>(
    path: P,
    options: &RenderOptions,
) -> Result<String> {
    let extraction = extract_file(path)?;
    render::to_markdown(&extraction.document, options)
}

/// Builder for extracting and exporting papers.
///
/// # Example
///
/// ```no_run
/// use paperparse::Paperparse;
///
/// let markdown = Paperparse::new()
///     .with_title_size_ratio(0.9)
///     .with_frontmatter()
///     .extract("paper.chars.json")?
///     .to_markdown()?;
/// # Ok::<(), paperparse::Error>(())
/// ```
pub struct Paperparse {
    extract_options: ExtractOptions,
    render_options: RenderOptions,
}

impl Paperparse {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            extract_options: ExtractOptions::default(),
            render_options: RenderOptions::default(),
        }
    }

    /// Replace all extraction options.
    pub fn with_options(mut self, options: ExtractOptions) -> Self {
        self.extract_options = options;
        self
    }

    /// Set the title size ratio.
    pub fn with_title_size_ratio(mut self, ratio: f64) -> Self {
        self.extract_options = self.extract_options.with_title_size_ratio(ratio);
        self
    }

    /// Set the section body size tolerance.
    pub fn with_section_size_tolerance(mut self, tolerance: f64) -> Self {
        self.extract_options = self.extract_options.with_section_size_tolerance(tolerance);
        self
    }

    /// Enable frontmatter in Markdown output.
    pub fn with_frontmatter(mut self) -> Self {
        self.render_options = self.render_options.with_frontmatter(true);
        self
    }

    /// Replace all render options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render_options = options;
        self
    }

    /// Extract from a character dump file.
    pub fn extract<P: AsRef<Path>>(self, path: P) -> Result<PaperparseResult> {
        let parser = PaperParser::open_with_options(path, self.extract_options)?;
        Ok(PaperparseResult {
            extraction: parser.parse(),
            render_options: self.render_options,
        })
    }

    /// Extract from character dump bytes.
    pub fn extract_bytes(self, data: &[u8]) -> Result<PaperparseResult> {
        let parser = PaperParser::from_bytes_with_options(data, self.extract_options)?;
        Ok(PaperparseResult {
            extraction: parser.parse(),
            render_options: self.render_options,
        })
    }

    /// Extract from characters already in memory.
    pub fn extract_characters(self, chars: &[Character]) -> PaperparseResult {
        PaperparseResult {
            extraction: extract_characters(chars, &self.extract_options),
            render_options: self.render_options,
        }
    }
}

impl Default for Paperparse {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of extracting one paper.
pub struct PaperparseResult {
    /// The extraction
    pub extraction: Extraction,
    /// Render options to use
    render_options: RenderOptions,
}

impl PaperparseResult {
    /// Convert to Markdown.
    pub fn to_markdown(&self) -> Result<String> {
        render::to_markdown(&self.extraction.document, &self.render_options)
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.extraction.document, format)
    }

    /// Convert to a single-row table.
    pub fn to_table(&self, format: TableFormat) -> Result<String> {
        render::to_table(&self.extraction.document, format)
    }

    /// Convert to an xlsx workbook.
    pub fn to_xlsx(&self) -> Result<Vec<u8>> {
        render::to_xlsx(&self.extraction.document)
    }

    /// Column widths for the table export.
    pub fn table_layout(&self) -> TableLayout {
        TableLayout::from_document(&self.extraction.document)
    }

    /// Get the document.
    pub fn document(&self) -> &PaperDocument {
        &self.extraction.document
    }
}
