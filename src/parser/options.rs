//! Extraction options and configuration.

use serde::{Deserialize, Serialize};

/// Default vertical distance below which two characters share a line.
pub const DEFAULT_LINE_TOLERANCE: f64 = 3.0;

/// Default fraction of the largest font size a title line must reach.
pub const DEFAULT_TITLE_SIZE_RATIO: f64 = 0.95;

/// Default font size difference allowed between a section's body lines.
pub const DEFAULT_SECTION_SIZE_TOLERANCE: f64 = 1.0;

/// Default upper bound (exclusive) on the length of a style-inferred heading.
pub const DEFAULT_MAX_HEADING_CHARS: usize = 100;

/// Options controlling the structure heuristics.
///
/// Tweak these only when a family of documents is known to be laid out
/// differently from the usual single-column paper template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractOptions {
    /// Maximum `top` difference (exclusive) for characters on the same line
    pub line_tolerance: f64,

    /// Lines at or above `ratio * max_font_size` belong to the title
    pub title_size_ratio: f64,

    /// Body lines must differ from the section's first body line by less than this
    pub section_size_tolerance: f64,

    /// Style-inferred headings must be shorter than this many characters
    pub max_heading_chars: usize,

    /// Font name fragments marking a bold font (case-sensitive)
    pub bold_markers: Vec<String>,
}

impl ExtractOptions {
    /// Create new extract options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the same-line tolerance.
    pub fn with_line_tolerance(mut self, tolerance: f64) -> Self {
        self.line_tolerance = tolerance;
        self
    }

    /// Set the title size ratio.
    pub fn with_title_size_ratio(mut self, ratio: f64) -> Self {
        self.title_size_ratio = ratio;
        self
    }

    /// Set the section body size tolerance.
    pub fn with_section_size_tolerance(mut self, tolerance: f64) -> Self {
        self.section_size_tolerance = tolerance;
        self
    }

    /// Set the maximum length of a style-inferred heading.
    pub fn with_max_heading_chars(mut self, chars: usize) -> Self {
        self.max_heading_chars = chars;
        self
    }

    /// Replace the bold font markers.
    pub fn with_bold_markers<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.bold_markers = markers.into_iter().map(Into::into).collect();
        self
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            line_tolerance: DEFAULT_LINE_TOLERANCE,
            title_size_ratio: DEFAULT_TITLE_SIZE_RATIO,
            section_size_tolerance: DEFAULT_SECTION_SIZE_TOLERANCE,
            max_heading_chars: DEFAULT_MAX_HEADING_CHARS,
            bold_markers: vec!["Bold".to_string(), "Bd".to_string()],
        }
    }
}
