//! Text lines with aggregate font metadata.

use serde::Serialize;

use super::Character;

/// A run of characters sharing one baseline.
///
/// Lines are built once by the line builder and never modified afterwards,
/// so the fields are only exposed through accessors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Line {
    text: String,
    font_size: f64,
    is_bold: bool,
    page: u32,
}

impl Line {
    /// Create a line from already aggregated values.
    pub fn new(text: impl Into<String>, font_size: f64, is_bold: bool) -> Self {
        Self {
            text: text.into(),
            font_size,
            is_bold,
            page: 0,
        }
    }

    /// Set the page the line was found on.
    pub fn on_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Build a line from its characters, in reading order.
    ///
    /// The font size is the largest character size. The line is bold when
    /// strictly more than half of its characters use a bold font.
    pub fn from_characters<S: AsRef<str>>(chars: &[Character], bold_markers: &[S]) -> Self {
        let text: String = chars.iter().map(|c| c.text.as_str()).collect();
        let font_size = chars.iter().map(|c| c.size).reduce(f64::max).unwrap_or(0.0);
        let bold_count = chars
            .iter()
            .filter(|c| c.has_bold_font(bold_markers))
            .count();
        let page = chars.first().map(|c| c.page).unwrap_or(0);

        Self {
            text,
            font_size,
            is_bold: bold_count * 2 > chars.len(),
            page,
        }
    }

    /// The raw line text, characters concatenated without separators.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The line text without surrounding whitespace.
    pub fn trimmed(&self) -> &str {
        self.text.trim()
    }

    /// Largest font size on the line.
    pub fn font_size(&self) -> f64 {
        self.font_size
    }

    /// Whether most of the line is set in a bold font.
    pub fn is_bold(&self) -> bool {
        self.is_bold
    }

    /// Page the line was found on.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Whether the line has no visible text.
    pub fn is_blank(&self) -> bool {
        self.trimmed().is_empty()
    }
}
