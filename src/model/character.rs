//! Positioned characters, the raw input of structure inference.

use serde::{Deserialize, Serialize};

/// A single glyph as reported by a PDF content extractor.
///
/// Field names follow the pdfplumber character dump (`top`, `x0`, `size`,
/// `fontname`), so those dumps deserialize without a mapping step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    /// The glyph text (usually a single character, sometimes a ligature)
    pub text: String,
    /// Page the glyph was found on
    #[serde(default, alias = "page_number")]
    pub page: u32,
    /// Distance from the top of the page to the top of the glyph
    pub top: f64,
    /// Left edge of the glyph
    pub x0: f64,
    /// Font size in points
    pub size: f64,
    /// Font name (e.g., "Helvetica-Bold")
    #[serde(default)]
    pub fontname: String,
}

impl Character {
    /// Create a new character.
    pub fn new(
        text: impl Into<String>,
        page: u32,
        top: f64,
        x0: f64,
        size: f64,
        fontname: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            page,
            top,
            x0,
            size,
            fontname: fontname.into(),
        }
    }

    /// Whether the font name carries one of the given bold markers.
    ///
    /// Matching is case-sensitive: `Helvetica-Bold` and `TimesBd` are bold,
    /// `bold-ish` is not.
    pub fn has_bold_font<S: AsRef<str>>(&self, markers: &[S]) -> bool {
        markers
            .iter()
            .any(|marker| self.fontname.contains(marker.as_ref()))
    }

    /// Name of the first non-finite numeric field, if any.
    pub fn non_finite_field(&self) -> Option<&'static str> {
        if !self.top.is_finite() {
            Some("top")
        } else if !self.x0.is_finite() {
            Some("x0")
        } else if !self.size.is_finite() {
            Some("size")
        } else {
            None
        }
    }
}
