//! Document model types for structure inference.
//!
//! Characters come in, lines are derived from them, sections are derived
//! from lines, and everything ends up in a [`PaperDocument`] wrapped by an
//! [`Extraction`].

mod character;
mod document;
mod line;
mod section;

pub use character::Character;
pub use document::{
    Extraction, ExtractionStats, Fallback, PaperDocument, AUTHORS_KEY, TITLE_KEY,
};
pub use line::Line;
pub use section::{HeadingKind, Section, StandardHeading};
