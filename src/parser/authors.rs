//! Author block extraction between the title and the abstract.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::Line;

/// Lines containing any of these (lower-cased) are publication metadata, not authors.
const METADATA_KEYWORDS: [&str; 5] = ["accepted:", "published:", "©", "copyright", "received:"];

/// Marker that ends the author block.
const ABSTRACT_MARKER: &str = "abstract";

/// Affiliation markers such as the `1` in `John Doe1`.
static DIGIT_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").unwrap());

/// Decorative glyphs some templates put around author names.
static DECORATIONS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[⟩]").unwrap());

/// The cleaned author block and where section scanning continues.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthorBlock {
    /// Cleaned author lines joined with newlines; empty without an abstract marker
    pub text: String,
    /// Number of lines kept after cleaning
    pub line_count: usize,
    /// Index of the first line mentioning "abstract", if any
    pub abstract_index: Option<usize>,
    /// Index at which section scanning resumes
    pub resume_index: usize,
}

/// Extract the author block from the lines following the title.
///
/// `start` is the index of the first line after the title. Without an
/// abstract marker the author block stays empty and scanning resumes at
/// `start`.
pub fn extract_authors(lines: &[Line], start: usize) -> AuthorBlock {
    let abstract_index = lines
        .iter()
        .enumerate()
        .skip(start)
        .find(|(_, line)| line.text().to_lowercase().contains(ABSTRACT_MARKER))
        .map(|(i, _)| i);

    let Some(abstract_index) = abstract_index else {
        log::debug!("No abstract marker after line {}", start);
        return AuthorBlock {
            text: String::new(),
            line_count: 0,
            abstract_index: None,
            resume_index: start,
        };
    };

    let cleaned: Vec<String> = lines[start..abstract_index]
        .iter()
        .filter_map(|line| clean_author_line(line.text()))
        .collect();

    log::debug!(
        "Authors: {} of {} line(s) kept before abstract at {}",
        cleaned.len(),
        abstract_index - start,
        abstract_index
    );

    AuthorBlock {
        text: cleaned.join("\n").trim().to_string(),
        line_count: cleaned.len(),
        abstract_index: Some(abstract_index),
        resume_index: abstract_index,
    }
}

/// Clean one candidate author line.
///
/// Returns `None` for publication metadata lines and for lines that are
/// empty once digits and decorations are removed.
pub fn clean_author_line(text: &str) -> Option<String> {
    let lower = text.to_lowercase();
    if METADATA_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
        log::trace!("Dropping metadata line {:?}", text);
        return None;
    }

    let text = DIGIT_RUNS.replace_all(text, "");
    let text = DECORATIONS.replace_all(&text, "");
    let text = text.trim();

    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}
