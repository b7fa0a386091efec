//! Heading detection and section body accumulation.
//!
//! Lines are classified one at a time as blank, heading or content, and
//! folded into a [`SectionScan`] accumulator. A section's body keeps only
//! the lines whose font size stays within tolerance of its first body line;
//! the rest (captions, footnotes, stray labels) are dropped, not moved.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::{HeadingKind, Line, Section, StandardHeading};

/// Case-insensitive patterns for the fixed heading vocabulary, in priority order.
///
/// A heading may carry a leading number (`2`, `2.`, `2. `) and a trailing
/// `:` or `.`, nothing else.
static STANDARD_HEADINGS: Lazy<Vec<(StandardHeading, Regex)>> = Lazy::new(|| {
    StandardHeading::ALL
        .iter()
        .map(|&heading| {
            let pattern = format!(r"(?i)^(?:\d+\.?\s*)?{}[:.]?$", regex::escape(heading.label()));
            (heading, Regex::new(&pattern).unwrap())
        })
        .collect()
});

/// Match trimmed line text against the fixed heading vocabulary.
pub fn match_standard_heading(text: &str) -> Option<StandardHeading> {
    STANDARD_HEADINGS
        .iter()
        .find(|(_, re)| re.is_match(text))
        .map(|(heading, _)| *heading)
}

/// What a line is, as far as sectioning is concerned.
#[derive(Debug, Clone, PartialEq)]
pub enum LineRole {
    /// Nothing visible on the line
    Blank,
    /// Starts a new section with the given name
    Heading {
        /// Section name
        name: String,
        /// How the heading was recognized
        kind: HeadingKind,
    },
    /// Body text for the open section
    Content,
}

/// Classifies lines and splits them into sections.
#[derive(Debug, Clone, Copy)]
pub struct SectionClassifier {
    max_font_size: f64,
    max_heading_chars: usize,
    size_tolerance: f64,
}

impl SectionClassifier {
    /// Create a classifier for a document whose largest font size is `max_font_size`.
    pub fn new(max_font_size: f64, max_heading_chars: usize, size_tolerance: f64) -> Self {
        Self {
            max_font_size,
            max_heading_chars,
            size_tolerance,
        }
    }

    /// Decide the role of a single line.
    ///
    /// A vocabulary match always wins, bold or not. Otherwise a line is a
    /// heading when it is bold, smaller than the largest font in the
    /// document and short. Bold emphasis lines inside paragraphs are taken
    /// for headings too; that is accepted.
    pub fn classify(&self, line: &Line) -> LineRole {
        let text = line.trimmed();
        if text.is_empty() {
            return LineRole::Blank;
        }

        if let Some(heading) = match_standard_heading(text) {
            return LineRole::Heading {
                name: heading.label().to_string(),
                kind: HeadingKind::Standard(heading),
            };
        }

        if line.is_bold()
            && line.font_size() < self.max_font_size
            && text.chars().count() < self.max_heading_chars
        {
            return LineRole::Heading {
                name: text.to_string(),
                kind: HeadingKind::Dynamic,
            };
        }

        LineRole::Content
    }

    /// Split `lines` into sections.
    pub fn scan(&self, lines: &[Line]) -> SectionScan {
        lines
            .iter()
            .fold(SectionScan::default(), |scan, line| {
                scan.step(line, self.classify(line), self.size_tolerance)
            })
            .finish()
    }
}

/// A section still receiving body lines.
#[derive(Debug, Clone, PartialEq)]
struct OpenSection {
    name: String,
    kind: HeadingKind,
    /// Size of the first body line, once there is one
    font_size: Option<f64>,
    content: Vec<String>,
}

impl OpenSection {
    fn close(self) -> Section {
        Section::new(self.name, self.kind, self.content)
    }
}

/// Accumulator threaded through the section fold.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectionScan {
    sections: Vec<Section>,
    open: Option<OpenSection>,
    /// Headings matched against the fixed vocabulary
    pub standard_headings: u32,
    /// Headings inferred from style
    pub dynamic_headings: u32,
    /// Body lines dropped for their font size
    pub dropped_lines: u32,
    /// Content lines seen before any heading
    pub orphan_lines: u32,
}

impl SectionScan {
    /// Consume one classified line.
    pub fn step(mut self, line: &Line, role: LineRole, size_tolerance: f64) -> Self {
        match role {
            LineRole::Blank => {}
            LineRole::Heading { name, kind } => {
                log::trace!("Heading {:?} ({:?})", name, kind);
                match kind {
                    HeadingKind::Standard(_) => {
                        self.standard_headings = self.standard_headings.saturating_add(1)
                    }
                    HeadingKind::Dynamic => {
                        self.dynamic_headings = self.dynamic_headings.saturating_add(1)
                    }
                }
                if let Some(previous) = self.open.take() {
                    self.sections.push(previous.close());
                }
                self.open = Some(OpenSection {
                    name,
                    kind,
                    font_size: None,
                    content: Vec::new(),
                });
            }
            LineRole::Content => match self.open.as_mut() {
                None => {
                    log::trace!("Discarding line before first heading: {:?}", line.trimmed());
                    self.orphan_lines = self.orphan_lines.saturating_add(1);
                }
                Some(section) => match section.font_size {
                    None => {
                        section.font_size = Some(line.font_size());
                        section.content.push(line.trimmed().to_string());
                    }
                    Some(size) if (line.font_size() - size).abs() < size_tolerance => {
                        section.content.push(line.trimmed().to_string());
                    }
                    Some(size) => {
                        log::trace!(
                            "Dropping {:.1}pt line in {:.1}pt section {:?}: {:?}",
                            line.font_size(),
                            size,
                            section.name,
                            line.trimmed()
                        );
                        self.dropped_lines = self.dropped_lines.saturating_add(1);
                    }
                },
            },
        }
        self
    }

    /// Close the open section, if any.
    pub fn finish(mut self) -> Self {
        if let Some(open) = self.open.take() {
            self.sections.push(open.close());
        }
        self
    }

    /// Closed sections in discovery order, duplicates included.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Consume the scan and return the closed sections.
    pub fn into_sections(self) -> Vec<Section> {
        self.sections
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> SectionClassifier {
        SectionClassifier::new(24.0, 100, 1.0)
    }

    fn heading(text: &str) -> Line {
        Line::new(text, 14.0, true)
    }

    fn body(text: &str, size: f64) -> Line {
        Line::new(text, size, false)
    }

    #[test]
    fn test_standard_heading_patterns() {
        assert_eq!(match_standard_heading("Abstract"), Some(StandardHeading::Abstract));
        assert_eq!(match_standard_heading("ABSTRACT"), Some(StandardHeading::Abstract));
        assert_eq!(
            match_standard_heading("1. Introduction"),
            Some(StandardHeading::Introduction)
        );
        assert_eq!(
            match_standard_heading("2 Materials and Methods:"),
            Some(StandardHeading::MaterialsAndMethods)
        );
        assert_eq!(match_standard_heading("3.Results."), Some(StandardHeading::Results));
        assert_eq!(
            match_standard_heading("Conclusions"),
            Some(StandardHeading::Conclusions)
        );
        assert_eq!(match_standard_heading("Conclusion"), Some(StandardHeading::Conclusion));
    }

    #[test]
    fn test_standard_heading_rejects_surrounding_text() {
        assert_eq!(match_standard_heading("Introduction to the topic"), None);
        assert_eq!(match_standard_heading("The Results"), None);
        assert_eq!(match_standard_heading("Results:."), None);
        assert_eq!(match_standard_heading("A. Discussion"), None);
    }

    #[test]
    fn test_static_heading_wins_when_not_bold() {
        let role = classifier().classify(&Line::new("References", 12.0, false));
        assert_eq!(
            role,
            LineRole::Heading {
                name: "References".to_string(),
                kind: HeadingKind::Standard(StandardHeading::References),
            }
        );
    }

    #[test]
    fn test_static_heading_name_is_canonical() {
        let role = classifier().classify(&heading("  4. discussion: "));
        assert_eq!(
            role,
            LineRole::Heading {
                name: "Discussion".to_string(),
                kind: HeadingKind::Standard(StandardHeading::Discussion),
            }
        );
    }

    #[test]
    fn test_dynamic_heading() {
        let role = classifier().classify(&heading(" Related Work "));
        assert_eq!(
            role,
            LineRole::Heading {
                name: "Related Work".to_string(),
                kind: HeadingKind::Dynamic,
            }
        );
    }

    #[test]
    fn test_dynamic_heading_requires_smaller_than_max() {
        let role = classifier().classify(&Line::new("Huge bold line", 24.0, true));
        assert_eq!(role, LineRole::Content);
    }

    #[test]
    fn test_dynamic_heading_length_limit() {
        let c = classifier();
        assert!(matches!(
            c.classify(&heading(&"x".repeat(99))),
            LineRole::Heading { .. }
        ));
        assert_eq!(c.classify(&heading(&"x".repeat(100))), LineRole::Content);
        // Counted in characters, not bytes
        assert!(matches!(
            c.classify(&heading(&"é".repeat(99))),
            LineRole::Heading { .. }
        ));
    }

    #[test]
    fn test_blank_line() {
        assert_eq!(classifier().classify(&body("   ", 12.0)), LineRole::Blank);
    }

    #[test]
    fn test_scan_collects_same_size_content() {
        let lines = vec![
            heading("Introduction"),
            body("First.", 12.0),
            body("Second.", 12.5),
            body("Caption", 9.0),
            body("Third.", 11.2),
            heading("Results"),
            body("Numbers.", 10.0),
        ];
        let scan = classifier().scan(&lines);
        let sections = scan.sections();

        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].heading(), "Introduction");
        assert_eq!(sections[0].content(), ["First.", "Second.", "Third."]);
        assert_eq!(sections[1].heading(), "Results");
        assert_eq!(sections[1].body(), "Numbers.");
        assert_eq!(scan.dropped_lines, 1);
        assert_eq!(scan.standard_headings, 2);
    }

    #[test]
    fn test_tolerance_boundary_excluded() {
        let lines = vec![
            heading("Discussion"),
            body("Base.", 12.0),
            body("Exactly one point larger.", 13.0),
            body("Just under.", 12.75),
        ];
        let scan = classifier().scan(&lines);
        assert_eq!(scan.sections()[0].content(), ["Base.", "Just under."]);
        assert_eq!(scan.dropped_lines, 1);
    }

    #[test]
    fn test_size_reference_is_first_content_line() {
        // 12.0 -> 12.8 -> 13.6: each step is within tolerance of the previous,
        // but only 12.8 is within tolerance of the first line.
        let lines = vec![
            heading("Methodology"),
            body("a", 12.0),
            body("b", 12.8),
            body("c", 13.6),
        ];
        let scan = classifier().scan(&lines);
        assert_eq!(scan.sections()[0].content(), ["a", "b"]);
    }

    #[test]
    fn test_content_before_first_heading_is_discarded() {
        let lines = vec![body("Preamble", 12.0), heading("Abstract"), body("Text", 12.0)];
        let scan = classifier().scan(&lines);
        assert_eq!(scan.orphan_lines, 1);
        assert_eq!(scan.sections().len(), 1);
        assert_eq!(scan.sections()[0].body(), "Text");
    }

    #[test]
    fn test_heading_with_no_content() {
        let lines = vec![heading("Acknowledgements"), heading("References")];
        let scan = classifier().scan(&lines);
        assert_eq!(scan.sections().len(), 2);
        assert!(scan.sections()[0].is_empty());
        assert_eq!(scan.dynamic_headings, 1);
        assert_eq!(scan.standard_headings, 1);
    }

    #[test]
    fn test_duplicate_headings_are_kept_in_scan() {
        let lines = vec![
            heading("Results"),
            body("one", 12.0),
            heading("Results"),
            body("two", 12.0),
        ];
        let sections = classifier().scan(&lines).into_sections();
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].body(), "one");
        assert_eq!(sections[1].body(), "two");
    }

    #[test]
    fn test_no_lines() {
        let scan = classifier().scan(&[]);
        assert!(scan.sections().is_empty());
    }
}
