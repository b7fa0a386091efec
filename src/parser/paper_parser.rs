//! Structure inference over a paper's character stream.

use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;

use crate::error::Result;
use crate::model::{
    Character, Extraction, ExtractionStats, Fallback, Line, PaperDocument, Section, AUTHORS_KEY,
    TITLE_KEY,
};
use crate::source::{validate_characters, CharacterSource, JsonDump};

use super::authors::extract_authors;
use super::layout::LineBuilder;
use super::options::ExtractOptions;
use super::sections::SectionClassifier;
use super::title::detect_title;

/// Paper structure parser.
///
/// Holds one document's characters; [`PaperParser::parse`] runs the
/// pipeline and can be called any number of times with identical results.
#[derive(Debug, Clone)]
pub struct PaperParser {
    chars: Vec<Character>,
    options: ExtractOptions,
}

impl PaperParser {
    /// Create a parser over in-memory characters.
    pub fn new(chars: Vec<Character>) -> Self {
        Self::with_options(chars, ExtractOptions::default())
    }

    /// Create a parser over in-memory characters with custom options.
    pub fn with_options(chars: Vec<Character>, options: ExtractOptions) -> Self {
        Self { chars, options }
    }

    /// Open a character dump file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ExtractOptions::default())
    }

    /// Open a character dump file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ExtractOptions) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("Loading characters from {}", path.display());
        Self::from_source(&mut JsonDump::open(path)?, options)
    }

    /// Parse a character dump from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ExtractOptions::default())
    }

    /// Parse a character dump from bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ExtractOptions) -> Result<Self> {
        Self::from_source(&mut JsonDump::from_bytes(data), options)
    }

    /// Parse a character dump from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_reader_with_options(reader, ExtractOptions::default())
    }

    /// Parse a character dump from a reader with custom options.
    pub fn from_reader_with_options<R: Read>(reader: R, options: ExtractOptions) -> Result<Self> {
        Self::from_source(&mut JsonDump::from_reader(reader)?, options)
    }

    /// Drain any character source.
    pub fn from_source<S: CharacterSource + ?Sized>(
        source: &mut S,
        options: ExtractOptions,
    ) -> Result<Self> {
        let chars = source.characters()?;
        validate_characters(&chars)?;
        Ok(Self { chars, options })
    }

    /// The characters this parser works on.
    pub fn characters(&self) -> &[Character] {
        &self.chars
    }

    /// The options in effect.
    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// The lines built from the characters, in reading order.
    pub fn lines(&self) -> Vec<Line> {
        LineBuilder::new(self.options.line_tolerance, &self.options.bold_markers).build(&self.chars)
    }

    /// Infer the document structure.
    pub fn parse(&self) -> Extraction {
        extract_structure(&self.chars, &self.options)
    }
}

/// Infer title, authors and sections from a character stream.
///
/// This never fails. Degraded inputs produce a partial document and are
/// listed in [`Extraction::fallbacks`].
pub fn extract_structure(chars: &[Character], options: &ExtractOptions) -> Extraction {
    let mut stats = ExtractionStats::new();
    stats.char_count = saturating_count(chars.len());
    stats.page_count = saturating_count(chars.iter().map(|c| c.page).collect::<BTreeSet<_>>().len());

    let lines =
        LineBuilder::new(options.line_tolerance, &options.bold_markers).build(chars);
    stats.line_count = saturating_count(lines.len());
    log::debug!("Built {} lines from {} characters", lines.len(), chars.len());

    let Some(title) = detect_title(&lines, options.title_size_ratio) else {
        log::warn!("Empty character stream, nothing to extract");
        return Extraction {
            document: PaperDocument::new(),
            fallbacks: vec![Fallback::EmptyInput],
            stats,
        };
    };
    stats.max_font_size = title.max_font_size;
    stats.title_line_count = saturating_count(title.indices.len());

    let mut fallbacks = Vec::new();

    let authors = extract_authors(&lines, title.next_index());
    stats.author_line_count = saturating_count(authors.line_count);
    if authors.abstract_index.is_none() {
        log::warn!("No abstract marker found; authors left empty");
        fallbacks.push(Fallback::MissingAbstractMarker);
    }

    let classifier = SectionClassifier::new(
        title.max_font_size,
        options.max_heading_chars,
        options.section_size_tolerance,
    );
    let scan = classifier.scan(&lines[authors.resume_index..]);
    stats.standard_heading_count = scan.standard_headings;
    stats.dynamic_heading_count = scan.dynamic_headings;
    stats.dropped_line_count = scan.dropped_lines;
    stats.orphan_line_count = scan.orphan_lines;

    let sections = scan.into_sections();
    if sections.is_empty() {
        log::warn!("No section headings found");
        fallbacks.push(Fallback::NoHeadingsFound);
    }
    log::debug!(
        "Found {} section(s) from line {}",
        sections.len(),
        authors.resume_index
    );

    Extraction {
        document: assemble(&title.text, &authors.text, &sections),
        fallbacks,
        stats,
    }
}

/// Counter value for the statistics, pinned at `u32::MAX`.
fn saturating_count(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

/// Merge title, authors and sections into one ordered mapping.
///
/// Sections sharing a name collapse: the later body replaces the earlier
/// one at the earlier position. That includes sections named `Title` or
/// `Authors`.
pub fn assemble(title: &str, authors: &str, sections: &[Section]) -> PaperDocument {
    let mut doc = PaperDocument::new();
    doc.insert(TITLE_KEY, title);
    doc.insert(AUTHORS_KEY, authors);

    for section in sections {
        if doc.insert(section.heading(), section.body()).is_some() {
            log::debug!("Section {:?} replaces an earlier entry", section.heading());
        }
    }

    doc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::model::HeadingKind;

    fn line_chars(text: &str, top: f64, size: f64, font: &str) -> Vec<Character> {
        text.chars()
            .enumerate()
            .map(|(i, c)| Character::new(c, 1, top, 72.0 + i as f64 * size * 0.5, size, font))
            .collect()
    }

    #[test]
    fn test_saturating_count() {
        assert_eq!(saturating_count(0), 0);
        assert_eq!(saturating_count(42), 42);
        assert_eq!(saturating_count(usize::MAX), u32::MAX);
    }

    #[test]
    fn test_empty_input() {
        let extraction = PaperParser::new(Vec::new()).parse();
        assert!(extraction.document.is_empty());
        assert_eq!(extraction.fallbacks, vec![Fallback::EmptyInput]);
    }

    #[test]
    fn test_title_only_document() {
        let chars = line_chars("Lonely Title", 50.0, 20.0, "Helvetica-Bold");
        let extraction = PaperParser::new(chars).parse();

        assert_eq!(extraction.document.title(), Some("Lonely Title"));
        assert_eq!(extraction.document.authors(), Some(""));
        assert_eq!(extraction.document.len(), 2);
        assert_eq!(
            extraction.fallbacks,
            vec![Fallback::MissingAbstractMarker, Fallback::NoHeadingsFound]
        );
    }

    #[test]
    fn test_assemble_collapses_duplicates() {
        let sections = vec![
            Section::new("Results", HeadingKind::Dynamic, vec!["one".to_string()]),
            Section::new("Notes", HeadingKind::Dynamic, vec!["n".to_string()]),
            Section::new("Results", HeadingKind::Dynamic, vec!["two".to_string()]),
        ];
        let doc = assemble("T", "A", &sections);

        assert_eq!(
            doc.keys().collect::<Vec<_>>(),
            vec!["Title", "Authors", "Results", "Notes"]
        );
        assert_eq!(doc.get("Results"), Some("two"));
    }

    #[test]
    fn test_assemble_section_can_overwrite_reserved_key() {
        let sections = vec![Section::new(
            "Authors",
            HeadingKind::Dynamic,
            vec!["Someone else".to_string()],
        )];
        let doc = assemble("T", "A", &sections);
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.authors(), Some("Someone else"));
    }

    #[test]
    fn test_stats() {
        let mut chars = line_chars("Title", 50.0, 20.0, "Helvetica-Bold");
        chars.extend(line_chars("Abstract", 80.0, 14.0, "Helvetica-Bold"));
        chars.extend(line_chars("Body text.", 100.0, 12.0, "Helvetica"));
        chars.extend(line_chars("Footnote", 120.0, 8.0, "Helvetica"));

        let extraction = PaperParser::new(chars).parse();
        let stats = &extraction.stats;

        assert_eq!(stats.page_count, 1);
        assert_eq!(stats.line_count, 4);
        assert_eq!(stats.max_font_size, 20.0);
        assert_eq!(stats.title_line_count, 1);
        assert_eq!(stats.standard_heading_count, 1);
        assert_eq!(stats.dropped_line_count, 1);
        assert!(extraction.is_complete());
    }

    #[test]
    fn test_from_source_validates() {
        let mut chars = vec![Character::new("a", 1, 1.0, f64::NAN, 12.0, "F")];
        let result = PaperParser::from_source(&mut chars, ExtractOptions::default());
        assert!(matches!(result, Err(Error::InvalidCharacter { .. })));
    }

    #[test]
    fn test_lines_accessor() {
        let mut chars = line_chars("One", 10.0, 12.0, "Helvetica");
        chars.extend(line_chars("Two", 30.0, 12.0, "Helvetica"));
        let parser = PaperParser::new(chars);

        let lines = parser.lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].text(), "Two");
    }
}
