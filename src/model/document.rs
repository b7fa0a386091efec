//! Document-level types: the ordered field mapping and the extraction result.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Key under which the title is stored.
pub const TITLE_KEY: &str = "Title";

/// Key under which the author block is stored.
pub const AUTHORS_KEY: &str = "Authors";

/// The structure of a paper as an ordered mapping from field name to text.
///
/// `Title` and `Authors` come first, followed by one entry per section in
/// the order the sections were discovered. Inserting an existing key
/// replaces its value but keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaperDocument {
    fields: IndexMap<String, String>,
}

impl PaperDocument {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a field. Returns the previous value, if any.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.fields.insert(key.into(), value.into())
    }

    /// Get a field by name.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// The title, if the document is not empty.
    pub fn title(&self) -> Option<&str> {
        self.get(TITLE_KEY)
    }

    /// The author block, if the document is not empty.
    pub fn authors(&self) -> Option<&str> {
        self.get(AUTHORS_KEY)
    }

    /// Section entries, i.e. every field except `Title` and `Authors`.
    pub fn sections(&self) -> impl Iterator<Item = (&str, &str)> {
        self.iter()
            .filter(|(key, _)| *key != TITLE_KEY && *key != AUTHORS_KEY)
    }

    /// All fields in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Field names in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the document has no fields at all.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Consume the document and return the underlying mapping.
    pub fn into_inner(self) -> IndexMap<String, String> {
        self.fields
    }

    /// Convert title and authors to YAML frontmatter format.
    pub fn to_yaml_frontmatter(&self) -> String {
        let mut lines = vec!["---".to_string()];

        if let Some(title) = self.title() {
            lines.push(format!("title: \"{}\"", escape_yaml(title)));
        }
        if let Some(authors) = self.authors().filter(|a| !a.is_empty()) {
            lines.push("authors:".to_string());
            for author in authors.lines() {
                lines.push(format!("  - \"{}\"", escape_yaml(author)));
            }
        }
        let sections: Vec<&str> = self.sections().map(|(name, _)| name).collect();
        if !sections.is_empty() {
            lines.push("sections:".to_string());
            for name in sections {
                lines.push(format!("  - \"{}\"", escape_yaml(name)));
            }
        }

        lines.push("---".to_string());
        lines.push(String::new());

        lines.join("\n")
    }
}

impl<'a> IntoIterator for &'a PaperDocument {
    type Item = (&'a String, &'a String);
    type IntoIter = indexmap::map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

/// Escape special characters for YAML strings.
fn escape_yaml(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

/// A documented degradation taken instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fallback {
    /// The character stream was empty; the document has no fields.
    EmptyInput,
    /// No line mentions "abstract"; `Authors` is empty and sections start
    /// right after the title.
    MissingAbstractMarker,
    /// No heading was recognized; only `Title` and `Authors` are present.
    NoHeadingsFound,
}

impl Fallback {
    /// Short human-readable description.
    pub fn description(self) -> &'static str {
        match self {
            Fallback::EmptyInput => "no characters in input",
            Fallback::MissingAbstractMarker => "no abstract marker, authors left empty",
            Fallback::NoHeadingsFound => "no section headings found",
        }
    }
}

impl std::fmt::Display for Fallback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.description())
    }
}

/// Counters collected while inferring structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionStats {
    /// Number of distinct pages seen
    pub page_count: u32,
    /// Number of input characters
    pub char_count: u32,
    /// Number of lines built
    pub line_count: u32,
    /// Largest font size in the document
    pub max_font_size: f64,
    /// Lines that contributed to the title
    pub title_line_count: u32,
    /// Lines kept in the author block
    pub author_line_count: u32,
    /// Headings matched against the fixed vocabulary
    pub standard_heading_count: u32,
    /// Headings inferred from style
    pub dynamic_heading_count: u32,
    /// Content lines dropped because their size differed from the section's
    pub dropped_line_count: u32,
    /// Content lines discarded because no section was open yet
    pub orphan_line_count: u32,
}

impl ExtractionStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of headings.
    pub fn heading_count(&self) -> u32 {
        self.standard_heading_count + self.dynamic_heading_count
    }
}

/// Result of structure inference on one document.
///
/// The engine never fails; callers branch on [`Extraction::fallbacks`]
/// rather than assuming a fully populated mapping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Extraction {
    /// The field mapping handed to exporters
    pub document: PaperDocument,
    /// Degradations taken, in the order they occurred
    pub fallbacks: Vec<Fallback>,
    /// Extraction statistics
    pub stats: ExtractionStats,
}

impl Extraction {
    /// Check whether a given fallback was taken.
    pub fn has_fallback(&self, fallback: Fallback) -> bool {
        self.fallbacks.contains(&fallback)
    }

    /// Check whether the extraction went through without degradation.
    pub fn is_complete(&self) -> bool {
        self.fallbacks.is_empty()
    }

    /// Consume the extraction and keep only the document.
    pub fn into_document(self) -> PaperDocument {
        self.document
    }
}
