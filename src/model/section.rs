//! Named sections of a paper.

use serde::{Deserialize, Serialize};

/// One of the canonical section names recognized regardless of styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StandardHeading {
    Abstract,
    Introduction,
    Methodology,
    MaterialsAndMethods,
    Results,
    Discussion,
    Conclusion,
    Conclusions,
    References,
}

impl StandardHeading {
    /// All headings in match priority order.
    pub const ALL: [StandardHeading; 9] = [
        StandardHeading::Abstract,
        StandardHeading::Introduction,
        StandardHeading::Methodology,
        StandardHeading::MaterialsAndMethods,
        StandardHeading::Results,
        StandardHeading::Discussion,
        StandardHeading::Conclusion,
        StandardHeading::Conclusions,
        StandardHeading::References,
    ];

    /// Canonical label, used as the section name in the output mapping.
    pub fn label(self) -> &'static str {
        match self {
            StandardHeading::Abstract => "Abstract",
            StandardHeading::Introduction => "Introduction",
            StandardHeading::Methodology => "Methodology",
            StandardHeading::MaterialsAndMethods => "Materials and Methods",
            StandardHeading::Results => "Results",
            StandardHeading::Discussion => "Discussion",
            StandardHeading::Conclusion => "Conclusion",
            StandardHeading::Conclusions => "Conclusions",
            StandardHeading::References => "References",
        }
    }
}

impl std::fmt::Display for StandardHeading {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// How a heading line was recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "heading", rename_all = "snake_case")]
pub enum HeadingKind {
    /// Matched the fixed vocabulary
    Standard(StandardHeading),
    /// Inferred from style: bold, smaller than the title, short
    Dynamic,
}

/// A heading and the body lines collected under it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    heading: String,
    kind: HeadingKind,
    content: Vec<String>,
}

impl Section {
    /// Create a closed section.
    pub fn new(heading: impl Into<String>, kind: HeadingKind, content: Vec<String>) -> Self {
        Self {
            heading: heading.into(),
            kind,
            content,
        }
    }

    /// Section name: the canonical label or the heading line's text.
    pub fn heading(&self) -> &str {
        &self.heading
    }

    /// How the heading was recognized.
    pub fn kind(&self) -> HeadingKind {
        self.kind
    }

    /// Body lines in document order.
    pub fn content(&self) -> &[String] {
        &self.content
    }

    /// Body lines joined by newlines, trimmed.
    pub fn body(&self) -> String {
        self.content.join("\n").trim().to_string()
    }

    /// Whether no body line was collected.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}
