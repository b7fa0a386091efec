//! Markdown rendering for paper documents.

use crate::error::Result;
use crate::model::PaperDocument;

use super::RenderOptions;

/// Convert a document to Markdown.
pub fn to_markdown(doc: &PaperDocument, options: &RenderOptions) -> Result<String> {
    let renderer = MarkdownRenderer::new(options.clone());
    renderer.render(doc)
}

/// Markdown renderer.
pub struct MarkdownRenderer {
    options: RenderOptions,
}

impl MarkdownRenderer {
    /// Create a new Markdown renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render a document to Markdown.
    pub fn render(&self, doc: &PaperDocument) -> Result<String> {
        let mut output = String::new();
        if doc.is_empty() {
            return Ok(output);
        }

        if self.options.include_frontmatter {
            output.push_str(&doc.to_yaml_frontmatter());
            output.push('\n');
        }

        if let Some(title) = doc.title().filter(|t| !t.is_empty()) {
            output.push_str("# ");
            output.push_str(&self.escape(title));
            output.push_str("\n\n");
        }

        if let Some(authors) = doc.authors().filter(|a| !a.is_empty()) {
            self.render_authors(&mut output, authors);
        }

        for (name, body) in doc.sections() {
            self.render_section(&mut output, name, body);
        }

        Ok(output.trim().to_string())
    }

    fn render_authors(&self, output: &mut String, authors: &str) {
        // Hard line breaks keep one author line per rendered line
        let lines: Vec<String> = authors.lines().map(|line| self.escape(line)).collect();
        output.push_str(&lines.join("  \n"));
        output.push_str("\n\n");
    }

    fn render_section(&self, output: &mut String, name: &str, body: &str) {
        if body.is_empty() && !self.options.include_empty_sections {
            return;
        }

        let level = self.options.section_heading_level as usize;
        output.push_str(&"#".repeat(level));
        output.push(' ');
        output.push_str(&self.escape(name));
        output.push_str("\n\n");

        if !body.is_empty() {
            output.push_str(&self.escape(body));
            output.push_str("\n\n");
        }
    }

    fn escape(&self, text: &str) -> String {
        if self.options.escape_special_chars {
            escape_markdown(text)
        } else {
            text.to_string()
        }
    }
}

/// Escape special Markdown characters.
/// Only escape characters that could be misinterpreted as Markdown syntax.
fn escape_markdown(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '`' | '*' | '_' | '[' | ']' | '|' => {
                result.push('\\');
                result.push(c);
            }
            _ => result.push(c),
        }
    }
    result
}
