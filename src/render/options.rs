//! Rendering options and configuration.

/// Options for rendering a paper document.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Include YAML frontmatter with title, authors and section names
    pub include_frontmatter: bool,

    /// Escape special Markdown characters
    pub escape_special_chars: bool,

    /// Emit headings for sections whose body is empty
    pub include_empty_sections: bool,

    /// Heading level used for sections (2-6); the title is always level 1
    pub section_heading_level: u8,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable frontmatter.
    pub fn with_frontmatter(mut self, include: bool) -> Self {
        self.include_frontmatter = include;
        self
    }

    /// Enable or disable Markdown escaping.
    pub fn with_escaping(mut self, escape: bool) -> Self {
        self.escape_special_chars = escape;
        self
    }

    /// Keep or skip sections without content.
    pub fn with_empty_sections(mut self, include: bool) -> Self {
        self.include_empty_sections = include;
        self
    }

    /// Set the section heading level.
    pub fn with_section_level(mut self, level: u8) -> Self {
        self.section_heading_level = level.clamp(2, 6);
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            include_frontmatter: false,
            escape_special_chars: true,
            include_empty_sections: true,
            section_heading_level: 2,
        }
    }
}
