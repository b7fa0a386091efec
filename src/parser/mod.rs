//! Structure inference pipeline: lines, title, authors, sections.

mod authors;
mod layout;
mod options;
mod paper_parser;
mod sections;
mod title;

pub use authors::{clean_author_line, extract_authors, AuthorBlock};
pub use layout::LineBuilder;
pub use options::{
    ExtractOptions, DEFAULT_LINE_TOLERANCE, DEFAULT_MAX_HEADING_CHARS,
    DEFAULT_SECTION_SIZE_TOLERANCE, DEFAULT_TITLE_SIZE_RATIO,
};
pub use paper_parser::{assemble, extract_structure, PaperParser};
pub use sections::{match_standard_heading, LineRole, SectionClassifier, SectionScan};
pub use title::{detect_title, TitleBlock};
