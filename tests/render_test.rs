//! Integration tests for the exporters.

use std::fs;

use paperparse::render::{self, MAX_COLUMN_WIDTH};
use paperparse::{Character, Fallback, JsonFormat, Paperparse, RenderOptions, TableFormat};

fn text_line(text: &str, top: f64, size: f64, font: &str) -> Vec<Character> {
    text.chars()
        .enumerate()
        .map(|(i, c)| Character::new(c, 1, top, 100.0 + i as f64 * size * 0.5, size, font))
        .collect()
}

fn sample_paper() -> Vec<Character> {
    let mut chars = text_line("A Novel Approach to AI Research", 100.0, 24.0, "Helvetica-Bold");
    chars.extend(text_line("John Doe, Jane Smith", 130.0, 12.0, "Helvetica"));
    chars.extend(text_line("Abstract", 160.0, 14.0, "Helvetica-Bold"));
    chars.extend(text_line(
        "This is the abstract text. It summarizes the paper.",
        180.0,
        12.0,
        "Helvetica",
    ));
    chars.extend(text_line("Methodology", 220.0, 14.0, "Helvetica-Bold"));
    chars.extend(text_line("We used a complex algorithm.", 240.0, 12.0, "Helvetica"));
    chars
}

#[test]
fn test_csv_export() {
    let result = Paperparse::new().extract_characters(&sample_paper());
    let csv = result.to_table(TableFormat::Csv).unwrap();

    assert_eq!(
        csv,
        "Title,Authors,Abstract,Methodology\n\
         A Novel Approach to AI Research,\"John Doe, Jane Smith\",\
         This is the abstract text. It summarizes the paper.,We used a complex algorithm.\n"
    );
}

#[test]
fn test_table_layout() {
    let result = Paperparse::new().extract_characters(&sample_paper());
    let layout = result.table_layout();

    assert_eq!(layout.width_of("Title"), Some(33));
    assert_eq!(layout.width_of("Authors"), Some(22));
    assert_eq!(layout.width_of("Abstract"), Some(MAX_COLUMN_WIDTH));
    assert_eq!(layout.width_of("Methodology"), Some(30));
    assert!(layout.columns.iter().all(|c| c.width <= MAX_COLUMN_WIDTH));
}

#[test]
fn test_tsv_file_export() {
    let result = Paperparse::new().extract_characters(&sample_paper());

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(format!("paper.{}", TableFormat::Tsv.extension()));
    let file = fs::File::create(&path).unwrap();
    render::write_table(result.document(), TableFormat::Tsv, file).unwrap();

    let written = fs::read_to_string(&path).unwrap();
    let mut rows = written.lines();
    assert_eq!(rows.next(), Some("Title\tAuthors\tAbstract\tMethodology"));
    assert!(rows.next().unwrap().starts_with("A Novel Approach to AI Research\tJohn Doe, Jane Smith\t"));
}

#[test]
fn test_json_export_preserves_order() {
    let result = Paperparse::new().extract_characters(&sample_paper());
    let json = result.to_json(JsonFormat::Compact).unwrap();

    let title = json.find("\"Title\"").unwrap();
    let authors = json.find("\"Authors\"").unwrap();
    let abstract_ = json.find("\"Abstract\"").unwrap();
    let methodology = json.find("\"Methodology\"").unwrap();
    assert!(title < authors && authors < abstract_ && abstract_ < methodology);

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["Authors"], "John Doe, Jane Smith");
}

#[test]
fn test_json_report_lists_fallbacks() {
    let chars = text_line("Only A Title", 100.0, 24.0, "Helvetica-Bold");
    let result = Paperparse::new().extract_characters(&chars);

    let report = render::to_json_report(&result.extraction, JsonFormat::Pretty).unwrap();
    let value: serde_json::Value = serde_json::from_str(&report).unwrap();

    assert_eq!(value["document"]["Title"], "Only A Title");
    assert_eq!(
        value["fallbacks"],
        serde_json::json!(["missing_abstract_marker", "no_headings_found"])
    );
    assert_eq!(value["stats"]["line_count"], 1);
    assert!(result.extraction.has_fallback(Fallback::NoHeadingsFound));
}

#[test]
fn test_markdown_export() {
    let result = Paperparse::new()
        .with_frontmatter()
        .extract_characters(&sample_paper());
    let markdown = result.to_markdown().unwrap();

    assert!(markdown.starts_with("---\ntitle: \"A Novel Approach to AI Research\"\n"));
    assert!(markdown.contains("sections:\n  - \"Abstract\"\n  - \"Methodology\"\n---"));
    assert!(markdown.contains("\n# A Novel Approach to AI Research\n\nJohn Doe, Jane Smith\n"));
    assert!(markdown.ends_with("## Methodology\n\nWe used a complex algorithm."));
}

#[test]
fn test_markdown_without_frontmatter() {
    let result = Paperparse::new()
        .with_render_options(RenderOptions::new().with_section_level(3))
        .extract_characters(&sample_paper());
    let markdown = result.to_markdown().unwrap();

    assert!(markdown.starts_with("# A Novel Approach to AI Research"));
    assert!(markdown.contains("### Abstract"));
}

#[test]
fn test_empty_document_exports() {
    let result = Paperparse::new().extract_characters(&[]);

    assert_eq!(result.to_table(TableFormat::Csv).unwrap(), "");
    assert_eq!(result.to_json(JsonFormat::Compact).unwrap(), "{}");
    assert_eq!(result.to_markdown().unwrap(), "");
    assert!(result.table_layout().columns.is_empty());
}

#[test]
fn test_xlsx_export() {
    let result = Paperparse::new().extract_characters(&sample_paper());
    let bytes = result.to_xlsx().unwrap();
    assert!(bytes.starts_with(b"PK\x03\x04"));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("paper.xlsx");
    render::write_xlsx(result.document(), &path).unwrap();
    assert!(fs::metadata(&path).unwrap().len() > 0);
}
