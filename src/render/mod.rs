//! Rendering module for exporting paper documents to output formats.

mod json;
mod markdown;
mod options;
mod table;
mod xlsx;

pub use json::{to_json, to_json_report, JsonFormat};
pub use markdown::{to_markdown, MarkdownRenderer};
pub use options::RenderOptions;
pub use table::{to_table, write_table, ColumnWidth, TableFormat, TableLayout, MAX_COLUMN_WIDTH};
pub use xlsx::{to_xlsx, write_xlsx, SHEET_NAME};
