//! Single-row table export.
//!
//! A paper becomes one header row (the field names) and one value row,
//! written as CSV or TSV.

use std::io::Write;

use crate::error::{Error, Result};
use crate::model::PaperDocument;

/// Upper bound on a computed column width.
pub const MAX_COLUMN_WIDTH: usize = 50;

/// Padding added to the widest cell of a column.
const COLUMN_PADDING: usize = 2;

/// Delimited text flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableFormat {
    /// Comma-separated values
    #[default]
    Csv,
    /// Tab-separated values
    Tsv,
}

impl TableFormat {
    /// Field delimiter byte.
    pub fn delimiter(self) -> u8 {
        match self {
            TableFormat::Csv => b',',
            TableFormat::Tsv => b'\t',
        }
    }

    /// Conventional file extension.
    pub fn extension(self) -> &'static str {
        match self {
            TableFormat::Csv => "csv",
            TableFormat::Tsv => "tsv",
        }
    }
}

/// Write a document as a single-row table.
///
/// An empty document writes nothing.
pub fn write_table<W: Write>(doc: &PaperDocument, format: TableFormat, writer: W) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(format.delimiter())
        .from_writer(writer);

    if !doc.is_empty() {
        csv_writer.write_record(doc.keys())?;
        csv_writer.write_record(doc.iter().map(|(_, value)| value))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Render a document as a single-row table string.
pub fn to_table(doc: &PaperDocument, format: TableFormat) -> Result<String> {
    let mut buffer = Vec::new();
    write_table(doc, format, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| Error::Render(format!("table is not UTF-8: {}", e)))
}

/// Display width of one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnWidth {
    /// Column header (the field name)
    pub name: String,
    /// Width in characters
    pub width: usize,
}

/// Column widths for presenting the single-row table in a spreadsheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableLayout {
    /// One entry per column, in document order
    pub columns: Vec<ColumnWidth>,
}

impl TableLayout {
    /// Compute widths as the longer of header and value plus padding,
    /// capped at [`MAX_COLUMN_WIDTH`].
    pub fn from_document(doc: &PaperDocument) -> Self {
        let columns = doc
            .iter()
            .map(|(name, value)| {
                let longest = name.chars().count().max(value.chars().count());
                ColumnWidth {
                    name: name.to_string(),
                    width: (longest + COLUMN_PADDING).min(MAX_COLUMN_WIDTH),
                }
            })
            .collect();
        Self { columns }
    }

    /// Width of the named column.
    pub fn width_of(&self, name: &str) -> Option<usize> {
        self.columns
            .iter()
            .find(|column| column.name == name)
            .map(|column| column.width)
    }
}
