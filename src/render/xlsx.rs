//! Excel workbook export.
//!
//! The workbook holds one sheet with the header row and the value row of the
//! single-row table, each column sized by [`TableLayout`].

use std::path::Path;

use rust_xlsxwriter::{Format, Workbook};

use crate::error::{Error, Result};
use crate::model::PaperDocument;

use super::table::TableLayout;

/// Name of the worksheet.
pub const SHEET_NAME: &str = "Extracted Data";

fn build_workbook(doc: &PaperDocument) -> Result<Workbook> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    let header = Format::new().set_bold();
    let layout = TableLayout::from_document(doc);

    for (index, ((name, value), column)) in doc.iter().zip(&layout.columns).enumerate() {
        let col = u16::try_from(index)
            .map_err(|_| Error::Render(format!("too many columns for a worksheet: {}", doc.len())))?;
        worksheet.write_string_with_format(0, col, name, &header)?;
        worksheet.write_string(1, col, value)?;
        worksheet.set_column_width(col, column.width as f64)?;
    }

    log::debug!("Workbook with {} column(s)", layout.columns.len());
    Ok(workbook)
}

/// Render a document as an xlsx workbook in memory.
pub fn to_xlsx(doc: &PaperDocument) -> Result<Vec<u8>> {
    let mut workbook = build_workbook(doc)?;
    Ok(workbook.save_to_buffer()?)
}

/// Write a document as an xlsx workbook file.
pub fn write_xlsx<P: AsRef<Path>>(doc: &PaperDocument, path: P) -> Result<()> {
    let mut workbook = build_workbook(doc)?;
    workbook.save(path.as_ref())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PaperDocument {
        let mut doc = PaperDocument::new();
        doc.insert("Title", "Graphs, Trees");
        doc.insert("Authors", "Ada\nGrace");
        doc.insert("Abstract", "x".repeat(80));
        doc
    }

    #[test]
    fn test_to_xlsx_is_zip_container() {
        let bytes = to_xlsx(&sample()).unwrap();
        assert!(bytes.starts_with(b"PK\x03\x04"));
    }

    #[test]
    fn test_empty_document_still_writes_workbook() {
        let bytes = to_xlsx(&PaperDocument::new()).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn test_write_xlsx_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("paper.xlsx");
        write_xlsx(&sample(), &path).unwrap();

        let written = std::fs::read(&path).unwrap();
        assert!(written.starts_with(b"PK\x03\x04"));
    }
}
