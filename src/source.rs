//! Character stream sources.
//!
//! Glyph extraction from PDF files is left to an external tool; this module
//! loads the character dumps such tools produce (see [`InputFormat`]) and
//! checks them before they reach the structure engine.

use std::fs;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::detect::{detect_format_from_bytes, InputFormat};
use crate::error::{Error, Result};
use crate::model::Character;

/// Anything that can produce the full character stream of one document.
pub trait CharacterSource {
    /// Produce every character of the document.
    fn characters(&mut self) -> Result<Vec<Character>>;
}

impl CharacterSource for Vec<Character> {
    fn characters(&mut self) -> Result<Vec<Character>> {
        Ok(std::mem::take(self))
    }
}

/// A serialized character dump held in memory.
#[derive(Debug, Clone)]
pub struct JsonDump {
    data: Vec<u8>,
}

impl JsonDump {
    /// Wrap raw dump bytes.
    pub fn from_bytes(data: impl Into<Vec<u8>>) -> Self {
        Self { data: data.into() }
    }

    /// Read a dump from a reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Ok(Self { data })
    }

    /// Read a dump from a file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self {
            data: fs::read(path)?,
        })
    }

    /// The detected dump layout.
    pub fn format(&self) -> Result<InputFormat> {
        detect_format_from_bytes(&self.data)
    }
}

impl CharacterSource for JsonDump {
    fn characters(&mut self) -> Result<Vec<Character>> {
        decode_characters(&self.data)
    }
}

#[derive(Deserialize)]
struct PagedDump {
    pages: Vec<Vec<Character>>,
}

/// Decode and validate a character dump in any supported layout.
pub fn decode_characters(data: &[u8]) -> Result<Vec<Character>> {
    let format = detect_format_from_bytes(data)?;
    log::debug!("Decoding character dump as {}", format);

    let chars = match format {
        InputFormat::JsonArray => serde_json::from_slice(strip_bom(data))?,
        InputFormat::JsonLines => decode_json_lines(strip_bom(data))?,
        InputFormat::PagedJson => {
            let dump: PagedDump = serde_json::from_slice(strip_bom(data))?;
            (1u32..)
                .zip(dump.pages)
                .flat_map(|(number, page)| {
                    page.into_iter().map(move |mut c| {
                        if c.page == 0 {
                            c.page = number;
                        }
                        c
                    })
                })
                .collect()
        }
    };

    validate_characters(&chars)?;
    Ok(chars)
}

fn strip_bom(data: &[u8]) -> &[u8] {
    data.strip_prefix(b"\xEF\xBB\xBF".as_slice()).unwrap_or(data)
}

fn decode_json_lines(data: &[u8]) -> Result<Vec<Character>> {
    data.split(|&b| b == b'\n')
        .filter(|line| line.iter().any(|b| !b.is_ascii_whitespace()))
        .map(|line| serde_json::from_slice(line).map_err(Error::from))
        .collect()
}

/// Reject characters whose position or size is not a finite number.
pub fn validate_characters(chars: &[Character]) -> Result<()> {
    for (index, c) in chars.iter().enumerate() {
        if let Some(field) = c.non_finite_field() {
            return Err(Error::InvalidCharacter {
                index,
                page: c.page,
                reason: format!("{} is not a finite number", field),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_array() {
        let data = br#"[{"text": "A", "page_number": 1, "top": 10.0, "x0": 5.0, "size": 12.0, "fontname": "Helvetica"}]"#;
        let chars = decode_characters(data).unwrap();
        assert_eq!(chars.len(), 1);
        assert_eq!(chars[0].page, 1);
        assert_eq!(chars[0].text, "A");
    }

    #[test]
    fn test_decode_json_lines() {
        let data = b"{\"text\": \"a\", \"top\": 1, \"x0\": 1, \"size\": 12}\n\n{\"text\": \"b\", \"top\": 1, \"x0\": 2, \"size\": 12}\n";
        let chars = decode_characters(data).unwrap();
        assert_eq!(chars.len(), 2);
        assert_eq!(chars[1].text, "b");
    }

    #[test]
    fn test_decode_paged_assigns_page_numbers() {
        let data = br#"{"pages": [
            [{"text": "a", "top": 1, "x0": 1, "size": 12}],
            [{"text": "b", "top": 1, "x0": 1, "size": 12},
             {"text": "c", "page": 7, "top": 1, "x0": 2, "size": 12}]
        ]}"#;
        let chars = decode_characters(data).unwrap();
        assert_eq!(chars.iter().map(|c| c.page).collect::<Vec<_>>(), vec![1, 2, 7]);
    }

    #[test]
    fn test_decode_rejects_pdf() {
        let result = decode_characters(b"%PDF-1.4\n1 0 obj");
        assert!(matches!(result, Err(Error::PdfInput(_))));
    }

    #[test]
    fn test_decode_malformed_json() {
        let result = decode_characters(br#"[{"text": "a", "top": }]"#);
        assert!(matches!(result, Err(Error::Json(_))));
    }

    #[test]
    fn test_validate_rejects_non_finite() {
        let chars = vec![
            Character::new("a", 1, 1.0, 1.0, 12.0, "F"),
            Character::new("b", 2, f64::NAN, 1.0, 12.0, "F"),
        ];
        let err = validate_characters(&chars).unwrap_err();
        assert!(matches!(err, Error::InvalidCharacter { index: 1, page: 2, .. }));
    }

    #[test]
    fn test_vec_source_drains() {
        let mut source = vec![Character::new("a", 1, 1.0, 1.0, 12.0, "F")];
        assert_eq!(source.characters().unwrap().len(), 1);
        assert!(source.characters().unwrap().is_empty());
    }

    #[test]
    fn test_json_dump_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chars.json");
        fs::write(&path, br#"[{"text": "x", "top": 1, "x0": 1, "size": 9}]"#).unwrap();

        let mut dump = JsonDump::open(&path).unwrap();
        assert_eq!(dump.format().unwrap(), InputFormat::JsonArray);
        assert_eq!(dump.characters().unwrap().len(), 1);
    }
}
