//! Decoding and parsing of tab-delimited members.

use std::borrow::Cow;

use csv::ReaderBuilder;
use encoding_rs::WINDOWS_1252;
use fda_model::SourceTable;

use crate::batch::{BatchOrigin, RawBatch};
use crate::error::{IngestError, Result};

use super::header::normalize_header;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Encoding a member was decoded with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceEncoding {
    Utf8,
    Windows1252,
}

impl SourceEncoding {
    pub fn as_str(self) -> &'static str {
        match self {
            SourceEncoding::Utf8 => "utf-8",
            SourceEncoding::Windows1252 => "windows-1252",
        }
    }
}

/// Decodes member bytes as UTF-8, falling back to Windows-1252.
///
/// A leading UTF-8 byte order mark is dropped.
pub fn decode_text(bytes: &[u8]) -> (Cow<'_, str>, SourceEncoding) {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(text) => (Cow::Borrowed(text), SourceEncoding::Utf8),
        Err(_) => {
            let (text, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
            (text, SourceEncoding::Windows1252)
        }
    }
}

/// Splits decoded text into records. Fully blank lines are dropped.
///
/// Quoting is off: the publisher never quotes, and stray `"` characters in
/// strengths such as `12.5"` must survive.
pub fn parse_rows(table: SourceTable, text: &str) -> Result<Vec<Vec<String>>> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .quoting(false)
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| IngestError::Parse { table, source })?;
        let row: Vec<String> = record.iter().map(str::to_string).collect();
        if row.iter().all(|value| value.trim().is_empty()) {
            continue;
        }
        rows.push(row);
    }
    Ok(rows)
}

/// Reads one member into a [`RawBatch`].
///
/// The first non-blank line is the header. Rows shorter than the header are
/// padded with empty cells; longer rows are truncated. An empty member
/// yields an empty batch carrying the table's required columns.
pub fn read_raw_batch(table: SourceTable, file_name: &str, bytes: &[u8]) -> Result<RawBatch> {
    let (text, encoding) = decode_text(bytes);
    if encoding == SourceEncoding::Windows1252 {
        tracing::debug!(table = %table, "decoded member as windows-1252");
    }
    let origin = BatchOrigin::File {
        name: file_name.to_string(),
        encoding,
    };

    let mut rows = parse_rows(table, &text)?.into_iter();
    let Some(header_row) = rows.next() else {
        tracing::warn!(table = %table, file = file_name, "source member is empty");
        return RawBatch::empty(table, origin);
    };

    let headers: Vec<String> = header_row.iter().map(|cell| normalize_header(cell)).collect();
    let width = headers.len();
    let mut ragged = 0usize;
    let body: Vec<Vec<String>> = rows
        .map(|mut row| {
            if row.len() != width {
                ragged += 1;
                row.resize(width, String::new());
            }
            row
        })
        .collect();
    if ragged > 0 {
        tracing::warn!(table = %table, rows = ragged, width, "ragged rows fitted to header width");
    }

    RawBatch::from_rows(table, origin, headers, body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_strips_bom() {
        let (text, encoding) = decode_text(b"\xEF\xBB\xBFApplNo\n");
        assert_eq!(text, "ApplNo\n");
        assert_eq!(encoding, SourceEncoding::Utf8);
    }

    #[test]
    fn decode_falls_back_to_windows_1252() {
        // 0xE9 is e-acute in Windows-1252 and invalid as lone UTF-8.
        let (text, encoding) = decode_text(b"Caf\xE9");
        assert_eq!(text, "Caf\u{e9}");
        assert_eq!(encoding, SourceEncoding::Windows1252);
    }

    #[test]
    fn quotes_are_literal() {
        let rows = parse_rows(SourceTable::Products, "a\tb\n\"x\t12\"\n").unwrap();
        assert_eq!(rows[1], vec!["\"x".to_string(), "12\"".to_string()]);
    }

    #[test]
    fn blank_lines_are_skipped() {
        let rows = parse_rows(SourceTable::Te, "a\tb\n\t\n1\t2\n").unwrap();
        assert_eq!(rows.len(), 2);
    }
}
