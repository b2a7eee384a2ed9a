//! CSV and JSON Lines writers.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use fda_common::column_value_string;
use polars::prelude::{CsvWriter, DataFrame, SerWriter};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{LoadError, Result};

fn create(path: &Path) -> Result<BufWriter<File>> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|e| LoadError::io(path, e))
}

/// Writes a frame as comma-separated text with a header row.
pub fn write_csv(path: &Path, table: &str, frame: &mut DataFrame) -> Result<()> {
    let mut out = create(path)?;
    CsvWriter::new(&mut out)
        .include_header(true)
        .finish(frame)
        .map_err(|e| LoadError::frame(table, &e))?;
    out.flush().map_err(|e| LoadError::io(path, e))
}

/// Writes one JSON object per record.
pub fn write_jsonl<T: Serialize>(path: &Path, table: &str, records: &[T]) -> Result<()> {
    let mut out = create(path)?;
    for record in records {
        serde_json::to_writer(&mut out, record).map_err(|source| LoadError::Serialize {
            table: table.to_string(),
            source,
        })?;
        out.write_all(b"\n").map_err(|e| LoadError::io(path, e))?;
    }
    out.flush().map_err(|e| LoadError::io(path, e))
}

/// Writes a string-typed frame as JSON Lines, one object per row.
pub fn write_frame_jsonl(path: &Path, table: &str, frame: &DataFrame) -> Result<()> {
    let names: Vec<String> = frame
        .get_column_names()
        .into_iter()
        .map(|name| name.to_string())
        .collect();
    let rows: Vec<Map<String, Value>> = (0..frame.height())
        .map(|idx| {
            names
                .iter()
                .map(|name| {
                    let value = column_value_string(frame, name, idx);
                    (name.clone(), Value::String(value))
                })
                .collect()
        })
        .collect();
    write_jsonl(path, table, &rows)
}

/// Pretty-printed single JSON document.
pub fn write_json<T: Serialize>(path: &Path, table: &str, value: &T) -> Result<()> {
    let mut out = create(path)?;
    serde_json::to_writer_pretty(&mut out, value).map_err(|source| LoadError::Serialize {
        table: table.to_string(),
        source,
    })?;
    out.write_all(b"\n").map_err(|e| LoadError::io(path, e))?;
    out.flush().map_err(|e| LoadError::io(path, e))
}
