//! String-typed columnar batch for one source table.

use std::collections::BTreeSet;

use fda_common::{column_strings, column_value_string, string_column};
use fda_model::SourceTable;
use polars::prelude::*;

use crate::csv::SourceEncoding;
use crate::error::{IngestError, Result};

/// Where a batch came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOrigin {
    /// Parsed from an archive member.
    File {
        name: String,
        encoding: SourceEncoding,
    },
    /// Synthesized empty table for an absent auxiliary member.
    Substituted,
}

/// One raw source table. Every cell is a string exactly as read.
#[derive(Debug, Clone)]
pub struct RawBatch {
    table: SourceTable,
    origin: BatchOrigin,
    frame: DataFrame,
}

impl RawBatch {
    /// Builds a batch from a normalized header and width-fitted rows.
    pub fn from_rows(
        table: SourceTable,
        origin: BatchOrigin,
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    ) -> Result<Self> {
        let mut seen = BTreeSet::new();
        for (position, name) in headers.iter().enumerate() {
            if name.is_empty() {
                return Err(IngestError::EmptyColumnName { table, position });
            }
            if !seen.insert(name.as_str()) {
                return Err(IngestError::DuplicateColumn {
                    table,
                    column: name.clone(),
                });
            }
        }

        let mut columns: Vec<Vec<String>> = vec![Vec::with_capacity(rows.len()); headers.len()];
        for row in rows {
            for (idx, value) in row.into_iter().enumerate().take(headers.len()) {
                columns[idx].push(value);
            }
        }
        let columns: Vec<Column> = headers
            .iter()
            .zip(columns)
            .map(|(name, values)| string_column(name, values))
            .collect();
        let frame = DataFrame::new(columns)?;
        Ok(Self {
            table,
            origin,
            frame,
        })
    }

    /// An empty batch with the table's required columns.
    pub fn empty(table: SourceTable, origin: BatchOrigin) -> Result<Self> {
        let headers = table
            .required_columns()
            .iter()
            .map(|column| (*column).to_string())
            .collect();
        Self::from_rows(table, origin, headers, Vec::new())
    }

    pub fn table(&self) -> SourceTable {
        self.table
    }

    pub fn origin(&self) -> &BatchOrigin {
        &self.origin
    }

    pub fn is_substituted(&self) -> bool {
        matches!(self.origin, BatchOrigin::Substituted)
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.frame.column(name).is_ok()
    }

    /// Fails with a schema mismatch on the first absent required column.
    pub fn require_columns(&self) -> Result<()> {
        for column in self.table.required_columns() {
            if !self.has_column(column) {
                return Err(IngestError::MissingColumn {
                    table: self.table,
                    column,
                });
            }
        }
        Ok(())
    }

    /// Cell text; absent columns read as "".
    pub fn value(&self, column: &str, ordinal: usize) -> String {
        column_value_string(&self.frame, column, ordinal)
    }

    /// Whole column as text; an absent column reads as all "".
    pub fn column_values(&self, column: &str) -> Vec<String> {
        column_strings(&self.frame, column).unwrap_or_else(|| vec![String::new(); self.height()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_origin() -> BatchOrigin {
        BatchOrigin::File {
            name: "TE.txt".to_string(),
            encoding: SourceEncoding::Utf8,
        }
    }

    #[test]
    fn rejects_duplicate_columns() {
        let result = RawBatch::from_rows(
            SourceTable::Te,
            file_origin(),
            vec!["appl_no".to_string(), "appl_no".to_string()],
            Vec::new(),
        );
        assert!(matches!(result, Err(IngestError::DuplicateColumn { .. })));
    }

    #[test]
    fn rejects_blank_header() {
        let result = RawBatch::from_rows(
            SourceTable::Te,
            file_origin(),
            vec!["appl_no".to_string(), String::new()],
            Vec::new(),
        );
        assert!(matches!(
            result,
            Err(IngestError::EmptyColumnName { position: 1, .. })
        ));
    }

    #[test]
    fn empty_batch_has_required_columns() {
        let batch = RawBatch::empty(SourceTable::Exclusivity, BatchOrigin::Substituted).unwrap();
        assert_eq!(batch.height(), 0);
        assert!(batch.is_substituted());
        batch.require_columns().unwrap();
    }

    #[test]
    fn values_read_by_column() {
        let batch = RawBatch::from_rows(
            SourceTable::Te,
            file_origin(),
            vec![
                "appl_no".to_string(),
                "product_no".to_string(),
                "te_code".to_string(),
            ],
            vec![vec!["1".to_string(), "2".to_string(), "AB".to_string()]],
        )
        .unwrap();
        assert_eq!(batch.value("te_code", 0), "AB");
        assert_eq!(batch.value("te_code", 1), "");
        assert_eq!(batch.column_values("missing"), [""]);
    }

    #[test]
    fn missing_required_column_is_reported() {
        let batch = RawBatch::from_rows(
            SourceTable::Te,
            file_origin(),
            vec!["appl_no".to_string(), "product_no".to_string()],
            Vec::new(),
        )
        .unwrap();
        let err = batch.require_columns().unwrap_err();
        assert!(matches!(
            err,
            IngestError::MissingColumn {
                column: "te_code",
                ..
            }
        ));
    }
}
