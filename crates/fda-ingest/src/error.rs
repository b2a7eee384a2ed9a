//! Error types for Drugs@FDA ingestion.

use fda_model::SourceTable;
use thiserror::Error;

/// Errors that can occur while reading source tables.
#[derive(Debug, Error)]
pub enum IngestError {
    /// A mandatory member file is absent from the snapshot.
    #[error("mandatory source file {file} for table {table} is missing")]
    MissingTable {
        table: SourceTable,
        file: &'static str,
    },

    /// A required column is absent after header normalization.
    #[error("schema mismatch: table {table} has no column '{column}'")]
    MissingColumn {
        table: SourceTable,
        column: &'static str,
    },

    /// A header cell is blank.
    #[error("table {table} has an empty column name at position {position}")]
    EmptyColumnName { table: SourceTable, position: usize },

    /// Two header cells normalize to the same name.
    #[error("table {table} has duplicate column '{column}'")]
    DuplicateColumn { table: SourceTable, column: String },

    /// The tab-delimited parser rejected the content.
    #[error("failed to parse table {table}: {source}")]
    Parse {
        table: SourceTable,
        #[source]
        source: csv::Error,
    },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

impl IngestError {
    /// Table the error refers to, when there is one.
    pub fn table(&self) -> Option<SourceTable> {
        match self {
            IngestError::MissingTable { table, .. }
            | IngestError::MissingColumn { table, .. }
            | IngestError::EmptyColumnName { table, .. }
            | IngestError::DuplicateColumn { table, .. }
            | IngestError::Parse { table, .. } => Some(*table),
            IngestError::DataFrame { .. } => None,
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::MissingColumn {
            table: SourceTable::Te,
            column: "te_code",
        };
        assert_eq!(
            err.to_string(),
            "schema mismatch: table te has no column 'te_code'"
        );
        assert_eq!(err.table(), Some(SourceTable::Te));
    }

    #[test]
    fn test_error_from_polars() {
        let polars_err = polars::prelude::PolarsError::ColumnNotFound("appl_no".into());
        let ingest_err: IngestError = polars_err.into();
        assert!(matches!(ingest_err, IngestError::DataFrame { .. }));
        assert_eq!(ingest_err.table(), None);
    }
}
