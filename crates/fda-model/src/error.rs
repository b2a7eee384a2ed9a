use thiserror::Error;

use crate::table::SourceTable;

/// Why an identifier field could not be padded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    #[error("identifier is empty")]
    Empty,
    #[error("identifier {value:?} contains non-digit characters")]
    NonNumeric { value: String },
    #[error("identifier {value:?} is wider than {width} digits")]
    TooWide { value: String, width: usize },
}

/// A malformed identifier in a source row.
///
/// Carries enough context to locate the offending row in the raw extract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{table} row {ordinal}: field {field}: {source}")]
pub struct FormatError {
    pub table: SourceTable,
    pub ordinal: usize,
    pub field: &'static str,
    #[source]
    pub source: IdentifierError,
}

impl FormatError {
    pub fn new(
        table: SourceTable,
        ordinal: usize,
        field: &'static str,
        source: IdentifierError,
    ) -> Self {
        Self {
            table,
            ordinal,
            field,
            source,
        }
    }
}
