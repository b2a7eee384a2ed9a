use fda_ingest::IngestError;
use fda_model::FormatError;
use fda_validate::ValidationError;
use thiserror::Error;

/// Errors that abort a run before any output is committed.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A source table could not be read or failed its schema check.
    #[error(transparent)]
    Ingest(#[from] IngestError),

    /// Malformed identifier under fail-fast validation.
    #[error("{source} (raw key {raw_key})")]
    Format {
        #[source]
        source: FormatError,
        raw_key: String,
    },

    /// Record failed its output contract under fail-fast validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Cancellation was requested before `stage` started.
    #[error("run cancelled before stage {stage}")]
    Cancelled { stage: &'static str },

    /// Gold did not produce exactly one record per Silver record.
    #[error("gold produced {gold} records for {silver} silver records")]
    Cardinality { silver: usize, gold: usize },
}

impl PipelineError {
    /// Short error kind for failed-run reports.
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::Ingest(IngestError::MissingColumn { .. }) => "schema",
            PipelineError::Ingest(_) => "ingest",
            PipelineError::Format { .. } => "format",
            PipelineError::Validation(_) => "validation",
            PipelineError::Cancelled { .. } => "cancelled",
            PipelineError::Cardinality { .. } => "cardinality",
        }
    }

    /// Table the failure was detected in, when known.
    pub fn table(&self) -> Option<String> {
        match self {
            PipelineError::Ingest(err) => err.table().map(|table| table.name().to_string()),
            PipelineError::Format { source, .. } => Some(source.table.name().to_string()),
            PipelineError::Validation(err) => Some(
                err.contract
                    .split('.')
                    .next()
                    .unwrap_or(err.contract)
                    .to_string(),
            ),
            PipelineError::Cancelled { .. } | PipelineError::Cardinality { .. } => None,
        }
    }

    /// Natural key of the offending record, when known.
    pub fn natural_key(&self) -> Option<String> {
        match self {
            PipelineError::Format { raw_key, .. } => Some(raw_key.clone()),
            PipelineError::Validation(err) => Some(err.natural_key.clone()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
