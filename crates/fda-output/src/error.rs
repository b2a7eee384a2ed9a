use std::path::PathBuf;

use polars::prelude::PolarsError;
use thiserror::Error;

/// Destination failures. Any of these leaves previously committed output untouched.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to build {table} table: {message}")]
    Frame { table: String, message: String },

    #[error("failed to serialize {table}: {source}")]
    Serialize {
        table: String,
        #[source]
        source: serde_json::Error,
    },
}

impl LoadError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn frame(table: impl Into<String>, err: &PolarsError) -> Self {
        Self::Frame {
            table: table.into(),
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LoadError>;
