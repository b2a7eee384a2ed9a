//! Error types for archive retrieval.

use thiserror::Error;

/// Errors that can occur while obtaining the source archive.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FetchError {
    /// Network request failed before a response arrived.
    #[error("network error: {0}")]
    Network(String),

    /// Server answered with a non-success status.
    #[error("download failed with status {status}")]
    Status { status: u16 },

    /// Server returned an HTML page instead of the archive.
    #[error("received an HTML page instead of the archive (anti-automation screening?)")]
    Blocked,

    /// Local source path does not exist.
    #[error("source not found: {0}")]
    NotFound(String),

    /// I/O error while reading a local source.
    #[error("I/O error: {0}")]
    Io(String),

    /// Archive could not be read.
    #[error("archive extraction error: {0}")]
    ArchiveExtraction(String),

    /// Every attempt failed with a retryable error.
    #[error("no input available after {attempts} attempts: {last}")]
    Exhausted {
        attempts: u32,
        #[source]
        last: Box<FetchError>,
    },
}

impl FetchError {
    /// Whether another attempt could succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) | Self::Blocked => true,
            Self::Status { status } => matches!(status, 403 | 408 | 429) || *status >= 500,
            Self::NotFound(_)
            | Self::Io(_)
            | Self::ArchiveExtraction(_)
            | Self::Exhausted { .. } => false,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

impl From<std::io::Error> for FetchError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<zip::result::ZipError> for FetchError {
    fn from(err: zip::result::ZipError) -> Self {
        Self::ArchiveExtraction(err.to_string())
    }
}

/// Result type alias for fetch operations.
pub type Result<T> = std::result::Result<T, FetchError>;
