//! Source archive retrieval.
//!
//! Fetchers turn a location (HTTP(S) URL, local zip, or a directory of
//! extracted members) into an in-memory [`SourceFiles`] snapshot. Transient
//! HTTP failures are retried with exponential backoff.

pub mod client;
pub mod error;
pub mod extract;
pub mod local;
pub mod retry;

use std::path::Path;

use fda_model::SourceFiles;

pub use client::{DEFAULT_SOURCE_URL, HttpFetcher};
pub use error::{FetchError, Result};
pub use extract::{extract_archive, is_member_file};
pub use local::LocalFetcher;
pub use retry::RetryPolicy;

/// Anything that can produce one snapshot of source members.
pub trait ArchiveFetcher {
    /// Human-readable source location for logs and errors.
    fn location(&self) -> &str;

    fn fetch(&self) -> Result<SourceFiles>;
}

/// Picks a fetcher for `location`: URLs go over HTTP, paths are read locally.
pub fn fetcher_for(location: &str, policy: RetryPolicy) -> Result<Box<dyn ArchiveFetcher>> {
    let lower = location.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        return Ok(Box::new(HttpFetcher::new(location, policy)?));
    }
    let path = Path::new(location);
    if path.exists() {
        Ok(Box::new(LocalFetcher::new(path)))
    } else {
        Err(FetchError::NotFound(location.to_string()))
    }
}
