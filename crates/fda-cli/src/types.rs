use std::path::PathBuf;

use fda_model::RunSummary;

/// What a successful run produced and where it went.
#[derive(Debug)]
pub struct RunReport {
    pub source: String,
    pub destination: &'static str,
    /// Dataset directory for the filesystem destination.
    pub output_path: Option<PathBuf>,
    pub summary: RunSummary,
}
