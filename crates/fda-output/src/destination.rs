use std::path::PathBuf;

use fda_core::RunOutput;
use fda_model::OutputFormat;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;
use crate::filesystem::FilesystemDestination;

/// A place a completed run is committed to.
pub trait LoadAdapter {
    fn name(&self) -> &'static str;

    /// Commits every layer of `output`, or nothing on error.
    fn commit(&mut self, output: &RunOutput) -> Result<()>;
}

/// Configured destination identifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DestinationKind {
    #[default]
    Filesystem,
    /// Run the pipeline without writing anything.
    None,
}

impl DestinationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DestinationKind::Filesystem => "filesystem",
            DestinationKind::None => "none",
        }
    }
}

/// Accepts a run and discards it.
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunDestination;

impl LoadAdapter for DryRunDestination {
    fn name(&self) -> &'static str {
        DestinationKind::None.as_str()
    }

    fn commit(&mut self, output: &RunOutput) -> Result<()> {
        info!(
            dataset = %output.summary.dataset,
            silver = output.silver.len(),
            gold = output.gold.len(),
            "dry run, nothing written"
        );
        Ok(())
    }
}

pub fn destination_for(
    kind: DestinationKind,
    output_dir: impl Into<PathBuf>,
    format: OutputFormat,
) -> Box<dyn LoadAdapter> {
    match kind {
        DestinationKind::Filesystem => Box::new(FilesystemDestination::new(output_dir, format)),
        DestinationKind::None => Box::new(DryRunDestination),
    }
}
