use fda_core::RunOutput;

use crate::destination::LoadAdapter;
use crate::error::Result;

/// Keeps committed runs in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryDestination {
    commits: Vec<RunOutput>,
}

impl MemoryDestination {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commits(&self) -> &[RunOutput] {
        &self.commits
    }

    pub fn last(&self) -> Option<&RunOutput> {
        self.commits.last()
    }
}

impl LoadAdapter for MemoryDestination {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn commit(&mut self, output: &RunOutput) -> Result<()> {
        self.commits.push(output.clone());
        Ok(())
    }
}
