use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::PipelineError;
use crate::pipeline::Stage;

/// Cooperative cancellation, checked at stage boundaries.
///
/// Clones share one flag, so a handle can be moved to a signal handler or
/// another thread while the run holds its own.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Errors with [`PipelineError::Cancelled`] if cancellation was requested.
    pub fn check(&self, stage: Stage) -> Result<(), PipelineError> {
        if self.is_cancelled() {
            return Err(PipelineError::Cancelled {
                stage: stage.name(),
            });
        }
        Ok(())
    }
}
