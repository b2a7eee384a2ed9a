use thiserror::Error;

use crate::issue::Issue;

/// A record that failed its contract in fail-fast mode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{contract}: record {natural_key} failed validation: {issue}")]
pub struct ValidationError {
    pub contract: &'static str,
    pub natural_key: String,
    /// First violation found.
    pub issue: Issue,
    /// Every violation on the record.
    pub issues: Vec<Issue>,
}
