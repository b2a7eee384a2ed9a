//! Configuration options for a medallion run.

use serde::{Deserialize, Serialize};

/// What to do with a record that fails its output contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValidationMode {
    /// Abort the batch on the first invalid record.
    #[default]
    FailFast,
    /// Route invalid records to the quarantine channel and continue.
    Quarantine,
}

impl ValidationMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ValidationMode::FailFast => "fail-fast",
            ValidationMode::Quarantine => "quarantine",
        }
    }
}

/// Serialization used by the filesystem destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Jsonl,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Jsonl => "jsonl",
        }
    }
}

/// Default marker the publisher writes instead of a pre-1982 approval date.
pub const DEFAULT_LEGACY_MARKER: &str = "Approved prior to Jan 1, 1982";

/// Options controlling normalization and validation behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingOptions {
    pub validation_mode: ValidationMode,

    /// Text that stands in for a date before the legacy cutoff.
    pub legacy_marker: String,

    /// Separator between active ingredients in the product table.
    pub ingredient_delimiter: char,
}

impl Default for ProcessingOptions {
    fn default() -> Self {
        Self {
            validation_mode: ValidationMode::FailFast,
            legacy_marker: DEFAULT_LEGACY_MARKER.to_string(),
            ingredient_delimiter: ';',
        }
    }
}

impl ProcessingOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_validation_mode(mut self, mode: ValidationMode) -> Self {
        self.validation_mode = mode;
        self
    }

    pub fn with_legacy_marker(mut self, marker: impl Into<String>) -> Self {
        self.legacy_marker = marker.into();
        self
    }

    pub fn with_ingredient_delimiter(mut self, delimiter: char) -> Self {
        self.ingredient_delimiter = delimiter;
        self
    }
}
