//! Run settings: built-in defaults, then an optional TOML file, then flags.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use fda_core::PipelineContext;
use fda_core::context::DEFAULT_DATASET_NAME;
use fda_fetch::{DEFAULT_SOURCE_URL, RetryPolicy};
use fda_model::{DEFAULT_LEGACY_MARKER, OutputFormat, ProcessingOptions, ValidationMode};
use fda_output::DestinationKind;
use serde::Deserialize;

use crate::cli::RunArgs;

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    pub source: String,
    pub destination: DestinationKind,
    pub dataset_name: String,
    pub output_dir: PathBuf,
    pub output_format: OutputFormat,
    pub validation_mode: ValidationMode,
    /// `None` evaluates against the local date at run time.
    pub evaluation_date: Option<NaiveDate>,
    pub legacy_marker: String,
    pub ingredient_delimiter: char,
    pub retry_attempts: u32,
    pub retry_backoff_ms: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        let retry = RetryPolicy::default();
        Self {
            source: DEFAULT_SOURCE_URL.to_string(),
            destination: DestinationKind::default(),
            dataset_name: DEFAULT_DATASET_NAME.to_string(),
            output_dir: PathBuf::from("output"),
            output_format: OutputFormat::default(),
            validation_mode: ValidationMode::default(),
            evaluation_date: None,
            legacy_marker: DEFAULT_LEGACY_MARKER.to_string(),
            ingredient_delimiter: ';',
            retry_attempts: retry.max_attempts,
            retry_backoff_ms: u64::try_from(retry.base_delay.as_millis()).unwrap_or(u64::MAX),
        }
    }
}

impl RunConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).context("parse run config")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text =
            fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("load {}", path.display()))
    }

    /// Resolves settings for `args`: the `--config` file if given, then flags.
    pub fn resolve(args: &RunArgs) -> Result<Self> {
        let mut config = match &args.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply_args(args);
        config.check()?;
        Ok(config)
    }

    /// Overrides fields with every flag that was given.
    pub fn apply_args(&mut self, args: &RunArgs) {
        if let Some(source) = &args.source {
            self.source.clone_from(source);
        }
        if let Some(destination) = args.destination {
            self.destination = destination.into();
        }
        if let Some(dataset) = &args.dataset {
            self.dataset_name.clone_from(dataset);
        }
        if let Some(dir) = &args.output_dir {
            self.output_dir.clone_from(dir);
        }
        if let Some(format) = args.output_format {
            self.output_format = format.into();
        }
        if let Some(mode) = args.validation_mode {
            self.validation_mode = mode.into();
        }
        if let Some(date) = args.evaluation_date {
            self.evaluation_date = Some(date);
        }
        if let Some(marker) = &args.legacy_marker {
            self.legacy_marker.clone_from(marker);
        }
        if let Some(delimiter) = args.ingredient_delimiter {
            self.ingredient_delimiter = delimiter;
        }
        if let Some(attempts) = args.retry_attempts {
            self.retry_attempts = attempts;
        }
        if let Some(backoff) = args.retry_backoff_ms {
            self.retry_backoff_ms = backoff;
        }
    }

    fn check(&self) -> Result<()> {
        let name = self.dataset_name.trim();
        if name.is_empty() || name.contains(['/', '\\']) || name.starts_with('.') {
            bail!("invalid dataset name {:?}", self.dataset_name);
        }
        if self.legacy_marker.trim().is_empty() {
            bail!("legacy marker must not be empty");
        }
        if self.ingredient_delimiter.is_whitespace() {
            bail!("ingredient delimiter must not be whitespace");
        }
        Ok(())
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.retry_attempts,
            Duration::from_millis(self.retry_backoff_ms),
        )
    }

    pub fn processing_options(&self) -> ProcessingOptions {
        ProcessingOptions::new()
            .with_validation_mode(self.validation_mode)
            .with_legacy_marker(self.legacy_marker.clone())
            .with_ingredient_delimiter(self.ingredient_delimiter)
    }

    /// Pipeline context, evaluated on `today` unless a date was configured.
    pub fn pipeline_context(&self, today: NaiveDate) -> PipelineContext {
        PipelineContext::new(self.evaluation_date.unwrap_or(today))
            .with_dataset_name(self.dataset_name.clone())
            .with_options(self.processing_options())
    }
}
