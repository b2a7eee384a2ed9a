//! CLI argument definitions for the medallion runner.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use fda_model::{OutputFormat, ValidationMode};
use fda_output::DestinationKind;

#[derive(Parser)]
#[command(
    name = "fda-medallion",
    version,
    about = "Drugs@FDA medallion engine - Bronze, Silver and Gold product tables",
    long_about = "Fetch the Drugs@FDA extract and refine it into layered tables.\n\n\
                  Bronze keeps every source table as published, Silver holds one\n\
                  validated record per product, Gold adds enrichment and flags."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Fetch, refine and load one snapshot.
    Run(RunArgs),
}

/// Every flag is optional; unset flags fall back to the config file, then defaults.
#[derive(Debug, Default, Parser)]
pub struct RunArgs {
    /// TOML file with run settings.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Archive URL, local zip file, or directory of extracted members.
    #[arg(long = "source", value_name = "URL_OR_PATH")]
    pub source: Option<String>,

    /// Where to load the run.
    #[arg(long = "destination", value_enum)]
    pub destination: Option<DestinationArg>,

    /// Target dataset name.
    #[arg(long = "dataset", value_name = "NAME")]
    pub dataset: Option<String>,

    /// Root directory for the filesystem destination.
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Output file format.
    #[arg(long = "output-format", value_enum)]
    pub output_format: Option<OutputFormatArg>,

    /// How invalid records are handled.
    #[arg(long = "validation-mode", value_enum)]
    pub validation_mode: Option<ValidationModeArg>,

    /// Date exclusivity protection is evaluated against (default: today).
    #[arg(long = "evaluation-date", value_name = "YYYY-MM-DD")]
    pub evaluation_date: Option<NaiveDate>,

    /// Source text marking approvals that predate electronic records.
    #[arg(long = "legacy-marker", value_name = "TEXT")]
    pub legacy_marker: Option<String>,

    /// Separator between active ingredients.
    #[arg(long = "ingredient-delimiter", value_name = "CHAR")]
    pub ingredient_delimiter: Option<char>,

    /// Total fetch attempts, including the first.
    #[arg(long = "retry-attempts", value_name = "N")]
    pub retry_attempts: Option<u32>,

    /// Backoff before the second fetch attempt, in milliseconds.
    #[arg(long = "retry-backoff-ms", value_name = "MS")]
    pub retry_backoff_ms: Option<u64>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DestinationArg {
    Filesystem,
    None,
}

impl From<DestinationArg> for DestinationKind {
    fn from(arg: DestinationArg) -> Self {
        match arg {
            DestinationArg::Filesystem => DestinationKind::Filesystem,
            DestinationArg::None => DestinationKind::None,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Csv,
    Jsonl,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Csv => OutputFormat::Csv,
            OutputFormatArg::Jsonl => OutputFormat::Jsonl,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ValidationModeArg {
    FailFast,
    Quarantine,
}

impl From<ValidationModeArg> for ValidationMode {
    fn from(arg: ValidationModeArg) -> Self {
        match arg {
            ValidationModeArg::FailFast => ValidationMode::FailFast,
            ValidationModeArg::Quarantine => ValidationMode::Quarantine,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
