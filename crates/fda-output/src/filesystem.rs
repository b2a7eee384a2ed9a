//! Staged, all-or-nothing filesystem destination.

use std::fs;
use std::path::{Path, PathBuf};

use fda_core::{RunOutput, gold_frame, quarantine_frame, silver_frame};
use fda_model::{OutputFormat, ValidationMode};
use fda_validate::{GOLD_PRODUCTS_V1, SILVER_PRODUCTS_V1};
use polars::prelude::DataFrame;
use tracing::{debug, info, info_span, warn};

use crate::destination::LoadAdapter;
use crate::error::{LoadError, Result};
use crate::writer::{write_csv, write_frame_jsonl, write_json, write_jsonl};

pub const RUN_SUMMARY_FILE: &str = "run_summary.json";
const QUARANTINE_TABLE: &str = "quarantine";

/// Writes `<output_dir>/<dataset>/{bronze,silver,gold}/<table>.<ext>`.
///
/// Files are written to a sibling staging directory first. The previous
/// dataset directory is replaced only after every file succeeded.
#[derive(Debug, Clone)]
pub struct FilesystemDestination {
    output_dir: PathBuf,
    format: OutputFormat,
}

impl FilesystemDestination {
    pub fn new(output_dir: impl Into<PathBuf>, format: OutputFormat) -> Self {
        Self {
            output_dir: output_dir.into(),
            format,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn dataset_dir(&self, dataset: &str) -> PathBuf {
        self.output_dir.join(dataset)
    }

    fn file(&self, dir: &Path, table: &str) -> PathBuf {
        dir.join(format!("{table}.{}", self.format.extension()))
    }

    fn write_frame(&self, dir: &Path, table: &str, frame: &mut DataFrame) -> Result<()> {
        let path = self.file(dir, table);
        match self.format {
            OutputFormat::Csv => write_csv(&path, table, frame),
            OutputFormat::Jsonl => write_frame_jsonl(&path, table, frame),
        }?;
        debug!(path = %path.display(), rows = frame.height(), "wrote table");
        Ok(())
    }

    fn write_all(&self, staging: &Path, output: &RunOutput) -> Result<()> {
        let bronze_dir = make_dir(&staging.join("bronze"))?;
        for table in &output.bronze {
            let mut frame = table.frame.clone();
            self.write_frame(&bronze_dir, &table.name, &mut frame)?;
        }

        let silver_dir = make_dir(&staging.join("silver"))?;
        let silver_table = SILVER_PRODUCTS_V1.table();
        match self.format {
            OutputFormat::Csv => {
                let mut frame = silver_frame(&output.silver)
                    .map_err(|e| LoadError::frame(silver_table, &e))?;
                self.write_frame(&silver_dir, silver_table, &mut frame)?;
            }
            OutputFormat::Jsonl => {
                write_jsonl(&self.file(&silver_dir, silver_table), silver_table, &output.silver)?;
            }
        }

        let gold_dir = make_dir(&staging.join("gold"))?;
        let gold_table = GOLD_PRODUCTS_V1.table();
        match self.format {
            OutputFormat::Csv => {
                let mut frame =
                    gold_frame(&output.gold).map_err(|e| LoadError::frame(gold_table, &e))?;
                self.write_frame(&gold_dir, gold_table, &mut frame)?;
            }
            OutputFormat::Jsonl => {
                write_jsonl(&self.file(&gold_dir, gold_table), gold_table, &output.gold)?;
            }
        }

        if output.summary.validation_mode == ValidationMode::Quarantine {
            match self.format {
                OutputFormat::Csv => {
                    let mut frame = quarantine_frame(&output.quarantined)
                        .map_err(|e| LoadError::frame(QUARANTINE_TABLE, &e))?;
                    self.write_frame(staging, QUARANTINE_TABLE, &mut frame)?;
                }
                OutputFormat::Jsonl => {
                    write_jsonl(
                        &self.file(staging, QUARANTINE_TABLE),
                        QUARANTINE_TABLE,
                        &output.quarantined,
                    )?;
                }
            }
        }

        write_json(&staging.join(RUN_SUMMARY_FILE), "run_summary", &output.summary)
    }
}

impl LoadAdapter for FilesystemDestination {
    fn name(&self) -> &'static str {
        "filesystem"
    }

    fn commit(&mut self, output: &RunOutput) -> Result<()> {
        let dataset = &output.summary.dataset;
        let span = info_span!("load", destination = self.name(), dataset = %dataset);
        let _guard = span.enter();

        make_dir(&self.output_dir)?;
        let target = self.dataset_dir(dataset);
        let staging = self.output_dir.join(format!(".{dataset}.staging"));
        let previous = self.output_dir.join(format!(".{dataset}.previous"));
        remove_if_present(&staging)?;
        remove_if_present(&previous)?;

        make_dir(&staging)?;
        if let Err(err) = self.write_all(&staging, output) {
            if let Err(cleanup) = fs::remove_dir_all(&staging) {
                warn!(path = %staging.display(), error = %cleanup, "failed to remove staging directory");
            }
            return Err(err);
        }

        if target.exists() {
            fs::rename(&target, &previous).map_err(|e| LoadError::io(&target, e))?;
        }
        if let Err(err) = fs::rename(&staging, &target) {
            if previous.exists() && fs::rename(&previous, &target).is_err() {
                warn!(path = %previous.display(), "previous output left in place");
            }
            return Err(LoadError::io(&target, err));
        }
        remove_if_present(&previous)?;

        info!(path = %target.display(), format = self.format.extension(), "run committed");
        Ok(())
    }
}

fn make_dir(path: &Path) -> Result<PathBuf> {
    fs::create_dir_all(path).map_err(|e| LoadError::io(path, e))?;
    Ok(path.to_path_buf())
}

fn remove_if_present(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_dir_all(path).map_err(|e| LoadError::io(path, e))?;
    }
    Ok(())
}
