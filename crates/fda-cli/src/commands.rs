use std::time::Instant;

use anyhow::{Context, Result};
use fda_core::{CancellationToken, run_pipeline};
use fda_fetch::fetcher_for;
use fda_output::{DestinationKind, destination_for};
use tracing::{info, info_span};

use fda_cli::cli::RunArgs;
use fda_cli::config::RunConfig;

use crate::types::RunReport;

pub fn run(args: &RunArgs) -> Result<RunReport> {
    let config = RunConfig::resolve(args)?;
    let context = config.pipeline_context(chrono::Local::now().date_naive());
    let span = info_span!("run", dataset = %context.dataset_name, source = %config.source);
    let _guard = span.enter();
    let start = Instant::now();

    let fetcher = fetcher_for(&config.source, config.retry_policy())
        .with_context(|| format!("open source {}", config.source))?;
    let files = fetcher
        .fetch()
        .with_context(|| format!("fetch {}", fetcher.location()))?;

    let token = CancellationToken::new();
    let output = run_pipeline(&files, &context, &token)?;

    let mut destination = destination_for(
        config.destination,
        config.output_dir.clone(),
        config.output_format,
    );
    destination
        .commit(&output)
        .with_context(|| format!("load into {} destination", destination.name()))?;

    info!(
        duration_ms = start.elapsed().as_millis(),
        destination = destination.name(),
        "run finished"
    );
    let output_path = match config.destination {
        DestinationKind::Filesystem => Some(config.output_dir.join(&context.dataset_name)),
        DestinationKind::None => None,
    };
    Ok(RunReport {
        source: config.source,
        destination: destination.name(),
        output_path,
        summary: output.summary,
    })
}
