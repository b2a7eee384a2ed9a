//! Stage orchestration for one snapshot: ingest, Bronze, normalize, Silver, Gold.

use std::time::Instant;

use fda_ingest::{BronzeTable, build_bronze, read_snapshot};
use fda_model::{
    AnomalyCounters, GoldProduct, LayerCounts, QuarantinedRecord, RunSummary, SCHEMA_VERSION,
    SilverProduct, SourceFiles,
};
use fda_transform::EnrichmentIndex;
use fda_validate::{GOLD_PRODUCTS_V1, SILVER_PRODUCTS_V1};
use tracing::{debug, info, info_span, warn};

use crate::cancel::CancellationToken;
use crate::context::PipelineContext;
use crate::error::Result;
use crate::gold::build_gold;
use crate::normalize::{apply_format_policy, normalize_snapshot};
use crate::silver::build_silver;

/// Pipeline stages in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Ingest,
    Bronze,
    Normalize,
    Silver,
    Gold,
}

impl Stage {
    pub const ALL: [Stage; 5] = [
        Stage::Ingest,
        Stage::Bronze,
        Stage::Normalize,
        Stage::Silver,
        Stage::Gold,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Stage::Ingest => "ingest",
            Stage::Bronze => "bronze",
            Stage::Normalize => "normalize",
            Stage::Silver => "silver",
            Stage::Gold => "gold",
        }
    }
}

/// Every layer of a completed run, ready for a load adapter.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub bronze: Vec<BronzeTable>,
    pub silver: Vec<SilverProduct>,
    pub gold: Vec<GoldProduct>,
    /// Format and validation rejections, empty under fail-fast.
    pub quarantined: Vec<QuarantinedRecord>,
    pub summary: RunSummary,
}

/// Runs every stage over one snapshot.
///
/// Cancellation is checked before each stage. Any error aborts the run and
/// nothing is returned for loading.
pub fn run_pipeline(
    files: &SourceFiles,
    context: &PipelineContext,
    cancel: &CancellationToken,
) -> Result<RunOutput> {
    let span = info_span!(
        "pipeline",
        dataset = %context.dataset_name,
        mode = context.validation_mode().as_str(),
        evaluation_date = %context.evaluation_date
    );
    let _guard = span.enter();
    let run_start = Instant::now();

    cancel.check(Stage::Ingest)?;
    let snapshot = timed(Stage::Ingest, || read_snapshot(files))?;

    cancel.check(Stage::Bronze)?;
    let bronze = timed(Stage::Bronze, || build_bronze(&snapshot));

    cancel.check(Stage::Normalize)?;
    let normalized = timed(Stage::Normalize, || normalize_snapshot(&snapshot, context));
    let mut quarantined =
        apply_format_policy(&normalized, &snapshot, context.validation_mode())?;

    let mut anomalies = AnomalyCounters {
        unparseable_dates: normalized.unparseable_dates(),
        ..AnomalyCounters::default()
    };
    if anomalies.unparseable_dates > 0 {
        warn!(
            count = anomalies.unparseable_dates,
            "unparseable dates treated as absent"
        );
    }

    cancel.check(Stage::Silver)?;
    let silver = timed(Stage::Silver, || {
        build_silver(
            &normalized.products.rows,
            &normalized.submissions.rows,
            context,
        )
    })?;
    anomalies.merge(&silver.anomalies);
    quarantined.extend(silver.quarantined);

    cancel.check(Stage::Gold)?;
    let index = EnrichmentIndex::build(
        &normalized.applications.rows,
        &normalized.marketing_status.rows,
        normalized
            .marketing_status_lookup
            .as_ref()
            .map(|lookup| lookup.rows.as_slice()),
        &normalized.te.rows,
        &normalized.exclusivity.rows,
    );
    if index.unresolved_exclusivity() > 0 {
        warn!(
            count = index.unresolved_exclusivity(),
            "exclusivity rows without a resolvable expiration skipped"
        );
    }
    let gold = timed(Stage::Gold, || build_gold(silver.records, &index, context))?;
    anomalies.merge(&gold.anomalies);
    quarantined.extend(gold.quarantined);

    let counts = LayerCounts {
        bronze: bronze
            .iter()
            .map(|table| (table.name.clone(), table.height()))
            .collect(),
        silver: gold.silver.len(),
        gold: gold.records.len(),
        quarantined: quarantined.len(),
    };
    let summary = RunSummary {
        dataset: context.dataset_name.clone(),
        schema_version: SCHEMA_VERSION.to_string(),
        silver_contract: SILVER_PRODUCTS_V1.name.to_string(),
        gold_contract: GOLD_PRODUCTS_V1.name.to_string(),
        validation_mode: context.validation_mode(),
        evaluation_date: context.evaluation_date,
        counts,
        anomalies,
    };
    info!(
        silver = summary.counts.silver,
        gold = summary.counts.gold,
        quarantined = summary.counts.quarantined,
        join_gaps = summary.anomalies.total_join_gaps(),
        duration_ms = run_start.elapsed().as_millis(),
        "pipeline complete"
    );

    Ok(RunOutput {
        bronze,
        silver: gold.silver,
        gold: gold.records,
        quarantined,
        summary,
    })
}

fn timed<T>(stage: Stage, f: impl FnOnce() -> T) -> T {
    let span = info_span!("stage", stage = stage.name());
    let _guard = span.enter();
    let start = Instant::now();
    let result = f();
    debug!(duration_ms = start.elapsed().as_millis(), "stage finished");
    result
}
