//! Parallel per-table normalization and the format-error policy.

use std::thread;

use fda_ingest::RawSnapshot;
use fda_model::{FormatError, QuarantinedRecord, RejectionKind, SourceTable, ValidationMode};
use fda_transform::NormalizedTable;
use fda_transform::normalization::{
    ApplicationRow, ExclusivityRow, LookupRow, MarketingStatusRow, ProductRow, SubmissionRow,
    TeRow, normalize_applications, normalize_exclusivity, normalize_marketing_status,
    normalize_marketing_status_lookup, normalize_products, normalize_submissions, normalize_te,
};
use tracing::{debug, warn};

use crate::context::PipelineContext;
use crate::error::PipelineError;

/// Typed rows for every table of one snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedSnapshot {
    pub products: NormalizedTable<ProductRow>,
    pub applications: NormalizedTable<ApplicationRow>,
    pub submissions: NormalizedTable<SubmissionRow>,
    pub marketing_status: NormalizedTable<MarketingStatusRow>,
    /// `None` when the lookup member was absent.
    pub marketing_status_lookup: Option<NormalizedTable<LookupRow>>,
    pub te: NormalizedTable<TeRow>,
    pub exclusivity: NormalizedTable<ExclusivityRow>,
}

impl NormalizedSnapshot {
    /// Format errors from every table, in table then row order.
    pub fn rejected(&self) -> Vec<&FormatError> {
        let mut rejected: Vec<&FormatError> = Vec::new();
        rejected.extend(self.products.rejected.iter());
        rejected.extend(self.applications.rejected.iter());
        rejected.extend(self.submissions.rejected.iter());
        rejected.extend(self.marketing_status.rejected.iter());
        if let Some(lookup) = &self.marketing_status_lookup {
            rejected.extend(lookup.rejected.iter());
        }
        rejected.extend(self.te.rejected.iter());
        rejected.extend(self.exclusivity.rejected.iter());
        rejected
    }

    pub fn unparseable_dates(&self) -> usize {
        self.products.unparseable_dates
            + self.submissions.unparseable_dates
            + self.exclusivity.unparseable_dates
    }
}

/// Normalizes all seven tables, each on its own scoped thread.
///
/// Workers share only immutable borrows of the snapshot and context; each
/// returns its table by value.
pub fn normalize_snapshot(snapshot: &RawSnapshot, context: &PipelineContext) -> NormalizedSnapshot {
    let normalization = &context.normalization;
    thread::scope(|scope| {
        let products = scope.spawn(|| normalize_products(&snapshot.products, normalization));
        let applications = scope.spawn(|| normalize_applications(&snapshot.applications));
        let submissions =
            scope.spawn(|| normalize_submissions(&snapshot.submissions, normalization));
        let marketing_status =
            scope.spawn(|| normalize_marketing_status(&snapshot.marketing_status));
        let lookup = scope.spawn(|| {
            let batch = &snapshot.marketing_status_lookup;
            (!batch.is_substituted()).then(|| normalize_marketing_status_lookup(batch))
        });
        let te = scope.spawn(|| normalize_te(&snapshot.te));
        let exclusivity = scope.spawn(|| normalize_exclusivity(&snapshot.exclusivity));

        NormalizedSnapshot {
            products: join(products),
            applications: join(applications),
            submissions: join(submissions),
            marketing_status: join(marketing_status),
            marketing_status_lookup: join(lookup),
            te: join(te),
            exclusivity: join(exclusivity),
        }
    })
}

fn join<T>(handle: thread::ScopedJoinHandle<'_, T>) -> T {
    match handle.join() {
        Ok(value) => value,
        Err(payload) => std::panic::resume_unwind(payload),
    }
}

/// Applies the validation mode to malformed identifiers.
///
/// Fail-fast returns the first error in table order. Quarantine converts
/// every error into a [`QuarantinedRecord`].
pub fn apply_format_policy(
    normalized: &NormalizedSnapshot,
    snapshot: &RawSnapshot,
    mode: ValidationMode,
) -> Result<Vec<QuarantinedRecord>, PipelineError> {
    let rejected = normalized.rejected();
    if rejected.is_empty() {
        return Ok(Vec::new());
    }
    match mode {
        ValidationMode::FailFast => {
            let first = rejected[0];
            Err(PipelineError::Format {
                source: first.clone(),
                raw_key: raw_key(snapshot, first.table, first.ordinal),
            })
        }
        ValidationMode::Quarantine => {
            warn!(count = rejected.len(), "rows with malformed identifiers quarantined");
            Ok(rejected
                .into_iter()
                .map(|err| {
                    debug!(table = %err.table, ordinal = err.ordinal, error = %err, "format error");
                    QuarantinedRecord {
                        table: err.table.name().to_string(),
                        stage: "normalize".to_string(),
                        natural_key: Some(raw_key(snapshot, err.table, err.ordinal)),
                        ordinal: Some(err.ordinal),
                        kind: RejectionKind::Format,
                        message: err.to_string(),
                    }
                })
                .collect())
        }
    }
}

/// Raw key text of a source row, as it appeared before padding.
fn raw_key(snapshot: &RawSnapshot, table: SourceTable, ordinal: usize) -> String {
    let batch = snapshot.batch(table);
    let appl_no = batch.value("appl_no", ordinal);
    if batch.has_column("product_no") {
        format!("{}|{}", appl_no.trim(), batch.value("product_no", ordinal).trim())
    } else {
        appl_no.trim().to_string()
    }
}
