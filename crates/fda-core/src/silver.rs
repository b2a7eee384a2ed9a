//! Silver builder: one refined, identified, validated record per product key.

use std::collections::HashSet;

use fda_model::{AnomalyCounters, NaturalKey, QuarantinedRecord, SilverProduct};
use fda_transform::normalization::{ProductRow, SubmissionRow};
use fda_transform::{
    ApprovalSource, TrackedFields, content_hash, product_identity, resolve_original_approvals,
    resolve_product_approval,
};
use fda_validate::{ValidationError, validate_records};
use tracing::{debug, info, warn};

use crate::context::PipelineContext;

#[derive(Debug, Clone, PartialEq)]
pub struct SilverOutput {
    /// Accepted products in first-occurrence source order.
    pub records: Vec<SilverProduct>,
    pub quarantined: Vec<QuarantinedRecord>,
    pub anomalies: AnomalyCounters,
}

/// Builds Silver products from normalized product and submission rows.
///
/// The first row of a duplicated natural key wins; later rows are counted
/// and dropped. Approval dates come from the earliest `ORIG` submission,
/// falling back to the product's legacy marker.
pub fn build_silver(
    products: &[ProductRow],
    submissions: &[SubmissionRow],
    context: &PipelineContext,
) -> Result<SilverOutput, ValidationError> {
    let approvals = resolve_original_approvals(submissions);
    debug!(applications = approvals.len(), "resolved original approvals");

    let mut anomalies = AnomalyCounters::default();
    let mut seen: HashSet<NaturalKey> = HashSet::with_capacity(products.len());
    let mut records = Vec::with_capacity(products.len());

    let mut ordered: Vec<&ProductRow> = products.iter().collect();
    ordered.sort_by_key(|row| row.ordinal);

    for row in ordered {
        let key = NaturalKey::new(row.appl_no.clone(), row.product_no.clone());
        if !seen.insert(key.clone()) {
            anomalies.duplicate_product_keys += 1;
            debug!(natural_key = %key, ordinal = row.ordinal, "duplicate product row dropped");
            continue;
        }

        let approval = resolve_product_approval(row, &approvals);
        match approval.source {
            ApprovalSource::Unresolved => {
                anomalies.unresolved_approval_dates += 1;
                debug!(natural_key = %key, "no resolvable original approval date");
            }
            ApprovalSource::Submission | ApprovalSource::LegacyFallback => {
                if approval.is_historic {
                    anomalies.historic_dates += 1;
                }
            }
        }

        let mut product = SilverProduct {
            identity: product_identity(&key),
            source_key: key.source_key(),
            appl_no: key.appl_no,
            product_no: key.product_no,
            form: row.form.clone(),
            strength: row.strength.clone(),
            drug_name: row.drug_name.clone(),
            active_ingredients: row.active_ingredients.clone(),
            original_approval_date: approval.date,
            is_historic_record: approval.is_historic,
            content_hash: String::new(),
        };
        product.content_hash = content_hash(&TrackedFields::of(&product));
        records.push(product);
    }

    if anomalies.duplicate_product_keys > 0 {
        warn!(
            count = anomalies.duplicate_product_keys,
            "duplicate product keys collapsed to first occurrence"
        );
    }
    if anomalies.unresolved_approval_dates > 0 {
        warn!(
            count = anomalies.unresolved_approval_dates,
            "products without a resolvable approval date"
        );
    }

    let validated = validate_records(records, context.validation_mode())?;
    info!(
        records = validated.accepted.len(),
        quarantined = validated.quarantined.len(),
        historic = anomalies.historic_dates,
        "silver built"
    );
    Ok(SilverOutput {
        records: validated.accepted,
        quarantined: validated.quarantined,
        anomalies,
    })
}
