//! Gold builder: left-join enrichment and derived analytical flags.

use std::collections::HashSet;

use fda_model::{
    AnomalyCounters, ApplicationType, GoldProduct, QuarantinedRecord, SilverProduct, SourceTable,
    UNKNOWN, ValidationMode,
};
use fda_transform::EnrichmentIndex;
use fda_validate::validate_records;
use tracing::{info, warn};

use crate::context::PipelineContext;
use crate::error::PipelineError;

#[derive(Debug, Clone, PartialEq)]
pub struct GoldOutput {
    /// Silver records whose Gold counterpart was accepted.
    pub silver: Vec<SilverProduct>,
    pub records: Vec<GoldProduct>,
    pub quarantined: Vec<QuarantinedRecord>,
    pub anomalies: AnomalyCounters,
}

/// Enriches every Silver product exactly once.
///
/// Misses fill with [`UNKNOWN`] and count as join gaps. A Gold record
/// quarantined by validation withdraws its Silver record, so both layers
/// always hold the same products.
pub fn build_gold(
    silver: Vec<SilverProduct>,
    index: &EnrichmentIndex,
    context: &PipelineContext,
) -> Result<GoldOutput, PipelineError> {
    let mut anomalies = AnomalyCounters::default();
    let mut records = Vec::with_capacity(silver.len());
    for product in &silver {
        records.push(enrich(product, index, context, &mut anomalies));
    }

    if anomalies.unknown_application_types > 0 {
        warn!(
            count = anomalies.unknown_application_types,
            "products with an unrecognized application type"
        );
    }
    for (table, gaps) in &anomalies.join_gaps {
        info!(table = %table, gaps, "join gaps filled with sentinel");
    }

    reconcile(silver, records, context.validation_mode(), anomalies)
}

/// Validates Gold and keeps Silver aligned with the accepted records.
fn reconcile(
    silver: Vec<SilverProduct>,
    records: Vec<GoldProduct>,
    mode: ValidationMode,
    mut anomalies: AnomalyCounters,
) -> Result<GoldOutput, PipelineError> {
    let validated = validate_records(records, mode)?;

    let accepted: HashSet<_> = validated
        .accepted
        .iter()
        .map(GoldProduct::natural_key)
        .collect();
    let enriched = silver.len();
    let silver: Vec<SilverProduct> = silver
        .into_iter()
        .filter(|product| accepted.contains(&product.natural_key()))
        .collect();
    anomalies.withdrawn_silver_records = enriched - silver.len();
    if anomalies.withdrawn_silver_records > 0 {
        warn!(
            count = anomalies.withdrawn_silver_records,
            "silver records withdrawn after gold quarantine"
        );
    }

    if validated.accepted.len() != silver.len() {
        return Err(PipelineError::Cardinality {
            silver: silver.len(),
            gold: validated.accepted.len(),
        });
    }
    info!(
        records = validated.accepted.len(),
        quarantined = validated.quarantined.len(),
        "gold built"
    );
    Ok(GoldOutput {
        silver,
        records: validated.accepted,
        quarantined: validated.quarantined,
        anomalies,
    })
}

fn enrich(
    product: &SilverProduct,
    index: &EnrichmentIndex,
    context: &PipelineContext,
    anomalies: &mut AnomalyCounters,
) -> GoldProduct {
    let key = product.natural_key();

    let (sponsor_name, application_type) = match index.application(&product.appl_no) {
        Some(application) => {
            let sponsor = non_empty_or_unknown(&application.sponsor_name);
            (sponsor, application.application_type.clone())
        }
        None => {
            anomalies.record_join_gap(SourceTable::Applications);
            (UNKNOWN.to_string(), ApplicationType::Other(UNKNOWN.to_string()))
        }
    };
    let application_code = match application_type.as_str() {
        "" => UNKNOWN.to_string(),
        code => code.to_string(),
    };
    if !application_type.is_known() && application_code != UNKNOWN {
        anomalies.unknown_application_types += 1;
        warn!(
            natural_key = %key,
            application_type = application_type.as_str(),
            "unrecognized application type"
        );
    }

    let (marketing_status_id, marketing_status_description) = match index.marketing_status(&key) {
        Some(status) => {
            let description = match status.description {
                Some(text) => non_empty_or_unknown(text),
                None => {
                    anomalies.record_join_gap(SourceTable::MarketingStatusLookup);
                    UNKNOWN.to_string()
                }
            };
            (Some(status.id), description)
        }
        None => {
            anomalies.record_join_gap(SourceTable::MarketingStatus);
            (None, UNKNOWN.to_string())
        }
    };

    let te_code = match index.te_code(&key) {
        Some(code) => code.to_string(),
        None => {
            anomalies.record_join_gap(SourceTable::Te);
            UNKNOWN.to_string()
        }
    };

    let windows = index.exclusivity(&key);
    if windows.is_empty() {
        anomalies.record_join_gap(SourceTable::Exclusivity);
    }
    let exclusivity_expiration = windows.iter().map(|window| window.expiration_date).max();
    let is_protected = windows
        .iter()
        .any(|window| window.is_active_on(context.evaluation_date));

    let search_text = build_search_text(product, &sponsor_name);

    GoldProduct {
        product: product.clone(),
        sponsor_name,
        is_generic: application_type.is_generic(),
        application_type: application_code,
        marketing_status_id,
        marketing_status_description,
        te_code,
        exclusivity_expiration,
        is_protected,
        search_text,
    }
}

fn non_empty_or_unknown(value: &str) -> String {
    if value.trim().is_empty() {
        UNKNOWN.to_string()
    } else {
        value.to_string()
    }
}

/// Lowercase, single-spaced ingredients, form, strength and sponsor.
///
/// The [`UNKNOWN`] sentinel never reaches search text.
pub fn build_search_text(product: &SilverProduct, sponsor_name: &str) -> String {
    let mut parts: Vec<&str> = product
        .active_ingredients
        .iter()
        .map(String::as_str)
        .collect();
    parts.push(&product.form);
    parts.push(&product.strength);
    if sponsor_name != UNKNOWN {
        parts.push(sponsor_name);
    }
    parts
        .iter()
        .flat_map(|part| part.split_whitespace())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use fda_model::NaturalKey;
    use fda_transform::{TrackedFields, content_hash, product_identity};

    use super::*;

    fn silver(appl_no: &str) -> SilverProduct {
        let mut product = SilverProduct {
            identity: uuid::Uuid::nil(),
            source_key: format!("{appl_no}|001"),
            appl_no: appl_no.to_string(),
            product_no: "001".to_string(),
            form: "Tablet".to_string(),
            strength: "5MG".to_string(),
            drug_name: "EPSILON".to_string(),
            active_ingredients: vec!["EPSILON".to_string()],
            original_approval_date: NaiveDate::from_ymd_opt(2010, 2, 1),
            is_historic_record: false,
            content_hash: String::new(),
        };
        product.identity = product_identity(&product.natural_key());
        product.content_hash = content_hash(&TrackedFields::of(&product));
        product
    }

    fn enriched(silver: &[SilverProduct]) -> Vec<GoldProduct> {
        let context = PipelineContext::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        let index = EnrichmentIndex::default();
        let mut anomalies = AnomalyCounters::default();
        silver
            .iter()
            .map(|product| enrich(product, &index, &context, &mut anomalies))
            .collect()
    }

    #[test]
    fn quarantined_gold_withdraws_its_silver_record() {
        let silver = vec![silver("000001"), silver("000002")];
        let mut records = enriched(&silver);
        records[1].search_text = "Epsilon".to_string();

        let output = reconcile(
            silver,
            records,
            ValidationMode::Quarantine,
            AnomalyCounters::default(),
        )
        .unwrap();
        assert_eq!(output.silver.len(), output.records.len());
        assert_eq!(output.silver[0].natural_key(), NaturalKey::new("000001", "001"));
        assert_eq!(output.anomalies.withdrawn_silver_records, 1);
        assert_eq!(output.quarantined.len(), 1);
        assert_eq!(output.quarantined[0].table, "gold_products");
    }

    #[test]
    fn gold_rejection_fails_fast_by_default() {
        let silver = vec![silver("000001")];
        let mut records = enriched(&silver);
        records[0].search_text = "Epsilon".to_string();

        let err = reconcile(
            silver,
            records,
            ValidationMode::FailFast,
            AnomalyCounters::default(),
        )
        .unwrap_err();
        assert_eq!(err.table().as_deref(), Some("gold_products"));
    }

    #[test]
    fn every_silver_record_gets_one_gold_record() {
        let silver = vec![silver("000001"), silver("000002")];
        let index = EnrichmentIndex::default();
        let context = PipelineContext::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        let output = build_gold(silver, &index, &context).unwrap();
        assert_eq!(output.silver.len(), 2);
        assert_eq!(output.records.len(), 2);
        assert_eq!(output.anomalies.withdrawn_silver_records, 0);
    }
}
