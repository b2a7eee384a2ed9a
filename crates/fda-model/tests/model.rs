//! Tests for fda-model types.

use chrono::NaiveDate;
use fda_model::{
    AnomalyCounters, GoldProduct, LayerCounts, QuarantinedRecord, RejectionKind, RunSummary,
    SilverProduct, SourceTable, ValidationMode,
};
use uuid::Uuid;

fn silver() -> SilverProduct {
    SilverProduct {
        identity: Uuid::nil(),
        source_key: "000004|004".to_string(),
        appl_no: "000004".to_string(),
        product_no: "004".to_string(),
        form: "Solution/Drops;Ophthalmic".to_string(),
        strength: "1%".to_string(),
        drug_name: "PAREDRINE".to_string(),
        active_ingredients: vec!["HYDROXYAMPHETAMINE HYDROBROMIDE".to_string()],
        original_approval_date: NaiveDate::from_ymd_opt(1982, 1, 1),
        is_historic_record: true,
        content_hash: "0".repeat(64),
    }
}

#[test]
fn gold_product_flattens_silver_fields() {
    let gold = GoldProduct {
        product: silver(),
        sponsor_name: "PHARMICS".to_string(),
        application_type: "NDA".to_string(),
        marketing_status_id: Some(3),
        marketing_status_description: "Discontinued".to_string(),
        te_code: "UNKNOWN".to_string(),
        exclusivity_expiration: None,
        is_generic: false,
        is_protected: false,
        search_text: "hydroxyamphetamine hydrobromide".to_string(),
    };
    let value = serde_json::to_value(&gold).expect("serialize gold");
    assert_eq!(value["appl_no"], "000004");
    assert_eq!(value["original_approval_date"], "1982-01-01");
    assert_eq!(value["marketing_status_id"], 3);
    assert!(value.get("product").is_none());

    let round: GoldProduct = serde_json::from_value(value).expect("deserialize gold");
    assert_eq!(round, gold);
}

#[test]
fn anomaly_counters_merge() {
    let mut left = AnomalyCounters::default();
    left.record_join_gap(SourceTable::Te);
    left.historic_dates = 2;

    let mut right = AnomalyCounters::default();
    right.record_join_gap(SourceTable::Te);
    right.record_join_gap(SourceTable::Exclusivity);
    right.duplicate_product_keys = 1;

    left.merge(&right);
    assert_eq!(left.join_gap_count(SourceTable::Te), 2);
    assert_eq!(left.join_gap_count(SourceTable::Applications), 0);
    assert_eq!(left.total_join_gaps(), 3);
    assert_eq!(left.historic_dates, 2);
    assert_eq!(left.duplicate_product_keys, 1);
}

#[test]
fn run_summary_serializes_mode_in_kebab_case() {
    let summary = RunSummary {
        dataset: "drugs_fda".to_string(),
        schema_version: "drugsatfda.2024".to_string(),
        silver_contract: "silver_products.v1".to_string(),
        gold_contract: "gold_products.v1".to_string(),
        validation_mode: ValidationMode::FailFast,
        evaluation_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        counts: LayerCounts::default(),
        anomalies: AnomalyCounters::default(),
    };
    let json = serde_json::to_string(&summary).expect("serialize summary");
    assert!(json.contains("\"validation_mode\":\"fail-fast\""));
    let round: RunSummary = serde_json::from_str(&json).expect("deserialize summary");
    assert_eq!(round, summary);
}

#[test]
fn quarantined_record_serializes_table_name() {
    let record = QuarantinedRecord {
        table: SourceTable::MarketingStatus.name().to_string(),
        stage: "normalize".to_string(),
        natural_key: None,
        ordinal: Some(7),
        kind: RejectionKind::Format,
        message: "identifier is empty".to_string(),
    };
    let value = serde_json::to_value(&record).expect("serialize record");
    assert_eq!(value["table"], "marketing_status");
    assert_eq!(value["kind"], "format");
}
