//! End-to-end runs over small in-memory extracts.

use chrono::NaiveDate;
use fda_core::{CancellationToken, PipelineContext, PipelineError, run_pipeline};
use fda_model::{
    ProcessingOptions, RejectionKind, SourceFiles, SourceTable, UNKNOWN, ValidationMode,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn table(header: &[&str], rows: &[&[&str]]) -> Vec<u8> {
    let mut text = header.join("\t");
    text.push_str("\r\n");
    for row in rows {
        text.push_str(&row.join("\t"));
        text.push_str("\r\n");
    }
    text.into_bytes()
}

const PRODUCT_HEADER: &[&str] = &[
    "ApplNo",
    "ProductNo",
    "Form",
    "Strength",
    "DrugName",
    "ActiveIngredient",
];
const SUBMISSION_HEADER: &[&str] = &[
    "ApplNo",
    "SubmissionType",
    "SubmissionNo",
    "SubmissionStatusDate",
];

fn products(rows: &[&[&str]]) -> Vec<u8> {
    table(PRODUCT_HEADER, rows)
}

fn submissions(rows: &[&[&str]]) -> Vec<u8> {
    table(SUBMISSION_HEADER, rows)
}

fn full_extract() -> SourceFiles {
    SourceFiles::new()
        .with_file(
            "Products.txt",
            products(&[
                &["123", "1", "TABLET;ORAL", "10MG", "ALPHA", "DRUG A; drug  b"],
                &["000123", "001", "TABLET;ORAL", "20MG", "ALPHA", "DRUG A"],
                &["4567", "2", "INJECTABLE;INJECTION", "5MG/ML", "BETA", "BETA SODIUM"],
            ]),
        )
        .with_file(
            "Submissions.txt",
            submissions(&[
                &["123", "ORIG", "1", "Approved prior to Jan 1, 1982"],
                &["4567", "SUPPL", "3", "2001-01-01"],
                &["4567", "ORIG", "1", "2005-06-15 00:00:00"],
            ]),
        )
        .with_file(
            "Applications.txt",
            table(
                &["ApplNo", "ApplType", "ApplPublicNotes", "SponsorName"],
                &[
                    &["123", "NDA", "", "ACME  PHARMA"],
                    &["4567", "A", "", "GENERICO"],
                ],
            ),
        )
        .with_file(
            "MarketingStatus.txt",
            table(
                &["MarketingStatusID", "ApplNo", "ProductNo"],
                &[&["1", "123", "1"], &["3", "4567", "2"]],
            ),
        )
        .with_file(
            "TE.txt",
            table(
                &["ApplNo", "ProductNo", "MarketingStatusID", "TECode"],
                &[&["4567", "2", "3", "AB"]],
            ),
        )
        .with_file(
            "Exclusivity.txt",
            table(
                &["ApplNo", "ProductNo", "ExclusivityCode", "ExclusivityDate"],
                &[&["4567", "2", "ODE", "2999-01-01"]],
            ),
        )
}

fn context() -> PipelineContext {
    PipelineContext::new(date(2024, 1, 1))
}

#[test]
fn unpadded_and_padded_keys_collapse_to_one_product() {
    let output = run_pipeline(&full_extract(), &context(), &CancellationToken::new()).unwrap();

    assert_eq!(output.silver.len(), 2);
    let first = &output.silver[0];
    assert_eq!(first.source_key, "000123|001");
    // First occurrence wins.
    assert_eq!(first.strength, "10MG");
    assert_eq!(first.active_ingredients, ["DRUG A", "DRUG B"]);
    assert_eq!(first.form, "Tablet;Oral");
    assert_eq!(output.summary.anomalies.duplicate_product_keys, 1);
}

#[test]
fn legacy_and_iso_approval_dates() {
    let output = run_pipeline(&full_extract(), &context(), &CancellationToken::new()).unwrap();

    let legacy = &output.silver[0];
    assert_eq!(legacy.original_approval_date, Some(date(1982, 1, 1)));
    assert!(legacy.is_historic_record);

    // SUPPL rows never count as the original approval.
    let modern = &output.silver[1];
    assert_eq!(modern.original_approval_date, Some(date(2005, 6, 15)));
    assert!(!modern.is_historic_record);
    assert_eq!(output.summary.anomalies.historic_dates, 1);
}

#[test]
fn gold_flags_and_enrichment() {
    let output = run_pipeline(&full_extract(), &context(), &CancellationToken::new()).unwrap();
    assert_eq!(output.gold.len(), output.silver.len());

    let nda = &output.gold[0];
    assert_eq!(nda.application_type, "NDA");
    assert!(!nda.is_generic);
    assert!(!nda.is_protected);
    assert_eq!(nda.marketing_status_id, Some(1));
    assert_eq!(nda.marketing_status_description, "Prescription");
    assert_eq!(nda.te_code, UNKNOWN);
    assert_eq!(nda.sponsor_name, "ACME PHARMA");
    assert_eq!(nda.search_text, "drug a drug b tablet;oral 10mg acme pharma");

    let anda = &output.gold[1];
    assert_eq!(anda.application_type, "ANDA");
    assert!(anda.is_generic);
    assert!(anda.is_protected);
    assert_eq!(anda.exclusivity_expiration, Some(date(2999, 1, 1)));
    assert_eq!(anda.te_code, "AB");
    assert_eq!(anda.marketing_status_description, "Discontinued");

    let gaps = &output.summary.anomalies;
    assert_eq!(gaps.join_gap_count(SourceTable::Te), 1);
    assert_eq!(gaps.join_gap_count(SourceTable::Exclusivity), 1);
    assert_eq!(gaps.join_gap_count(SourceTable::Applications), 0);
}

#[test]
fn protection_expires_after_evaluation_date() {
    let context = context().with_evaluation_date(date(2999, 1, 2));
    let output = run_pipeline(&full_extract(), &context, &CancellationToken::new()).unwrap();
    assert!(!output.gold[1].is_protected);
    assert_eq!(output.gold[1].exclusivity_expiration, Some(date(2999, 1, 1)));
}

#[test]
fn missing_auxiliary_tables_fill_with_sentinels() {
    let files = SourceFiles::new()
        .with_file(
            "Products.txt",
            products(&[&["7", "1", "CAPSULE;ORAL", "1MG", "GAMMA", "GAMMA"]]),
        )
        .with_file("Submissions.txt", submissions(&[]));
    let output = run_pipeline(&files, &context(), &CancellationToken::new()).unwrap();

    assert_eq!(output.bronze.len(), 2);
    assert_eq!(output.gold.len(), 1);
    let gold = &output.gold[0];
    assert_eq!(gold.sponsor_name, UNKNOWN);
    assert_eq!(gold.application_type, UNKNOWN);
    assert_eq!(gold.marketing_status_id, None);
    assert_eq!(gold.marketing_status_description, UNKNOWN);
    assert!(!gold.is_generic);
    assert_eq!(gold.search_text, "gamma capsule;oral 1mg");
    assert_eq!(gold.product.original_approval_date, None);

    let anomalies = &output.summary.anomalies;
    assert_eq!(anomalies.unresolved_approval_dates, 1);
    assert_eq!(anomalies.unknown_application_types, 0);
    assert_eq!(anomalies.total_join_gaps(), 4);
}

#[test]
fn approval_date_ignores_submission_order() {
    let rows: [&[&str]; 3] = [
        &["50", "ORIG", "2", "2010-03-01"],
        &["50", "ORIG", "1", "2005-06-15"],
        &["50", "ORIG", "3", "2007-01-01"],
    ];
    let orders = [[0, 1, 2], [2, 1, 0], [1, 2, 0], [2, 0, 1]];
    let mut resolved = Vec::new();
    for order in orders {
        let shuffled: Vec<&[&str]> = order.iter().map(|&idx| rows[idx]).collect();
        let files = SourceFiles::new()
            .with_file(
                "Products.txt",
                products(&[&["50", "1", "TABLET", "1MG", "DELTA", "DELTA"]]),
            )
            .with_file("Submissions.txt", submissions(&shuffled));
        let output = run_pipeline(&files, &context(), &CancellationToken::new()).unwrap();
        resolved.push(output.silver[0].original_approval_date);
    }
    assert!(resolved.iter().all(|value| *value == Some(date(2005, 6, 15))));
}

#[test]
fn identity_is_stable_across_runs() {
    let first = run_pipeline(&full_extract(), &context(), &CancellationToken::new()).unwrap();
    let second = run_pipeline(&full_extract(), &context(), &CancellationToken::new()).unwrap();
    assert_eq!(first.silver, second.silver);
}

fn malformed_extract() -> SourceFiles {
    SourceFiles::new()
        .with_file(
            "Products.txt",
            products(&[
                &["12A", "1", "TABLET", "1MG", "BAD", "BAD"],
                &["9", "1", "TABLET", "1MG", "GOOD", "GOOD"],
            ]),
        )
        .with_file("Submissions.txt", submissions(&[]))
}

#[test]
fn fail_fast_reports_table_and_raw_key() {
    let err = run_pipeline(&malformed_extract(), &context(), &CancellationToken::new())
        .unwrap_err();
    assert_eq!(err.kind(), "format");
    assert_eq!(err.table().as_deref(), Some("products"));
    assert_eq!(err.natural_key().as_deref(), Some("12A|1"));
}

#[test]
fn quarantine_continues_past_malformed_rows() {
    let context = context().with_options(
        ProcessingOptions::new().with_validation_mode(ValidationMode::Quarantine),
    );
    let output =
        run_pipeline(&malformed_extract(), &context, &CancellationToken::new()).unwrap();

    assert_eq!(output.silver.len(), 1);
    assert_eq!(output.silver[0].appl_no, "000009");
    assert_eq!(output.quarantined.len(), 1);
    let rejected = &output.quarantined[0];
    assert_eq!(rejected.table, "products");
    assert_eq!(rejected.kind, RejectionKind::Format);
    assert_eq!(rejected.natural_key.as_deref(), Some("12A|1"));
    assert_eq!(output.summary.counts.quarantined, 1);
}

#[test]
fn missing_required_column_is_a_schema_error() {
    let files = SourceFiles::new()
        .with_file(
            "Products.txt",
            table(&["ApplNo", "ProductNo", "Form"], &[&["1", "1", "TABLET"]]),
        )
        .with_file("Submissions.txt", submissions(&[]));
    let err = run_pipeline(&files, &context(), &CancellationToken::new()).unwrap_err();
    assert_eq!(err.kind(), "schema");
}

#[test]
fn cancelled_runs_produce_no_output() {
    let token = CancellationToken::new();
    token.cancel();
    let err = run_pipeline(&full_extract(), &context(), &token).unwrap_err();
    assert!(matches!(err, PipelineError::Cancelled { stage: "ingest" }));
}

#[test]
fn summary_counts_every_layer() {
    let output = run_pipeline(&full_extract(), &context(), &CancellationToken::new()).unwrap();
    let counts = &output.summary.counts;
    assert_eq!(counts.bronze.get("bronze_products"), Some(&3));
    assert!(!counts.bronze.contains_key("bronze_marketing_status_lookup"));
    assert_eq!(counts.silver, 2);
    assert_eq!(counts.gold, 2);
    assert_eq!(output.summary.silver_contract, "silver_products.v1");
    assert_eq!(output.summary.gold_contract, "gold_products.v1");
}

fn caseless_sponsor_extract() -> SourceFiles {
    SourceFiles::new()
        .with_file(
            "Products.txt",
            products(&[
                &["1", "1", "TABLET;ORAL", "5MG", "ZETA", "ZETA"],
                &["2", "1", "TABLET;ORAL", "5MG", "ETA", "ETA"],
            ]),
        )
        .with_file("Submissions.txt", submissions(&[]))
        .with_file(
            "Applications.txt",
            table(
                &["ApplNo", "ApplType", "SponsorName"],
                &[&["1", "N", "ℂORP PHARMA"], &["2", "A", "PLAIN LABS"]],
            ),
        )
}

#[test]
fn non_ascii_sponsor_passes_gold_contract() {
    let output =
        run_pipeline(&caseless_sponsor_extract(), &context(), &CancellationToken::new()).unwrap();
    assert_eq!(output.gold.len(), 2);
    assert_eq!(output.gold[0].search_text, "zeta tablet;oral 5mg ℂorp pharma");
}

#[test]
fn quarantine_keeps_gold_and_silver_aligned() {
    let context = context().with_options(
        ProcessingOptions::new().with_validation_mode(ValidationMode::Quarantine),
    );
    let output =
        run_pipeline(&caseless_sponsor_extract(), &context, &CancellationToken::new()).unwrap();
    assert_eq!(output.silver.len(), output.gold.len());
    assert_eq!(output.summary.counts.silver, output.summary.counts.gold);
    assert!(output.quarantined.is_empty());
    assert_eq!(output.summary.anomalies.withdrawn_silver_records, 0);
}
