//! Tabular views of Silver, Gold and quarantine records.
//!
//! Columns follow the contract field order. Ingredient lists are joined with
//! `"; "`, dates render as ISO text and absent values as nulls.

use chrono::NaiveDate;
use fda_common::{optional_string_column, string_column};
use fda_model::{GoldProduct, QuarantinedRecord, SilverProduct};
use polars::prelude::*;

fn date_text(date: Option<NaiveDate>) -> Option<String> {
    date.map(|value| value.format("%Y-%m-%d").to_string())
}

fn silver_columns<'a>(records: impl Iterator<Item = &'a SilverProduct> + Clone) -> Vec<Column> {
    let text = |f: fn(&SilverProduct) -> String| records.clone().map(f).collect::<Vec<_>>();
    vec![
        string_column("identity", text(|r| r.identity.to_string())),
        string_column("source_key", text(|r| r.source_key.clone())),
        string_column("appl_no", text(|r| r.appl_no.clone())),
        string_column("product_no", text(|r| r.product_no.clone())),
        string_column("form", text(|r| r.form.clone())),
        string_column("strength", text(|r| r.strength.clone())),
        string_column("drug_name", text(|r| r.drug_name.clone())),
        string_column("active_ingredients", text(|r| r.active_ingredients.join("; "))),
        optional_string_column(
            "original_approval_date",
            records
                .clone()
                .map(|r| date_text(r.original_approval_date))
                .collect(),
        ),
        Series::new(
            "is_historic_record".into(),
            records.clone().map(|r| r.is_historic_record).collect::<Vec<_>>(),
        )
        .into(),
        string_column("content_hash", text(|r| r.content_hash.clone())),
    ]
}

pub fn silver_frame(records: &[SilverProduct]) -> PolarsResult<DataFrame> {
    DataFrame::new(silver_columns(records.iter()))
}

pub fn gold_frame(records: &[GoldProduct]) -> PolarsResult<DataFrame> {
    let mut columns = silver_columns(records.iter().map(|r| &r.product));
    let text = |f: fn(&GoldProduct) -> String| records.iter().map(f).collect::<Vec<_>>();
    columns.extend([
        string_column("sponsor_name", text(|r| r.sponsor_name.clone())),
        string_column("application_type", text(|r| r.application_type.clone())),
        Series::new(
            "marketing_status_id".into(),
            records
                .iter()
                .map(|r| r.marketing_status_id)
                .collect::<Vec<Option<u32>>>(),
        )
        .into(),
        string_column(
            "marketing_status_description",
            text(|r| r.marketing_status_description.clone()),
        ),
        string_column("te_code", text(|r| r.te_code.clone())),
        optional_string_column(
            "exclusivity_expiration",
            records
                .iter()
                .map(|r| date_text(r.exclusivity_expiration))
                .collect(),
        ),
        Series::new(
            "is_generic".into(),
            records.iter().map(|r| r.is_generic).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            "is_protected".into(),
            records.iter().map(|r| r.is_protected).collect::<Vec<_>>(),
        )
        .into(),
        string_column("search_text", text(|r| r.search_text.clone())),
    ]);
    DataFrame::new(columns)
}

pub fn quarantine_frame(records: &[QuarantinedRecord]) -> PolarsResult<DataFrame> {
    let text = |f: fn(&QuarantinedRecord) -> String| records.iter().map(f).collect::<Vec<_>>();
    DataFrame::new(vec![
        string_column("table", text(|r| r.table.clone())),
        string_column("stage", text(|r| r.stage.clone())),
        optional_string_column(
            "natural_key",
            records.iter().map(|r| r.natural_key.clone()).collect(),
        ),
        Series::new(
            "ordinal".into(),
            records
                .iter()
                .map(|r| r.ordinal.map(|ordinal| ordinal as u64))
                .collect::<Vec<Option<u64>>>(),
        )
        .into(),
        string_column("kind", text(|r| r.kind.as_str().to_string())),
        string_column("message", text(|r| r.message.clone())),
    ])
}
