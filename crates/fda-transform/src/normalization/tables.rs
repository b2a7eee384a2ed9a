//! Typed, cleansed rows for each source table.
//!
//! Normalizers never fail as a whole: rows with malformed identifiers are
//! collected as [`FormatError`]s and the caller decides whether to abort or
//! quarantine them.

use fda_ingest::RawBatch;
use fda_model::{ApplicationType, FormatError, SourceTable};

use super::dates::{DateResolution, LegacyDateTable, parse_iso_date};
use super::identifiers::{APPL_NO_WIDTH, PRODUCT_NO_WIDTH, pad_identifier};
use super::text::{collapse_whitespace, normalize_ingredient, split_ingredients, title_case};

/// Normalization settings shared by every table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizationContext {
    pub legacy_dates: LegacyDateTable,
    pub ingredient_delimiter: char,
}

impl Default for NormalizationContext {
    fn default() -> Self {
        Self {
            legacy_dates: LegacyDateTable::default(),
            ingredient_delimiter: ';',
        }
    }
}

/// Rows of one table after normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedTable<T> {
    pub table: SourceTable,
    pub rows: Vec<T>,
    /// Rows dropped for malformed identifiers, in source order.
    pub rejected: Vec<FormatError>,
    /// Non-empty date cells that resolved to nothing.
    pub unparseable_dates: usize,
}

impl<T> NormalizedTable<T> {
    fn new(table: SourceTable, capacity: usize) -> Self {
        Self {
            table,
            rows: Vec::with_capacity(capacity),
            rejected: Vec::new(),
            unparseable_dates: 0,
        }
    }

    fn count_date(&mut self, resolution: DateResolution) {
        if resolution.is_unparseable() {
            self.unparseable_dates += 1;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRow {
    pub ordinal: usize,
    pub appl_no: String,
    pub product_no: String,
    pub form: String,
    pub strength: String,
    pub drug_name: String,
    pub active_ingredients: Vec<String>,
    /// Optional product-level approval text; only its legacy marker is used.
    pub approval_hint: DateResolution,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationRow {
    pub ordinal: usize,
    pub appl_no: String,
    pub application_type: ApplicationType,
    pub sponsor_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRow {
    pub ordinal: usize,
    pub appl_no: String,
    pub submission_type: String,
    pub submission_no: String,
    pub status_date: DateResolution,
}

impl SubmissionRow {
    pub fn is_original(&self) -> bool {
        self.submission_type == "ORIG"
    }

    /// Numeric submission numbers order before anything unparseable.
    pub fn submission_order(&self) -> (bool, u64, &str) {
        match self.submission_no.parse::<u64>() {
            Ok(number) => (false, number, self.submission_no.as_str()),
            Err(_) => (true, 0, self.submission_no.as_str()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketingStatusRow {
    pub ordinal: usize,
    pub appl_no: String,
    pub product_no: String,
    pub marketing_status_id: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRow {
    pub ordinal: usize,
    pub marketing_status_id: Option<u32>,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeRow {
    pub ordinal: usize,
    pub appl_no: String,
    pub product_no: String,
    pub te_code: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusivityRow {
    pub ordinal: usize,
    pub appl_no: String,
    pub product_no: String,
    pub exclusivity_code: String,
    pub expiration: DateResolution,
}

fn pad_field(
    table: SourceTable,
    ordinal: usize,
    field: &'static str,
    value: &str,
    width: usize,
) -> Result<String, FormatError> {
    pad_identifier(value, width).map_err(|source| FormatError::new(table, ordinal, field, source))
}

fn pad_key(
    table: SourceTable,
    ordinal: usize,
    appl_no: &str,
    product_no: &str,
) -> Result<(String, String), FormatError> {
    Ok((
        pad_field(table, ordinal, "appl_no", appl_no, APPL_NO_WIDTH)?,
        pad_field(table, ordinal, "product_no", product_no, PRODUCT_NO_WIDTH)?,
    ))
}

fn parse_status_id(value: &str) -> Option<u32> {
    value.trim().parse().ok()
}

fn plain_date(value: &str) -> DateResolution {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return DateResolution::Absent;
    }
    match parse_iso_date(trimmed) {
        Some(date) => DateResolution::Resolved(date),
        None => DateResolution::Unparseable,
    }
}

pub fn normalize_products(
    batch: &RawBatch,
    context: &NormalizationContext,
) -> NormalizedTable<ProductRow> {
    let table = SourceTable::Products;
    let mut out = NormalizedTable::new(table, batch.height());
    let appl_nos = batch.column_values("appl_no");
    let product_nos = batch.column_values("product_no");
    let forms = batch.column_values("form");
    let strengths = batch.column_values("strength");
    let drug_names = batch.column_values("drug_name");
    let ingredients = batch.column_values("active_ingredient");
    let approvals = batch.column_values("approval_date");

    for ordinal in 0..batch.height() {
        let (appl_no, product_no) =
            match pad_key(table, ordinal, &appl_nos[ordinal], &product_nos[ordinal]) {
                Ok(key) => key,
                Err(err) => {
                    out.rejected.push(err);
                    continue;
                }
            };
        let approval_hint = context.legacy_dates.resolve(&approvals[ordinal]);
        out.count_date(approval_hint);
        out.rows.push(ProductRow {
            ordinal,
            appl_no,
            product_no,
            form: title_case(&collapse_whitespace(&forms[ordinal])),
            strength: strengths[ordinal].trim().to_string(),
            drug_name: drug_names[ordinal].trim().to_string(),
            active_ingredients: split_ingredients(&ingredients[ordinal], context.ingredient_delimiter)
                .iter()
                .map(|ingredient| normalize_ingredient(ingredient))
                .collect(),
            approval_hint,
        });
    }
    out
}

pub fn normalize_applications(batch: &RawBatch) -> NormalizedTable<ApplicationRow> {
    let table = SourceTable::Applications;
    let mut out = NormalizedTable::new(table, batch.height());
    let appl_nos = batch.column_values("appl_no");
    let types = batch.column_values("appl_type");
    let sponsors = batch.column_values("sponsor_name");

    for ordinal in 0..batch.height() {
        match pad_field(table, ordinal, "appl_no", &appl_nos[ordinal], APPL_NO_WIDTH) {
            Ok(appl_no) => out.rows.push(ApplicationRow {
                ordinal,
                appl_no,
                application_type: ApplicationType::parse(&types[ordinal]),
                sponsor_name: collapse_whitespace(&sponsors[ordinal]),
            }),
            Err(err) => out.rejected.push(err),
        }
    }
    out
}

pub fn normalize_submissions(
    batch: &RawBatch,
    context: &NormalizationContext,
) -> NormalizedTable<SubmissionRow> {
    let table = SourceTable::Submissions;
    let mut out = NormalizedTable::new(table, batch.height());
    let appl_nos = batch.column_values("appl_no");
    let types = batch.column_values("submission_type");
    let numbers = batch.column_values("submission_no");
    let dates = batch.column_values("submission_status_date");

    for ordinal in 0..batch.height() {
        let appl_no = match pad_field(table, ordinal, "appl_no", &appl_nos[ordinal], APPL_NO_WIDTH)
        {
            Ok(appl_no) => appl_no,
            Err(err) => {
                out.rejected.push(err);
                continue;
            }
        };
        let status_date = context.legacy_dates.resolve(&dates[ordinal]);
        out.count_date(status_date);
        out.rows.push(SubmissionRow {
            ordinal,
            appl_no,
            submission_type: types[ordinal].trim().to_ascii_uppercase(),
            submission_no: numbers[ordinal].trim().to_string(),
            status_date,
        });
    }
    out
}

pub fn normalize_marketing_status(batch: &RawBatch) -> NormalizedTable<MarketingStatusRow> {
    let table = SourceTable::MarketingStatus;
    let mut out = NormalizedTable::new(table, batch.height());
    let ids = batch.column_values("marketing_status_id");
    let appl_nos = batch.column_values("appl_no");
    let product_nos = batch.column_values("product_no");

    for ordinal in 0..batch.height() {
        match pad_key(table, ordinal, &appl_nos[ordinal], &product_nos[ordinal]) {
            Ok((appl_no, product_no)) => out.rows.push(MarketingStatusRow {
                ordinal,
                appl_no,
                product_no,
                marketing_status_id: parse_status_id(&ids[ordinal]),
            }),
            Err(err) => out.rejected.push(err),
        }
    }
    out
}

pub fn normalize_marketing_status_lookup(batch: &RawBatch) -> NormalizedTable<LookupRow> {
    let table = SourceTable::MarketingStatusLookup;
    let mut out = NormalizedTable::new(table, batch.height());
    let ids = batch.column_values("marketing_status_id");
    let descriptions = batch.column_values("marketing_status_description");

    for ordinal in 0..batch.height() {
        out.rows.push(LookupRow {
            ordinal,
            marketing_status_id: parse_status_id(&ids[ordinal]),
            description: collapse_whitespace(&descriptions[ordinal]),
        });
    }
    out
}

pub fn normalize_te(batch: &RawBatch) -> NormalizedTable<TeRow> {
    let table = SourceTable::Te;
    let mut out = NormalizedTable::new(table, batch.height());
    let appl_nos = batch.column_values("appl_no");
    let product_nos = batch.column_values("product_no");
    let codes = batch.column_values("te_code");

    for ordinal in 0..batch.height() {
        match pad_key(table, ordinal, &appl_nos[ordinal], &product_nos[ordinal]) {
            Ok((appl_no, product_no)) => out.rows.push(TeRow {
                ordinal,
                appl_no,
                product_no,
                te_code: codes[ordinal].trim().to_ascii_uppercase(),
            }),
            Err(err) => out.rejected.push(err),
        }
    }
    out
}

pub fn normalize_exclusivity(batch: &RawBatch) -> NormalizedTable<ExclusivityRow> {
    let table = SourceTable::Exclusivity;
    let mut out = NormalizedTable::new(table, batch.height());
    let appl_nos = batch.column_values("appl_no");
    let product_nos = batch.column_values("product_no");
    let codes = batch.column_values("exclusivity_code");
    let dates = batch.column_values("exclusivity_date");

    for ordinal in 0..batch.height() {
        let (appl_no, product_no) =
            match pad_key(table, ordinal, &appl_nos[ordinal], &product_nos[ordinal]) {
                Ok(key) => key,
                Err(err) => {
                    out.rejected.push(err);
                    continue;
                }
            };
        let expiration = plain_date(&dates[ordinal]);
        out.count_date(expiration);
        out.rows.push(ExclusivityRow {
            ordinal,
            appl_no,
            product_no,
            exclusivity_code: codes[ordinal].trim().to_string(),
            expiration,
        });
    }
    out
}
