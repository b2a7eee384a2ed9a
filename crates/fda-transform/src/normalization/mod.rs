//! Per-field and per-table cleansing.
//!
//! - **identifiers**: fixed-width zero padding
//! - **dates**: ISO date parsing and legacy marker resolution
//! - **text**: trimming, ingredient splitting, title case
//! - **tables**: typed rows for each source table

pub mod dates;
pub mod identifiers;
pub mod tables;
pub mod text;

pub use dates::{DateResolution, LegacyDateTable, legacy_cutoff, parse_iso_date, resolve_date};
pub use identifiers::{APPL_NO_WIDTH, PRODUCT_NO_WIDTH, pad_identifier};
pub use tables::{
    ApplicationRow, ExclusivityRow, LookupRow, MarketingStatusRow, NormalizationContext,
    NormalizedTable, ProductRow, SubmissionRow, TeRow, normalize_applications,
    normalize_exclusivity, normalize_marketing_status, normalize_marketing_status_lookup,
    normalize_products, normalize_submissions, normalize_te,
};
pub use text::{collapse_whitespace, normalize_ingredient, split_ingredients, title_case};
