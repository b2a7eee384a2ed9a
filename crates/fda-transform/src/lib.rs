//! Field normalization, join resolution, and identity assignment.
//!
//! - **normalization**: identifiers, dates, free text, and typed per-table rows
//! - **join**: original-approval resolution and auxiliary hash indexes
//! - **identity**: UUIDv5 identities and SHA-256 content hashes

pub mod identity;
pub mod join;
pub mod normalization;

pub use identity::{PRODUCT_NAMESPACE_V1, TrackedFields, content_hash, product_identity};
pub use join::{
    ApprovalDate, ApprovalOutcome, ApprovalSource, EnrichmentIndex, MarketingStatusMatch,
    builtin_marketing_status_lookup, resolve_original_approvals, resolve_product_approval,
};
pub use normalization::{
    DateResolution, LegacyDateTable, NormalizationContext, NormalizedTable, pad_identifier,
    resolve_date, split_ingredients,
};
