//! Contract violations.
//!
//! Each variant carries only the data needed to explain it.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Issue {
    // Key checks
    /// Identifier is not exactly `width` ASCII digits.
    MalformedIdentifier {
        field: String,
        value: String,
        width: usize,
    },
    /// `source_key` does not match the natural key.
    SourceKeyMismatch { expected: String, found: String },
    /// `identity` is not the UUIDv5 of the natural key.
    IdentityMismatch { expected: String, found: String },

    // Content checks
    /// `content_hash` is not 64 lowercase hex characters.
    MalformedContentHash { value: String },
    /// `content_hash` does not match the tracked fields.
    ContentHashMismatch,
    /// An ingredient is empty or carries surrounding whitespace.
    IngredientNotNormalized { index: usize, value: String },
    /// Historic flag set without a date at or before the legacy cutoff.
    HistoricDateConflict { date: Option<String> },

    // Enrichment checks
    /// Enrichment field is blank instead of a value or the sentinel.
    EmptyEnrichment { field: String },
    /// Marketing status description present without an id.
    OrphanMarketingDescription { description: String },
    /// `is_generic` disagrees with `application_type`.
    GenericFlagMismatch {
        application_type: String,
        is_generic: bool,
    },
    /// Protected without any exclusivity expiration.
    ProtectionWithoutExclusivity,
    /// `search_text` is not lowercase and whitespace-normalized.
    SearchTextNotNormalized,
}

impl Issue {
    /// Field the issue is about.
    pub fn field(&self) -> &str {
        match self {
            Issue::MalformedIdentifier { field, .. } | Issue::EmptyEnrichment { field } => field,
            Issue::SourceKeyMismatch { .. } => "source_key",
            Issue::IdentityMismatch { .. } => "identity",
            Issue::MalformedContentHash { .. } | Issue::ContentHashMismatch => "content_hash",
            Issue::IngredientNotNormalized { .. } => "active_ingredients",
            Issue::HistoricDateConflict { .. } => "is_historic_record",
            Issue::OrphanMarketingDescription { .. } => "marketing_status_description",
            Issue::GenericFlagMismatch { .. } => "is_generic",
            Issue::ProtectionWithoutExclusivity => "is_protected",
            Issue::SearchTextNotNormalized => "search_text",
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Issue::MalformedIdentifier {
                field,
                value,
                width,
            } => write!(f, "{field} {value:?} is not {width} digits"),
            Issue::SourceKeyMismatch { expected, found } => {
                write!(f, "source_key {found:?} should be {expected:?}")
            }
            Issue::IdentityMismatch { expected, found } => {
                write!(f, "identity {found} should be {expected}")
            }
            Issue::MalformedContentHash { value } => {
                write!(f, "content_hash {value:?} is not a sha-256 hex digest")
            }
            Issue::ContentHashMismatch => f.write_str("content_hash does not match record content"),
            Issue::IngredientNotNormalized { index, value } => {
                write!(f, "active ingredient {index} {value:?} is not trimmed and non-empty")
            }
            Issue::HistoricDateConflict { date: Some(date) } => {
                write!(f, "historic record has post-cutoff date {date}")
            }
            Issue::HistoricDateConflict { date: None } => {
                f.write_str("historic record has no approval date")
            }
            Issue::EmptyEnrichment { field } => write!(f, "{field} is empty"),
            Issue::OrphanMarketingDescription { description } => write!(
                f,
                "marketing status description {description:?} has no status id"
            ),
            Issue::GenericFlagMismatch {
                application_type,
                is_generic,
            } => write!(
                f,
                "is_generic={is_generic} contradicts application type {application_type}"
            ),
            Issue::ProtectionWithoutExclusivity => {
                f.write_str("protected product has no exclusivity expiration")
            }
            Issue::SearchTextNotNormalized => {
                f.write_str("search_text is not lowercase with single spaces")
            }
        }
    }
}
