use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RejectionKind {
    /// Malformed identifier during normalization.
    Format,
    /// Record failed its output contract.
    Validation,
}

impl RejectionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RejectionKind::Format => "format",
            RejectionKind::Validation => "validation",
        }
    }
}

/// A record routed to the side channel in quarantine mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuarantinedRecord {
    /// Source table for format rejections, contract table for validation
    /// rejections (`silver_products`, `gold_products`).
    pub table: String,
    /// Contract or stage that rejected the record, e.g. `silver_products.v1`.
    pub stage: String,
    pub natural_key: Option<String>,
    pub ordinal: Option<usize>,
    pub kind: RejectionKind,
    pub message: String,
}
