//! Fail-fast and quarantine policies over a batch of records.

use fda_model::{
    GoldProduct, NaturalKey, QuarantinedRecord, RejectionKind, SilverProduct, ValidationMode,
};
use tracing::warn;

use crate::checks::{check_gold, check_silver};
use crate::contract::{Contract, GOLD_PRODUCTS_V1, SILVER_PRODUCTS_V1};
use crate::error::ValidationError;
use crate::issue::Issue;

/// A record type bound to an output contract.
pub trait Validate {
    fn contract() -> &'static Contract;

    fn natural_key(&self) -> NaturalKey;

    /// Every violation, in check order. Empty means valid.
    fn check(&self) -> Vec<Issue>;
}

impl Validate for SilverProduct {
    fn contract() -> &'static Contract {
        &SILVER_PRODUCTS_V1
    }

    fn natural_key(&self) -> NaturalKey {
        SilverProduct::natural_key(self)
    }

    fn check(&self) -> Vec<Issue> {
        check_silver(self)
    }
}

impl Validate for GoldProduct {
    fn contract() -> &'static Contract {
        &GOLD_PRODUCTS_V1
    }

    fn natural_key(&self) -> NaturalKey {
        GoldProduct::natural_key(self)
    }

    fn check(&self) -> Vec<Issue> {
        check_gold(self)
    }
}

/// Records that passed, plus the ones set aside in quarantine mode.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedBatch<T> {
    pub accepted: Vec<T>,
    pub quarantined: Vec<QuarantinedRecord>,
}

/// Applies the contract of `T` to every record under `mode`.
pub fn validate_records<T: Validate>(
    records: Vec<T>,
    mode: ValidationMode,
) -> Result<ValidatedBatch<T>, ValidationError> {
    let contract = T::contract();
    let mut batch = ValidatedBatch {
        accepted: Vec::with_capacity(records.len()),
        quarantined: Vec::new(),
    };

    for record in records {
        let issues = record.check();
        let Some(first) = issues.first().cloned() else {
            batch.accepted.push(record);
            continue;
        };
        let natural_key = record.natural_key().to_string();
        match mode {
            ValidationMode::FailFast => {
                return Err(ValidationError {
                    contract: contract.name,
                    natural_key,
                    issue: first,
                    issues,
                });
            }
            ValidationMode::Quarantine => {
                warn!(
                    contract = contract.name,
                    natural_key = %natural_key,
                    field = first.field(),
                    issue = %first,
                    "record quarantined"
                );
                let message = issues
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("; ");
                batch.quarantined.push(QuarantinedRecord {
                    table: contract.table().to_string(),
                    stage: contract.name.to_string(),
                    natural_key: Some(natural_key),
                    ordinal: None,
                    kind: RejectionKind::Validation,
                    message,
                });
            }
        }
    }
    Ok(batch)
}
