//! Stable identities and content hashes for Silver products.

use chrono::NaiveDate;
use fda_model::{NaturalKey, SilverProduct};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Namespace for product identities. Changing it re-keys every product.
pub const PRODUCT_NAMESPACE_V1: Uuid = Uuid::from_u128(0x9a52_7060_639d_5a63_a612_9c16_7332_2488);

/// UUIDv5 of `"{appl_no}|{product_no}"` under [`PRODUCT_NAMESPACE_V1`].
pub fn product_identity(key: &NaturalKey) -> Uuid {
    Uuid::new_v5(&PRODUCT_NAMESPACE_V1, key.source_key().as_bytes())
}

/// The content fields a product hash covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackedFields<'a> {
    pub appl_no: &'a str,
    pub product_no: &'a str,
    pub form: &'a str,
    pub strength: &'a str,
    pub active_ingredients: &'a [String],
    pub original_approval_date: Option<NaiveDate>,
    pub is_historic_record: bool,
    pub drug_name: &'a str,
}

impl<'a> TrackedFields<'a> {
    pub fn of(product: &'a SilverProduct) -> Self {
        Self {
            appl_no: &product.appl_no,
            product_no: &product.product_no,
            form: &product.form,
            strength: &product.strength,
            active_ingredients: &product.active_ingredients,
            original_approval_date: product.original_approval_date,
            is_historic_record: product.is_historic_record,
            drug_name: &product.drug_name,
        }
    }
}

/// Lowercase hex SHA-256 over the tracked fields.
///
/// Every field is written as `name`, then a length-prefixed value, so
/// adjacent values cannot run into each other.
pub fn content_hash(fields: &TrackedFields<'_>) -> String {
    let mut hasher = Sha256::new();
    frame(&mut hasher, "appl_no", fields.appl_no.as_bytes());
    frame(&mut hasher, "product_no", fields.product_no.as_bytes());
    frame(&mut hasher, "form", fields.form.as_bytes());
    frame(&mut hasher, "strength", fields.strength.as_bytes());

    frame(
        &mut hasher,
        "active_ingredients",
        &(fields.active_ingredients.len() as u64).to_be_bytes(),
    );
    for ingredient in fields.active_ingredients {
        frame(&mut hasher, "ingredient", ingredient.as_bytes());
    }

    match fields.original_approval_date {
        Some(date) => frame(
            &mut hasher,
            "original_approval_date",
            date.format("%Y-%m-%d").to_string().as_bytes(),
        ),
        None => frame(&mut hasher, "original_approval_date:none", &[]),
    }
    frame(
        &mut hasher,
        "is_historic_record",
        &[u8::from(fields.is_historic_record)],
    );
    frame(&mut hasher, "drug_name", fields.drug_name.as_bytes());
    hex::encode(hasher.finalize())
}

fn frame(hasher: &mut Sha256, name: &str, value: &[u8]) {
    hasher.update((name.len() as u64).to_be_bytes());
    hasher.update(name.as_bytes());
    hasher.update((value.len() as u64).to_be_bytes());
    hasher.update(value);
}
