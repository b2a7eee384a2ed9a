//! Content hash, ingredients, and historic-date consistency.

use fda_model::SilverProduct;
use fda_transform::normalization::legacy_cutoff;
use fda_transform::{TrackedFields, content_hash};

use crate::issue::Issue;

pub fn check(product: &SilverProduct) -> Vec<Issue> {
    let mut issues = Vec::new();

    if is_sha256_hex(&product.content_hash) {
        if product.content_hash != content_hash(&TrackedFields::of(product)) {
            issues.push(Issue::ContentHashMismatch);
        }
    } else {
        issues.push(Issue::MalformedContentHash {
            value: product.content_hash.clone(),
        });
    }

    for (index, ingredient) in product.active_ingredients.iter().enumerate() {
        if ingredient.is_empty() || ingredient.trim() != ingredient {
            issues.push(Issue::IngredientNotNormalized {
                index,
                value: ingredient.clone(),
            });
        }
    }

    if product.is_historic_record {
        match product.original_approval_date {
            None => issues.push(Issue::HistoricDateConflict { date: None }),
            Some(date) if date > legacy_cutoff() => issues.push(Issue::HistoricDateConflict {
                date: Some(date.format("%Y-%m-%d").to_string()),
            }),
            Some(_) => {}
        }
    }
    issues
}

fn is_sha256_hex(value: &str) -> bool {
    value.len() == 64
        && value
            .bytes()
            .all(|byte| byte.is_ascii_digit() || (b'a'..=b'f').contains(&byte))
}
