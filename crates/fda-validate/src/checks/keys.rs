//! Natural key, source key, and identity consistency.

use fda_model::SilverProduct;
use fda_transform::normalization::{APPL_NO_WIDTH, PRODUCT_NO_WIDTH};
use fda_transform::product_identity;

use crate::issue::Issue;

pub fn check(product: &SilverProduct) -> Vec<Issue> {
    let mut issues = Vec::new();
    check_identifier(&mut issues, "appl_no", &product.appl_no, APPL_NO_WIDTH);
    check_identifier(&mut issues, "product_no", &product.product_no, PRODUCT_NO_WIDTH);

    let key = product.natural_key();
    let expected_source_key = key.source_key();
    if product.source_key != expected_source_key {
        issues.push(Issue::SourceKeyMismatch {
            expected: expected_source_key,
            found: product.source_key.clone(),
        });
    }

    let expected_identity = product_identity(&key);
    if product.identity != expected_identity {
        issues.push(Issue::IdentityMismatch {
            expected: expected_identity.to_string(),
            found: product.identity.to_string(),
        });
    }
    issues
}

fn check_identifier(issues: &mut Vec<Issue>, field: &str, value: &str, width: usize) {
    if value.len() != width || !value.bytes().all(|byte| byte.is_ascii_digit()) {
        issues.push(Issue::MalformedIdentifier {
            field: field.to_string(),
            value: value.to_string(),
            width,
        });
    }
}
