//! Record-level contract checks.

pub mod content;
pub mod enrichment;
pub mod keys;

use fda_model::{GoldProduct, SilverProduct};

use crate::issue::Issue;

/// All `silver_products.v1` checks.
pub fn check_silver(product: &SilverProduct) -> Vec<Issue> {
    let mut issues = keys::check(product);
    issues.extend(content::check(product));
    issues
}

/// All `gold_products.v1` checks, including the Silver ones.
pub fn check_gold(product: &GoldProduct) -> Vec<Issue> {
    let mut issues = check_silver(&product.product);
    issues.extend(enrichment::check(product));
    issues
}
