//! Gold enrichment fields and derived flags.

use fda_model::{ApplicationType, GoldProduct, UNKNOWN};

use crate::issue::Issue;

pub fn check(product: &GoldProduct) -> Vec<Issue> {
    let mut issues = Vec::new();
    for (field, value) in [
        ("sponsor_name", &product.sponsor_name),
        ("application_type", &product.application_type),
        ("marketing_status_description", &product.marketing_status_description),
        ("te_code", &product.te_code),
    ] {
        if value.trim().is_empty() {
            issues.push(Issue::EmptyEnrichment {
                field: field.to_string(),
            });
        }
    }

    if product.marketing_status_id.is_none() && product.marketing_status_description != UNKNOWN {
        issues.push(Issue::OrphanMarketingDescription {
            description: product.marketing_status_description.clone(),
        });
    }

    let expected_generic = ApplicationType::parse(&product.application_type).is_generic();
    if product.is_generic != expected_generic {
        issues.push(Issue::GenericFlagMismatch {
            application_type: product.application_type.clone(),
            is_generic: product.is_generic,
        });
    }

    if product.is_protected && product.exclusivity_expiration.is_none() {
        issues.push(Issue::ProtectionWithoutExclusivity);
    }

    let text = &product.search_text;
    let normalized = text.split_whitespace().collect::<Vec<_>>().join(" ");
    // Same mapping the builder applies; some capitals have no lowercase form.
    if *text != normalized || *text != text.to_lowercase() {
        issues.push(Issue::SearchTextNotNormalized);
    }
    issues
}
