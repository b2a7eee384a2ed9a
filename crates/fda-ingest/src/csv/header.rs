//! Header normalization.

use std::sync::LazyLock;

use regex::Regex;

static WORD_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(.)([A-Z][a-z]+)").expect("Invalid word boundary regex"));
static CASE_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z0-9])([A-Z])").expect("Invalid case boundary regex"));
static SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s\-_]+").expect("Invalid separator regex"));

/// Converts a publisher header such as `MarketingStatusID` to `marketing_status_id`.
///
/// ```
/// use fda_ingest::to_snake_case;
///
/// assert_eq!(to_snake_case("ApplNo"), "appl_no");
/// assert_eq!(to_snake_case("TECode"), "te_code");
/// assert_eq!(to_snake_case("MarketingStatusID"), "marketing_status_id");
/// ```
pub fn to_snake_case(value: &str) -> String {
    let step = WORD_BOUNDARY.replace_all(value, "${1}_${2}");
    let step = CASE_BOUNDARY.replace_all(&step, "${1}_${2}");
    let step = SEPARATORS.replace_all(&step, "_");
    step.trim_matches('_').to_lowercase()
}

/// Trims a raw header cell, strips a stray BOM, and snake-cases it.
pub fn normalize_header(raw: &str) -> String {
    to_snake_case(raw.trim().trim_matches('\u{feff}').trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publisher_headers() {
        assert_eq!(normalize_header("SubmissionStatusDate"), "submission_status_date");
        assert_eq!(normalize_header("ActiveIngredient"), "active_ingredient");
        assert_eq!(normalize_header("SponsorName "), "sponsor_name");
        assert_eq!(
            normalize_header("MarketingStatusDescription"),
            "marketing_status_description"
        );
        assert_eq!(normalize_header("ExclusivityDate"), "exclusivity_date");
    }

    #[test]
    fn already_snake_case_is_stable() {
        assert_eq!(normalize_header("appl_no"), "appl_no");
        assert_eq!(normalize_header("te_code"), "te_code");
    }

    #[test]
    fn separators_collapse() {
        assert_eq!(normalize_header("Appl  No"), "appl_no");
        assert_eq!(normalize_header("\u{feff}ApplNo"), "appl_no");
    }
}
