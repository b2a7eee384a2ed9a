//! Free-text cleansing.

/// Collapses internal whitespace runs to one space and trims the ends.
pub fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Splits an ingredient list into trimmed, non-empty parts in source order.
///
/// ```
/// use fda_transform::split_ingredients;
///
/// assert_eq!(
///     split_ingredients("ASPIRIN; CAFFEINE;;", ';'),
///     vec!["ASPIRIN".to_string(), "CAFFEINE".to_string()]
/// );
/// assert!(split_ingredients("   ", ';').is_empty());
/// ```
pub fn split_ingredients(value: &str, delimiter: char) -> Vec<String> {
    value
        .split(delimiter)
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

/// Upper-cases an ingredient name and collapses its whitespace.
pub fn normalize_ingredient(value: &str) -> String {
    collapse_whitespace(value).to_uppercase()
}

/// Title-cases text, starting a new word after any non-alphabetic character.
///
/// ```
/// use fda_transform::normalization::title_case;
///
/// assert_eq!(title_case("TABLET;ORAL"), "Tablet;Oral");
/// assert_eq!(title_case("SOLUTION/DROPS;OPHTHALMIC"), "Solution/Drops;Ophthalmic");
/// ```
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut word_start = true;
    for ch in value.chars() {
        if ch.is_alphabetic() {
            if word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            word_start = false;
        } else {
            out.push(ch);
            word_start = true;
        }
    }
    out
}
