//! Fixed-width identifier padding.

use fda_model::IdentifierError;

/// Width of `appl_no` after padding.
pub const APPL_NO_WIDTH: usize = 6;
/// Width of `product_no` after padding.
pub const PRODUCT_NO_WIDTH: usize = 3;

/// Left-pads a numeric identifier with zeros to exactly `width` characters.
///
/// Input is trimmed first. Never truncates: over-wide input is an error.
///
/// ```
/// use fda_transform::pad_identifier;
///
/// assert_eq!(pad_identifier(" 123", 6).unwrap(), "000123");
/// assert_eq!(pad_identifier("000123", 6).unwrap(), "000123");
/// assert!(pad_identifier("12A", 6).is_err());
/// assert!(pad_identifier("1234567", 6).is_err());
/// ```
pub fn pad_identifier(value: &str, width: usize) -> Result<String, IdentifierError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(IdentifierError::Empty);
    }
    if !trimmed.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(IdentifierError::NonNumeric {
            value: trimmed.to_string(),
        });
    }
    if trimmed.len() > width {
        return Err(IdentifierError::TooWide {
            value: trimmed.to_string(),
            width,
        });
    }
    Ok(format!("{trimmed:0>width$}"))
}
