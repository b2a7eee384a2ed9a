use std::fmt;

/// The `(appl_no, product_no)` natural key of a product.
///
/// Both parts are expected to be already padded; construction does not
/// re-validate them so that contract checks can report malformed keys.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct NaturalKey {
    pub appl_no: String,
    pub product_no: String,
}

impl NaturalKey {
    pub fn new(appl_no: impl Into<String>, product_no: impl Into<String>) -> Self {
        Self {
            appl_no: appl_no.into(),
            product_no: product_no.into(),
        }
    }

    /// `"{appl_no}|{product_no}"`, the identity input and `source_key` value.
    pub fn source_key(&self) -> String {
        format!("{}|{}", self.appl_no, self.product_no)
    }
}

impl fmt::Display for NaturalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.appl_no, self.product_no)
    }
}
