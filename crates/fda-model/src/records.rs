//! Row and record types flowing through the medallion layers.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ids::NaturalKey;

/// Sentinel written into enrichment fields when a left join finds no match.
pub const UNKNOWN: &str = "UNKNOWN";

/// A refined product, one per unique natural key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SilverProduct {
    pub identity: Uuid,
    pub source_key: String,
    pub appl_no: String,
    pub product_no: String,
    pub form: String,
    pub strength: String,
    pub drug_name: String,
    pub active_ingredients: Vec<String>,
    pub original_approval_date: Option<NaiveDate>,
    pub is_historic_record: bool,
    pub content_hash: String,
}

impl SilverProduct {
    pub fn natural_key(&self) -> NaturalKey {
        NaturalKey::new(self.appl_no.clone(), self.product_no.clone())
    }
}

/// A Silver product enriched with application, marketing, TE and
/// exclusivity data plus derived flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoldProduct {
    #[serde(flatten)]
    pub product: SilverProduct,
    pub sponsor_name: String,
    pub application_type: String,
    pub marketing_status_id: Option<u32>,
    pub marketing_status_description: String,
    pub te_code: String,
    pub exclusivity_expiration: Option<NaiveDate>,
    pub is_generic: bool,
    pub is_protected: bool,
    pub search_text: String,
}

impl GoldProduct {
    pub fn natural_key(&self) -> NaturalKey {
        self.product.natural_key()
    }
}

/// One exclusivity grant for a product.
///
/// The start date is implicit in the source; only the expiration matters for
/// protection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusivityWindow {
    pub appl_no: String,
    pub product_no: String,
    pub exclusivity_code: String,
    pub expiration_date: NaiveDate,
}

impl ExclusivityWindow {
    /// A window protects on its expiration day too.
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        self.expiration_date >= date
    }
}

/// Application type after publisher code normalization.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ApplicationType {
    Nda,
    Anda,
    Bla,
    Other(String),
}

impl ApplicationType {
    /// Parses publisher codes; single-letter forms map to the full names.
    ///
    /// ```
    /// use fda_model::ApplicationType;
    ///
    /// assert_eq!(ApplicationType::parse(" a "), ApplicationType::Anda);
    /// assert_eq!(ApplicationType::parse("NDA"), ApplicationType::Nda);
    /// ```
    pub fn parse(raw: &str) -> Self {
        let code = raw.trim().to_ascii_uppercase();
        match code.as_str() {
            "A" | "ANDA" => ApplicationType::Anda,
            "N" | "NDA" => ApplicationType::Nda,
            "B" | "BLA" => ApplicationType::Bla,
            _ => ApplicationType::Other(code),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ApplicationType::Nda => "NDA",
            ApplicationType::Anda => "ANDA",
            ApplicationType::Bla => "BLA",
            ApplicationType::Other(code) => code,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, ApplicationType::Other(_))
    }

    pub fn is_generic(&self) -> bool {
        matches!(self, ApplicationType::Anda)
    }
}

impl fmt::Display for ApplicationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
