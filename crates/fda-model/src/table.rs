//! Source table definitions for the Drugs@FDA extract.
//!
//! Column names are the snake_case form of the publisher headers, which is
//! how the reader exposes them. Changing what a table requires is a code
//! change here; unknown extra columns are carried into Bronze untouched.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Schema version the table definitions below were written against.
pub const SCHEMA_VERSION: &str = "drugsatfda.2024";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceTable {
    Products,
    Applications,
    Submissions,
    MarketingStatus,
    MarketingStatusLookup,
    Te,
    Exclusivity,
}

impl SourceTable {
    pub const ALL: [SourceTable; 7] = [
        SourceTable::Products,
        SourceTable::Applications,
        SourceTable::Submissions,
        SourceTable::MarketingStatus,
        SourceTable::MarketingStatusLookup,
        SourceTable::Te,
        SourceTable::Exclusivity,
    ];

    /// Logical table name used in logs, summaries, and quarantine records.
    pub fn name(self) -> &'static str {
        match self {
            SourceTable::Products => "products",
            SourceTable::Applications => "applications",
            SourceTable::Submissions => "submissions",
            SourceTable::MarketingStatus => "marketing_status",
            SourceTable::MarketingStatusLookup => "marketing_status_lookup",
            SourceTable::Te => "te",
            SourceTable::Exclusivity => "exclusivity",
        }
    }

    /// Member file name inside the publisher archive.
    pub fn file_name(self) -> &'static str {
        match self {
            SourceTable::Products => "Products.txt",
            SourceTable::Applications => "Applications.txt",
            SourceTable::Submissions => "Submissions.txt",
            SourceTable::MarketingStatus => "MarketingStatus.txt",
            SourceTable::MarketingStatusLookup => "MarketingStatus_Lookup.txt",
            SourceTable::Te => "TE.txt",
            SourceTable::Exclusivity => "Exclusivity.txt",
        }
    }

    pub fn bronze_name(self) -> String {
        format!("bronze_{}", self.name())
    }

    /// Columns that must be present once headers are normalized.
    pub fn required_columns(self) -> &'static [&'static str] {
        match self {
            SourceTable::Products => &[
                "appl_no",
                "product_no",
                "form",
                "strength",
                "active_ingredient",
            ],
            SourceTable::Applications => &["appl_no", "appl_type", "sponsor_name"],
            SourceTable::Submissions => &[
                "appl_no",
                "submission_type",
                "submission_no",
                "submission_status_date",
            ],
            SourceTable::MarketingStatus => &["marketing_status_id", "appl_no", "product_no"],
            SourceTable::MarketingStatusLookup => {
                &["marketing_status_id", "marketing_status_description"]
            }
            SourceTable::Te => &["appl_no", "product_no", "te_code"],
            SourceTable::Exclusivity => &[
                "appl_no",
                "product_no",
                "exclusivity_code",
                "exclusivity_date",
            ],
        }
    }

    /// Products and Submissions cannot be substituted by an empty table.
    pub fn is_mandatory(self) -> bool {
        matches!(self, SourceTable::Products | SourceTable::Submissions)
    }

    /// Auxiliary tables that feed Gold enrichment.
    pub fn is_auxiliary(self) -> bool {
        !self.is_mandatory()
    }
}

impl fmt::Display for SourceTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
