//! Approval-date resolution and auxiliary hash indexes.
//!
//! All lookups are `HashMap`s keyed by the padded natural key (or `appl_no`
//! where a table is application-level). Duplicate keys resolve to one
//! deterministic winner when the index is built, so enrichment is a single
//! lookup per product and can never fan out.

use std::collections::HashMap;

use chrono::NaiveDate;
use fda_model::{ExclusivityWindow, NaturalKey};

use crate::normalization::{
    ApplicationRow, DateResolution, ExclusivityRow, LookupRow, MarketingStatusRow, ProductRow,
    SubmissionRow, TeRow,
};

/// Winning original-approval date for an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApprovalDate {
    pub date: NaiveDate,
    pub is_historic: bool,
    pub ordinal: usize,
}

/// Earliest resolved `ORIG` submission date per `appl_no`.
///
/// Ties on date go to the lowest submission number, then the lowest source
/// ordinal, so the result does not depend on row order.
pub fn resolve_original_approvals(submissions: &[SubmissionRow]) -> HashMap<String, ApprovalDate> {
    let mut winners: HashMap<String, &SubmissionRow> = HashMap::new();
    for row in submissions.iter().filter(|row| row.is_original()) {
        if row.status_date.date().is_none() {
            continue;
        }
        winners
            .entry(row.appl_no.clone())
            .and_modify(|current| {
                if approval_rank(row) < approval_rank(current) {
                    *current = row;
                }
            })
            .or_insert(row);
    }
    winners
        .into_iter()
        .filter_map(|(appl_no, row)| {
            row.status_date.date().map(|date| {
                (
                    appl_no,
                    ApprovalDate {
                        date,
                        is_historic: row.status_date.is_historic(),
                        ordinal: row.ordinal,
                    },
                )
            })
        })
        .collect()
}

fn approval_rank(row: &SubmissionRow) -> (Option<NaiveDate>, (bool, u64, &str), usize) {
    (row.status_date.date(), row.submission_order(), row.ordinal)
}

/// Where a product's approval date came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApprovalSource {
    Submission,
    /// No usable submission; the product row carried the legacy marker.
    LegacyFallback,
    Unresolved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApprovalOutcome {
    pub date: Option<NaiveDate>,
    pub is_historic: bool,
    pub source: ApprovalSource,
}

pub fn resolve_product_approval(
    product: &ProductRow,
    approvals: &HashMap<String, ApprovalDate>,
) -> ApprovalOutcome {
    if let Some(approval) = approvals.get(&product.appl_no) {
        return ApprovalOutcome {
            date: Some(approval.date),
            is_historic: approval.is_historic,
            source: ApprovalSource::Submission,
        };
    }
    match product.approval_hint {
        DateResolution::Historic(date) => ApprovalOutcome {
            date: Some(date),
            is_historic: true,
            source: ApprovalSource::LegacyFallback,
        },
        _ => ApprovalOutcome {
            date: None,
            is_historic: false,
            source: ApprovalSource::Unresolved,
        },
    }
}

/// Drugs@FDA marketing status descriptions, used when the lookup member is absent.
pub fn builtin_marketing_status_lookup() -> HashMap<u32, String> {
    [
        (1, "Prescription"),
        (2, "Over-the-counter"),
        (3, "Discontinued"),
        (4, "None (Tentative Approval)"),
    ]
    .into_iter()
    .map(|(id, description)| (id, description.to_string()))
    .collect()
}

/// Marketing status joined with its description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarketingStatusMatch<'a> {
    pub id: u32,
    pub description: Option<&'a str>,
}

/// Hash indexes over the auxiliary tables.
#[derive(Debug, Clone, Default)]
pub struct EnrichmentIndex {
    applications: HashMap<String, ApplicationRow>,
    marketing_status: HashMap<NaturalKey, u32>,
    lookup: HashMap<u32, String>,
    te_codes: HashMap<NaturalKey, String>,
    exclusivity: HashMap<NaturalKey, Vec<ExclusivityWindow>>,
    unresolved_exclusivity: usize,
}

impl EnrichmentIndex {
    /// Builds every index. `lookup` of `None` selects the built-in table.
    pub fn build(
        applications: &[ApplicationRow],
        marketing_status: &[MarketingStatusRow],
        lookup: Option<&[LookupRow]>,
        te: &[TeRow],
        exclusivity: &[ExclusivityRow],
    ) -> Self {
        let mut index = Self {
            applications: index_applications(applications),
            marketing_status: index_marketing_status(marketing_status),
            lookup: lookup.map_or_else(builtin_marketing_status_lookup, index_lookup),
            te_codes: index_te(te),
            ..Self::default()
        };
        for row in exclusivity {
            let Some(expiration_date) = row.expiration.date() else {
                index.unresolved_exclusivity += 1;
                continue;
            };
            index
                .exclusivity
                .entry(NaturalKey::new(row.appl_no.clone(), row.product_no.clone()))
                .or_default()
                .push(ExclusivityWindow {
                    appl_no: row.appl_no.clone(),
                    product_no: row.product_no.clone(),
                    exclusivity_code: row.exclusivity_code.clone(),
                    expiration_date,
                });
        }
        index
    }

    pub fn application(&self, appl_no: &str) -> Option<&ApplicationRow> {
        self.applications.get(appl_no)
    }

    pub fn marketing_status(&self, key: &NaturalKey) -> Option<MarketingStatusMatch<'_>> {
        self.marketing_status
            .get(key)
            .map(|id| MarketingStatusMatch {
                id: *id,
                description: self.lookup.get(id).map(String::as_str),
            })
    }

    pub fn te_code(&self, key: &NaturalKey) -> Option<&str> {
        self.te_codes.get(key).map(String::as_str)
    }

    pub fn exclusivity(&self, key: &NaturalKey) -> &[ExclusivityWindow] {
        self.exclusivity.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Exclusivity rows skipped because their date did not resolve.
    pub fn unresolved_exclusivity(&self) -> usize {
        self.unresolved_exclusivity
    }
}

fn index_applications(rows: &[ApplicationRow]) -> HashMap<String, ApplicationRow> {
    let mut index: HashMap<String, ApplicationRow> = HashMap::with_capacity(rows.len());
    for row in rows {
        match index.get(&row.appl_no) {
            Some(current) if current.ordinal <= row.ordinal => {}
            _ => {
                index.insert(row.appl_no.clone(), row.clone());
            }
        }
    }
    index
}

fn index_marketing_status(rows: &[MarketingStatusRow]) -> HashMap<NaturalKey, u32> {
    let mut index: HashMap<NaturalKey, u32> = HashMap::with_capacity(rows.len());
    for row in rows {
        let Some(id) = row.marketing_status_id else {
            continue;
        };
        index
            .entry(NaturalKey::new(row.appl_no.clone(), row.product_no.clone()))
            .and_modify(|current| *current = (*current).min(id))
            .or_insert(id);
    }
    index
}

fn index_lookup(rows: &[LookupRow]) -> HashMap<u32, String> {
    let mut index = HashMap::with_capacity(rows.len());
    let mut sorted: Vec<&LookupRow> = rows.iter().collect();
    sorted.sort_by_key(|row| row.ordinal);
    for row in sorted {
        if let Some(id) = row.marketing_status_id {
            index.entry(id).or_insert_with(|| row.description.clone());
        }
    }
    index
}

fn index_te(rows: &[TeRow]) -> HashMap<NaturalKey, String> {
    let mut index: HashMap<NaturalKey, String> = HashMap::with_capacity(rows.len());
    for row in rows.iter().filter(|row| !row.te_code.is_empty()) {
        index
            .entry(NaturalKey::new(row.appl_no.clone(), row.product_no.clone()))
            .and_modify(|current| {
                if row.te_code < *current {
                    current.clone_from(&row.te_code);
                }
            })
            .or_insert_with(|| row.te_code.clone());
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use fda_model::ApplicationType;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn submission(ordinal: usize, kind: &str, number: &str, date: DateResolution) -> SubmissionRow {
        SubmissionRow {
            ordinal,
            appl_no: "000010".to_string(),
            submission_type: kind.to_string(),
            submission_no: number.to_string(),
            status_date: date,
        }
    }

    #[test]
    fn earliest_orig_submission_wins() {
        let rows = vec![
            submission(0, "ORIG", "2", DateResolution::Resolved(ymd(2001, 1, 1))),
            submission(1, "SUPPL", "1", DateResolution::Resolved(ymd(1990, 1, 1))),
            submission(2, "ORIG", "3", DateResolution::Resolved(ymd(1999, 5, 5))),
            submission(3, "ORIG", "4", DateResolution::Unparseable),
        ];
        let approvals = resolve_original_approvals(&rows);
        let approval = approvals["000010"];
        assert_eq!(approval.date, ymd(1999, 5, 5));
        assert!(!approval.is_historic);
        assert_eq!(approval.ordinal, 2);
    }

    #[test]
    fn ties_break_on_submission_number_then_ordinal() {
        let date = DateResolution::Resolved(ymd(2000, 1, 1));
        let rows = vec![
            submission(0, "ORIG", "5", date),
            submission(1, "ORIG", "3", date),
            submission(2, "ORIG", "3", date),
        ];
        assert_eq!(resolve_original_approvals(&rows)["000010"].ordinal, 1);
    }

    #[test]
    fn legacy_submission_marks_historic() {
        let rows = vec![submission(0, "ORIG", "1", DateResolution::Historic(ymd(1982, 1, 1)))];
        let approval = resolve_original_approvals(&rows)["000010"];
        assert!(approval.is_historic);
        assert_eq!(approval.date, ymd(1982, 1, 1));
    }

    fn product(hint: DateResolution) -> ProductRow {
        ProductRow {
            ordinal: 0,
            appl_no: "000099".to_string(),
            product_no: "001".to_string(),
            form: "Tablet".to_string(),
            strength: "1MG".to_string(),
            drug_name: String::new(),
            active_ingredients: vec!["A".to_string()],
            approval_hint: hint,
        }
    }

    #[test]
    fn product_falls_back_to_legacy_marker() {
        let outcome = resolve_product_approval(
            &product(DateResolution::Historic(ymd(1982, 1, 1))),
            &HashMap::new(),
        );
        assert_eq!(outcome.source, ApprovalSource::LegacyFallback);
        assert!(outcome.is_historic);
    }

    #[test]
    fn product_without_any_date_is_unresolved() {
        let outcome = resolve_product_approval(
            &product(DateResolution::Resolved(ymd(2010, 1, 1))),
            &HashMap::new(),
        );
        assert_eq!(outcome.source, ApprovalSource::Unresolved);
        assert_eq!(outcome.date, None);
        assert!(!outcome.is_historic);
    }

    #[test]
    fn auxiliary_duplicates_resolve_deterministically() {
        let applications = vec![
            ApplicationRow {
                ordinal: 5,
                appl_no: "000001".to_string(),
                application_type: ApplicationType::Anda,
                sponsor_name: "LATER".to_string(),
            },
            ApplicationRow {
                ordinal: 2,
                appl_no: "000001".to_string(),
                application_type: ApplicationType::Nda,
                sponsor_name: "EARLIER".to_string(),
            },
        ];
        let marketing = vec![
            MarketingStatusRow {
                ordinal: 0,
                appl_no: "000001".to_string(),
                product_no: "001".to_string(),
                marketing_status_id: Some(3),
            },
            MarketingStatusRow {
                ordinal: 1,
                appl_no: "000001".to_string(),
                product_no: "001".to_string(),
                marketing_status_id: Some(1),
            },
        ];
        let te = vec![
            TeRow {
                ordinal: 0,
                appl_no: "000001".to_string(),
                product_no: "001".to_string(),
                te_code: "BX".to_string(),
            },
            TeRow {
                ordinal: 1,
                appl_no: "000001".to_string(),
                product_no: "001".to_string(),
                te_code: "AB".to_string(),
            },
        ];
        let index = EnrichmentIndex::build(&applications, &marketing, None, &te, &[]);
        let key = NaturalKey::new("000001", "001");

        assert_eq!(index.application("000001").unwrap().sponsor_name, "EARLIER");
        let status = index.marketing_status(&key).unwrap();
        assert_eq!(status.id, 1);
        assert_eq!(status.description, Some("Prescription"));
        assert_eq!(index.te_code(&key), Some("AB"));
        assert!(index.exclusivity(&key).is_empty());
    }

    #[test]
    fn supplied_lookup_replaces_builtin() {
        let lookup = vec![
            LookupRow {
                ordinal: 0,
                marketing_status_id: Some(1),
                description: "Rx".to_string(),
            },
            LookupRow {
                ordinal: 1,
                marketing_status_id: Some(1),
                description: "ignored".to_string(),
            },
        ];
        let marketing = vec![MarketingStatusRow {
            ordinal: 0,
            appl_no: "000001".to_string(),
            product_no: "001".to_string(),
            marketing_status_id: Some(1),
        }];
        let index = EnrichmentIndex::build(&[], &marketing, Some(&lookup), &[], &[]);
        let status = index
            .marketing_status(&NaturalKey::new("000001", "001"))
            .unwrap();
        assert_eq!(status.description, Some("Rx"));
    }

    #[test]
    fn exclusivity_without_date_is_skipped() {
        let rows = vec![
            ExclusivityRow {
                ordinal: 0,
                appl_no: "000001".to_string(),
                product_no: "001".to_string(),
                exclusivity_code: "NCE".to_string(),
                expiration: DateResolution::Resolved(ymd(2999, 1, 1)),
            },
            ExclusivityRow {
                ordinal: 1,
                appl_no: "000001".to_string(),
                product_no: "001".to_string(),
                exclusivity_code: "ODE".to_string(),
                expiration: DateResolution::Unparseable,
            },
        ];
        let index = EnrichmentIndex::build(&[], &[], None, &[], &rows);
        let windows = index.exclusivity(&NaturalKey::new("000001", "001"));
        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].exclusivity_code, "NCE");
        assert_eq!(index.unresolved_exclusivity(), 1);
    }
}
