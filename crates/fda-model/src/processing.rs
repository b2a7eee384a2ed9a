//! Run-level counters and the summary emitted with every successful run.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::options::ValidationMode;
use crate::table::SourceTable;

/// Row counts per output layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerCounts {
    /// Bronze table name to row count.
    pub bronze: BTreeMap<String, usize>,
    pub silver: usize,
    pub gold: usize,
    pub quarantined: usize,
}

/// Non-fatal data-quality observations accumulated during a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnomalyCounters {
    /// Products whose approval date came from the legacy marker.
    pub historic_dates: usize,
    /// Products with no resolvable approval date.
    pub unresolved_approval_dates: usize,
    /// Source date cells that were neither a date nor the legacy marker.
    pub unparseable_dates: usize,
    /// Left-join misses keyed by auxiliary table name.
    pub join_gaps: BTreeMap<String, usize>,
    pub unknown_application_types: usize,
    pub duplicate_product_keys: usize,
    /// Silver records removed because their Gold record was quarantined.
    #[serde(default)]
    pub withdrawn_silver_records: usize,
}

impl AnomalyCounters {
    pub fn record_join_gap(&mut self, table: SourceTable) {
        *self.join_gaps.entry(table.name().to_string()).or_default() += 1;
    }

    pub fn join_gap_count(&self, table: SourceTable) -> usize {
        self.join_gaps.get(table.name()).copied().unwrap_or(0)
    }

    pub fn total_join_gaps(&self) -> usize {
        self.join_gaps.values().sum()
    }

    /// Folds counters from an independent stage into this one.
    pub fn merge(&mut self, other: &AnomalyCounters) {
        self.historic_dates += other.historic_dates;
        self.unresolved_approval_dates += other.unresolved_approval_dates;
        self.unparseable_dates += other.unparseable_dates;
        self.unknown_application_types += other.unknown_application_types;
        self.duplicate_product_keys += other.duplicate_product_keys;
        self.withdrawn_silver_records += other.withdrawn_silver_records;
        for (table, count) in &other.join_gaps {
            *self.join_gaps.entry(table.clone()).or_default() += count;
        }
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub dataset: String,
    pub schema_version: String,
    pub silver_contract: String,
    pub gold_contract: String,
    pub validation_mode: ValidationMode,
    pub evaluation_date: NaiveDate,
    pub counts: LayerCounts,
    pub anomalies: AnomalyCounters,
}
