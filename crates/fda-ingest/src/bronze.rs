//! Bronze layer: raw tables with normalized column names.

use fda_model::SourceTable;
use polars::prelude::DataFrame;

use crate::batch::BatchOrigin;
use crate::snapshot::RawSnapshot;

/// One Bronze table, row-for-row with its source member.
#[derive(Debug, Clone)]
pub struct BronzeTable {
    pub table: SourceTable,
    pub name: String,
    pub source_file: String,
    pub frame: DataFrame,
}

impl BronzeTable {
    pub fn height(&self) -> usize {
        self.frame.height()
    }
}

/// Builds one Bronze table per member present in the snapshot.
///
/// Substituted empty tables have no source member and are not emitted.
pub fn build_bronze(snapshot: &RawSnapshot) -> Vec<BronzeTable> {
    snapshot
        .batches()
        .filter_map(|batch| match batch.origin() {
            BatchOrigin::File { name, .. } => Some(BronzeTable {
                table: batch.table(),
                name: batch.table().bronze_name(),
                source_file: name.clone(),
                frame: batch.frame().clone(),
            }),
            BatchOrigin::Substituted => None,
        })
        .collect()
}
