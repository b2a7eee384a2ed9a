//! Reading every source table from one immutable snapshot.

use std::time::Instant;

use fda_model::{SourceFiles, SourceTable};
use tracing::{info, info_span, warn};

use crate::batch::{BatchOrigin, RawBatch};
use crate::csv::read_raw_batch;
use crate::error::{IngestError, Result};

/// All seven raw tables of one extract.
#[derive(Debug, Clone)]
pub struct RawSnapshot {
    pub products: RawBatch,
    pub applications: RawBatch,
    pub submissions: RawBatch,
    pub marketing_status: RawBatch,
    pub marketing_status_lookup: RawBatch,
    pub te: RawBatch,
    pub exclusivity: RawBatch,
}

impl RawSnapshot {
    pub fn batch(&self, table: SourceTable) -> &RawBatch {
        match table {
            SourceTable::Products => &self.products,
            SourceTable::Applications => &self.applications,
            SourceTable::Submissions => &self.submissions,
            SourceTable::MarketingStatus => &self.marketing_status,
            SourceTable::MarketingStatusLookup => &self.marketing_status_lookup,
            SourceTable::Te => &self.te,
            SourceTable::Exclusivity => &self.exclusivity,
        }
    }

    pub fn batches(&self) -> impl Iterator<Item = &RawBatch> {
        SourceTable::ALL.into_iter().map(|table| self.batch(table))
    }
}

/// Reads and schema-checks every table in `files`.
///
/// Missing Products or Submissions members are fatal. Any other missing
/// member becomes an empty table and a warning.
pub fn read_snapshot(files: &SourceFiles) -> Result<RawSnapshot> {
    let span = info_span!("ingest", members = files.len());
    let _guard = span.enter();
    let start = Instant::now();

    let read = |table: SourceTable| -> Result<RawBatch> {
        let batch = match files.get(table.file_name()) {
            Some(bytes) => read_raw_batch(table, table.file_name(), bytes)?,
            None if table.is_mandatory() => {
                return Err(IngestError::MissingTable {
                    table,
                    file: table.file_name(),
                });
            }
            None => {
                warn!(
                    table = %table,
                    file = table.file_name(),
                    "auxiliary source file missing, joins against it will be gaps"
                );
                RawBatch::empty(table, BatchOrigin::Substituted)?
            }
        };
        batch.require_columns()?;
        info!(table = %table, rows = batch.height(), "read source table");
        Ok(batch)
    };

    let snapshot = RawSnapshot {
        products: read(SourceTable::Products)?,
        applications: read(SourceTable::Applications)?,
        submissions: read(SourceTable::Submissions)?,
        marketing_status: read(SourceTable::MarketingStatus)?,
        marketing_status_lookup: read(SourceTable::MarketingStatusLookup)?,
        te: read(SourceTable::Te)?,
        exclusivity: read(SourceTable::Exclusivity)?,
    };
    info!(
        duration_ms = start.elapsed().as_millis() as u64,
        "snapshot ingested"
    );
    Ok(snapshot)
}
