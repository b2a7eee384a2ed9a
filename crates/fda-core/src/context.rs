//! Immutable configuration shared by every stage of a run.

use chrono::NaiveDate;
use fda_model::{ProcessingOptions, ValidationMode};
use fda_transform::{LegacyDateTable, NormalizationContext};

pub const DEFAULT_DATASET_NAME: &str = "drugs_fda";

/// Everything a stage needs to know about the run it belongs to.
///
/// Built once before the run and passed by reference; no stage mutates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineContext {
    /// Target dataset name, used for output layout and the run summary.
    pub dataset_name: String,
    /// Date `is_protected` is evaluated against.
    pub evaluation_date: NaiveDate,
    pub options: ProcessingOptions,
    pub normalization: NormalizationContext,
}

impl PipelineContext {
    pub fn new(evaluation_date: NaiveDate) -> Self {
        let options = ProcessingOptions::default();
        Self {
            dataset_name: DEFAULT_DATASET_NAME.to_string(),
            evaluation_date,
            normalization: normalization_for(&options),
            options,
        }
    }

    /// Context evaluated against today's local date.
    pub fn for_today() -> Self {
        Self::new(chrono::Local::now().date_naive())
    }

    pub fn with_dataset_name(mut self, name: impl Into<String>) -> Self {
        self.dataset_name = name.into();
        self
    }

    pub fn with_evaluation_date(mut self, date: NaiveDate) -> Self {
        self.evaluation_date = date;
        self
    }

    /// Replaces the options; the legacy table and delimiter follow them.
    pub fn with_options(mut self, options: ProcessingOptions) -> Self {
        self.normalization = normalization_for(&options);
        self.options = options;
        self
    }

    /// Overrides the legacy table built from the options' marker.
    pub fn with_legacy_dates(mut self, table: LegacyDateTable) -> Self {
        self.normalization.legacy_dates = table;
        self
    }

    pub fn validation_mode(&self) -> ValidationMode {
        self.options.validation_mode
    }
}

fn normalization_for(options: &ProcessingOptions) -> NormalizationContext {
    NormalizationContext {
        legacy_dates: LegacyDateTable::with_marker(options.legacy_marker.clone()),
        ingredient_delimiter: options.ingredient_delimiter,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_drive_normalization() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let context = PipelineContext::new(date).with_options(
            ProcessingOptions::new()
                .with_legacy_marker("Before 1982")
                .with_ingredient_delimiter('|')
                .with_validation_mode(ValidationMode::Quarantine),
        );
        assert_eq!(context.normalization.ingredient_delimiter, '|');
        assert!(context.normalization.legacy_dates.lookup("Before 1982").is_some());
        assert_eq!(context.validation_mode(), ValidationMode::Quarantine);
        assert_eq!(context.dataset_name, DEFAULT_DATASET_NAME);
    }
}
