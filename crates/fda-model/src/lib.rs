pub mod conformance;
pub mod error;
pub mod ids;
pub mod options;
pub mod processing;
pub mod records;
pub mod source;
pub mod table;

pub use conformance::{QuarantinedRecord, RejectionKind};
pub use error::{FormatError, IdentifierError};
pub use ids::NaturalKey;
pub use options::{DEFAULT_LEGACY_MARKER, OutputFormat, ProcessingOptions, ValidationMode};
pub use processing::{AnomalyCounters, LayerCounts, RunSummary};
pub use records::{ApplicationType, ExclusivityWindow, GoldProduct, SilverProduct, UNKNOWN};
pub use source::SourceFiles;
pub use table::{SCHEMA_VERSION, SourceTable};
