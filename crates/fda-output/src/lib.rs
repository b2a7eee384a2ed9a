//! Load adapters: where a completed run goes.
//!
//! A destination receives a whole [`RunOutput`] or nothing. The filesystem
//! destination stages every file before swapping the dataset directory into
//! place, so readers never observe a partial run.

pub mod destination;
pub mod error;
pub mod filesystem;
pub mod memory;
pub mod writer;

pub use destination::{DestinationKind, DryRunDestination, LoadAdapter, destination_for};
pub use error::{LoadError, Result};
pub use filesystem::{FilesystemDestination, RUN_SUMMARY_FILE};
pub use memory::MemoryDestination;

pub use fda_core::RunOutput;
