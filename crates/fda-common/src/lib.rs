//! Shared utilities for the Drugs@FDA medallion crates.
//!
//! Polars helpers used by ingestion and by the frame builders that feed the
//! load adapters.

pub mod polars;

pub use polars::{
    any_to_string, column_strings, column_value_string, optional_string_column, string_column,
};
