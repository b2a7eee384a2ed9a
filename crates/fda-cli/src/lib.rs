//! CLI library components for the Drugs@FDA medallion runner.

pub mod cli;
pub mod config;
pub mod logging;
