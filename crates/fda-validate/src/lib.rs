//! Output contract enforcement.
//!
//! Every Silver and Gold record is checked against an explicitly versioned
//! contract before it leaves the engine. Invalid records either abort the
//! batch or go to quarantine, depending on [`fda_model::ValidationMode`].

pub mod checks;
pub mod contract;
pub mod error;
pub mod issue;
pub mod validator;

pub use contract::{Contract, GOLD_PRODUCTS_V1, SILVER_PRODUCTS_V1};
pub use error::ValidationError;
pub use issue::Issue;
pub use validator::{Validate, ValidatedBatch, validate_records};
