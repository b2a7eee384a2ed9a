//! Raw batch reading and Bronze table construction.
//!
//! Every source member is parsed into a string-typed polars frame with
//! snake_case column names. No business logic happens here.

pub mod batch;
pub mod bronze;
pub mod csv;
pub mod error;
pub mod snapshot;

pub use batch::{BatchOrigin, RawBatch};
pub use bronze::{BronzeTable, build_bronze};
pub use csv::{SourceEncoding, decode_text, read_raw_batch, to_snake_case};
pub use error::{IngestError, Result};
pub use snapshot::{RawSnapshot, read_snapshot};
