//! Tab-delimited source parsing.

mod header;
mod reader;

pub use header::{normalize_header, to_snake_case};
pub use reader::{SourceEncoding, decode_text, parse_rows, read_raw_batch};
