pub mod cancel;
pub mod context;
pub mod error;
pub mod frame;
pub mod gold;
pub mod normalize;
pub mod pipeline;
pub mod silver;

pub use cancel::CancellationToken;
pub use context::PipelineContext;
pub use error::{PipelineError, Result};
pub use frame::{gold_frame, quarantine_frame, silver_frame};
pub use gold::{GoldOutput, build_gold, build_search_text};
pub use normalize::{NormalizedSnapshot, apply_format_policy, normalize_snapshot};
pub use pipeline::{RunOutput, Stage, run_pipeline};
pub use silver::{SilverOutput, build_silver};
