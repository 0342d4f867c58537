pub mod aggregate;
pub mod calculator;
pub mod discovery;
pub mod error;
pub mod identity;
pub mod pipeline;
pub mod recording;
pub mod segmenter;
pub mod sink;
pub mod types;

pub use aggregate::build_bundle;
pub use calculator::{Calculator, SummaryCalculator};
pub use discovery::{check_quality, discover_files};
pub use error::{Result, TevaError};
pub use identity::EventId;
pub use pipeline::{compute_bundle, process_batch, process_file, BatchSummary, FileSummary, RunContext};
pub use recording::Recording;
pub use segmenter::{segment_events, RangeCondition};
pub use types::*;
