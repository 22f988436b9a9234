//! Puzzle generation and validation
//!
//! Pool construction, candidate selection, corpus matching, pair counting,
//! the acceptance policy and the driver that ties them together.

mod cancel;
mod driver;
mod error;
mod matcher;
pub mod pairs;
mod policy;
mod pool;
mod selector;
mod stats;
mod uniqueness;

pub use cancel::CancelFlag;
pub use driver::{AttemptOutcome, Generator, RunRequest, RunStatus, RunSummary};
pub use error::GenerateError;
pub use matcher::Matcher;
pub use pairs::PairCounts;
pub use policy::{GenerationPolicy, PuzzleStats, QualityReport, RejectReason};
pub use pool::LetterPool;
pub use selector::{Candidate, select_from_pool, select_manual};
pub use stats::RunStats;
pub use uniqueness::{record_uniqueness, uniqueness};
