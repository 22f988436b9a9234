//! Command implementations

pub mod compare;
pub mod generate;
pub mod solve;
pub mod uniq;

pub use compare::{Overlap, compare_puzzles, overlap};
pub use generate::{GenerateMode, load_config_corpus, run_generate};
pub use solve::{Answer, PANGRAM_BONUS, SolveResult, solve_puzzle};
pub use uniq::{UniqRow, rank_uniqueness, resolve_target};
