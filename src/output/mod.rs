//! Terminal output formatting
//!
//! Per-attempt reporting during generation and pretty-printing of command
//! results.

pub mod display;
pub mod formatters;
mod report;

pub use display::{print_overlap, print_run_summary, print_solve_result, print_uniqueness};
pub use report::{ProgressUnit, ReportMode, Reporter};
