//! Word overlap between two puzzles

use super::uniq::resolve_target;
use crate::store::{PuzzleRecord, read_record};
use anyhow::{Context, Result, bail};
use rustc_hash::FxHashSet;
use std::path::Path;

/// Words two puzzles have in common
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overlap {
    pub left: String,
    pub right: String,
    pub left_count: usize,
    pub right_count: usize,
    /// Shared words, sorted
    pub shared: Vec<String>,
}

impl Overlap {
    /// Shared words as a percentage of each puzzle's word count
    #[must_use]
    pub fn shares(&self) -> (f64, f64) {
        let pct = |total: usize| {
            if total == 0 {
                0.0
            } else {
                self.shared.len() as f64 * 100.0 / total as f64
            }
        };
        (pct(self.left_count), pct(self.right_count))
    }
}

/// Compare two loaded records
#[must_use]
pub fn overlap(left: &PuzzleRecord, right: &PuzzleRecord) -> Overlap {
    let right_words: FxHashSet<&str> = right.word_list.iter().map(|w| w.word.as_str()).collect();
    let mut shared: Vec<String> = left
        .word_list
        .iter()
        .filter(|w| right_words.contains(w.word.as_str()))
        .map(|w| w.word.clone())
        .collect();
    shared.sort_unstable();
    shared.dedup();

    Overlap {
        left: left.key(),
        right: right.key(),
        left_count: left.word_count,
        right_count: right.word_count,
        shared,
    }
}

/// Load two puzzles by letters or path and compare them
///
/// # Errors
/// Returns an error if either target is not exactly one readable puzzle.
pub fn compare_puzzles(left: &str, right: &str, data_dir: &Path) -> Result<Overlap> {
    let a = load_one(left, data_dir)?;
    let b = load_one(right, data_dir)?;
    Ok(overlap(&a, &b))
}

fn load_one(target: &str, data_dir: &Path) -> Result<PuzzleRecord> {
    let paths = resolve_target(target, data_dir)?;
    let [path] = paths.as_slice() else {
        bail!("'{target}' names {} puzzles, expected one", paths.len());
    };
    read_record(path).with_context(|| format!("Failed to read puzzle {}", path.display()))
}
