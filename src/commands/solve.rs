//! Puzzle solving command
//!
//! Shows every answer of a puzzle, generating the puzzle first if it has
//! not been stored yet.

use super::generate::load_config_corpus;
use crate::config::GeneratorConfig;
use crate::core::LetterSet;
use crate::generator::{CancelFlag, Generator, RunRequest};
use crate::store::{DirectoryStore, PuzzleRecord, PuzzleStore, StoreError};
use anyhow::{Context, Result};

/// Points added for each pangram when playing
pub const PANGRAM_BONUS: u32 = 7;

/// One answer as played
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub word: String,
    pub points: u32,
    pub is_pangram: bool,
}

/// Result of solving a puzzle
#[derive(Debug, Clone)]
pub struct SolveResult {
    pub record: PuzzleRecord,
    /// Whether the puzzle had to be generated first
    pub generated: bool,
    pub answers: Vec<Answer>,
    /// Total score including pangram bonuses
    pub max_score: u32,
}

impl SolveResult {
    #[must_use]
    pub fn from_record(record: PuzzleRecord, generated: bool) -> Self {
        let answers: Vec<Answer> = record
            .word_list
            .iter()
            .map(|w| {
                let is_pangram = record.pangram_list.contains(&w.word);
                Answer {
                    word: w.word.clone(),
                    points: w.score + if is_pangram { PANGRAM_BONUS } else { 0 },
                    is_pangram,
                }
            })
            .collect();
        let max_score = answers.iter().map(|a| a.points).sum();

        Self {
            record,
            generated,
            answers,
            max_score,
        }
    }
}

/// Solve the puzzle for `letters`
///
/// # Errors
///
/// Returns an error if:
/// - The letters are malformed
/// - The stored puzzle cannot be read
/// - The puzzle has to be generated and that fails
pub fn solve_puzzle(config: &GeneratorConfig, letters: &str) -> Result<SolveResult> {
    let letters = LetterSet::new(letters, config.policy.total_letter_count)
        .with_context(|| format!("Invalid letters {letters:?}"))?;
    let key = letters.key();
    let mut store = DirectoryStore::open(&config.data_dir)?;

    if let Some(record) = store.load(&key)? {
        log::info!("Existing puzzle {key}");
        return Ok(SolveResult::from_record(record, false));
    }

    log::info!("Creating puzzle {key}");
    let corpus = load_config_corpus(config)?;
    let generator = Generator::new(corpus.words(), config.policy.clone(), config.threads)?
        .with_source(config.word_list_path.display().to_string());
    generator.run(
        &RunRequest::Manual(letters),
        &mut store,
        &mut rand::rng(),
        &CancelFlag::new(),
        |_, _| {},
    )?;

    let record = store.load(&key)?.ok_or(StoreError::NotFound(key))?;
    Ok(SolveResult::from_record(record, true))
}
