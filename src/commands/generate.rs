//! Puzzle generation command
//!
//! Loads the corpus, opens the puzzle directory and drives a run, reporting
//! every attempt as it happens.

use crate::config::GeneratorConfig;
use crate::core::LetterSet;
use crate::corpus::Corpus;
use crate::corpus::loader::{CorpusSources, load_corpus};
use crate::generator::{CancelFlag, Generator, RunRequest, RunSummary};
use crate::output::{ProgressUnit, Reporter};
use crate::store::DirectoryStore;
use anyhow::{Context, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Kind of generation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateMode {
    /// Score the given letters and always write them
    Manual(String),
    /// Rescore every stored puzzle
    Regenerate,
    /// Sample new puzzles until the configured count or try budget is reached
    Batch,
}

/// Load the corpus described by a config
///
/// # Errors
/// Returns an error if the main word list cannot be read.
pub fn load_config_corpus(config: &GeneratorConfig) -> Result<Corpus> {
    let sources = CorpusSources {
        word_list: &config.word_list_path,
        add_list: config.add_list_path.as_deref(),
        remove_list: config.remove_list_path.as_deref(),
    };
    load_corpus(sources, config.policy.min_word_length).with_context(|| {
        format!(
            "Failed to load word list {}",
            config.word_list_path.display()
        )
    })
}

/// Run a generation request against the configured puzzle directory
///
/// With a `seed`, sampling is reproducible.
///
/// # Errors
///
/// Returns an error if:
/// - Manual letters are malformed
/// - The word list or puzzle directory cannot be read
/// - A batch run has no words or letter combinations to sample from
/// - A puzzle cannot be written
pub fn run_generate(
    config: &GeneratorConfig,
    mode: &GenerateMode,
    seed: Option<u64>,
    cancel: &CancelFlag,
) -> Result<RunSummary> {
    let request = match mode {
        GenerateMode::Manual(text) => {
            let letters = LetterSet::new(text, config.policy.total_letter_count)
                .with_context(|| format!("Invalid letters {text:?}"))?;
            RunRequest::Manual(letters)
        }
        GenerateMode::Regenerate => RunRequest::Regenerate,
        GenerateMode::Batch => RunRequest::Batch {
            count: config.puzzle_count,
            max_tries: config.max_puzzle_tries,
        },
    };

    let corpus = load_config_corpus(config)?;
    let mut store = DirectoryStore::open(&config.data_dir).with_context(|| {
        format!(
            "Failed to open puzzle directory {}",
            config.data_dir.display()
        )
    })?;
    log::info!(
        "{} puzzles already in {}",
        store.len(),
        config.data_dir.display()
    );

    let generator = Generator::new(corpus.words(), config.policy.clone(), config.threads)?
        .with_source(config.word_list_path.display().to_string());

    let mut rng = seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);

    let reporter = Reporter::new(
        config.print_valid,
        config.print_invalid,
        matches!(mode, GenerateMode::Batch),
        config.warn_invalid_manual,
    );
    let mut reporter = match mode {
        GenerateMode::Batch => reporter.with_progress(config.puzzle_count, ProgressUnit::Valid),
        GenerateMode::Regenerate => reporter.with_progress(store.len(), ProgressUnit::Attempts),
        GenerateMode::Manual(_) => reporter,
    };

    let result = generator.run(&request, &mut store, &mut rng, cancel, |outcome, stats| {
        reporter.report(outcome, stats);
    });
    reporter.finish();

    Ok(result?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{GenerationPolicy, RunStatus};
    use crate::output::ReportMode;
    use crate::store::PuzzleStore;
    use std::fs;
    use tempfile::TempDir;

    fn config(dir: &TempDir, words: &str) -> GeneratorConfig {
        let word_list = dir.path().join("words.txt");
        fs::write(&word_list, words).unwrap();
        GeneratorConfig {
            word_list_path: word_list,
            add_list_path: None,
            remove_list_path: None,
            data_dir: dir.path().join("data"),
            print_valid: ReportMode::Silent,
            print_invalid: ReportMode::Silent,
            ..GeneratorConfig::default()
        }
    }

    fn lenient() -> GenerationPolicy {
        GenerationPolicy {
            min_word_count: 1,
            min_total_score: 1,
            ..GenerationPolicy::default()
        }
    }

    #[test]
    fn manual_run_writes_puzzle() {
        let dir = TempDir::new().unwrap();
        let config = config(&dir, "regularly\ngallery\nreal\nrule\n");

        let summary = run_generate(
            &config,
            &GenerateMode::Manual("laegruy".into()),
            None,
            &CancelFlag::new(),
        )
        .unwrap();

        assert_eq!(summary.produced, ["LAEGRUY"]);
        let store = DirectoryStore::open(&config.data_dir).unwrap();
        let record = store.load("LAEGRUY").unwrap().unwrap();
        assert!(record.is_manual());
        assert_eq!(record.pangram_list, ["REGULARLY"]);
    }

    #[test]
    fn malformed_manual_letters() {
        let dir = TempDir::new().unwrap();
        let config = config(&dir, "regularly\n");
        let result = run_generate(
            &config,
            &GenerateMode::Manual("abc".into()),
            None,
            &CancelFlag::new(),
        );
        assert!(result.is_err());
        assert!(!config.data_dir.exists());
    }

    #[test]
    fn seeded_batch_run() {
        let dir = TempDir::new().unwrap();
        let mut config = config(&dir, "regularly\n");
        config.policy = lenient();
        config.puzzle_count = 1;
        config.max_puzzle_tries = 5;

        let summary =
            run_generate(&config, &GenerateMode::Batch, Some(7), &CancelFlag::new()).unwrap();
        assert_eq!(summary.status, RunStatus::Completed);
        assert_eq!(summary.produced.len(), 1);
        assert!(config.data_dir.join(format!("{}.json", summary.produced[0])).exists());
    }

    #[test]
    fn batch_without_corpus_fails() {
        let dir = TempDir::new().unwrap();
        let config = config(&dir, "");
        let result = run_generate(&config, &GenerateMode::Batch, Some(1), &CancelFlag::new());
        assert!(result.is_err());
    }

    #[test]
    fn regenerate_rescores_store() {
        let dir = TempDir::new().unwrap();
        let mut config = config(&dir, "regularly\ngallery\n");
        config.policy = lenient();
        run_generate(
            &config,
            &GenerateMode::Manual("LAEGRUY".into()),
            None,
            &CancelFlag::new(),
        )
        .unwrap();

        config.policy = GenerationPolicy::default();
        let summary =
            run_generate(&config, &GenerateMode::Regenerate, None, &CancelFlag::new()).unwrap();
        assert_eq!(summary.produced, ["LAEGRUY"]);
        assert_eq!(summary.no_longer_valid, ["LAEGRUY"]);
    }
}
