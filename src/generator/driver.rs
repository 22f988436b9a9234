//! Generation driver
//!
//! Scores candidate letter sets against the corpus, applies the policy and
//! writes accepted (or manually requested) puzzles to a store.

use super::cancel::CancelFlag;
use super::error::GenerateError;
use super::matcher::Matcher;
use super::pairs::PairCounts;
use super::policy::{GenerationPolicy, PuzzleStats};
use super::pool::LetterPool;
use super::selector::{Candidate, select_from_pool};
use super::stats::RunStats;
use super::uniqueness::record_uniqueness;
use crate::core::LetterSet;
use crate::store::{PuzzleRecord, PuzzleStore};
use rand::Rng;

/// What happened to one candidate
#[derive(Debug, Clone)]
pub enum AttemptOutcome {
    /// Sampled letters already have a puzzle; nothing was scored
    Duplicate(LetterSet),
    /// Passed every gate and was written
    Accepted(PuzzleRecord),
    /// Sampled letters failed the policy; nothing was written
    Rejected(PuzzleRecord),
    /// Manual letters failed the policy but were written anyway
    Forced(PuzzleRecord),
}

impl AttemptOutcome {
    /// The scored record, unless the attempt was skipped as a duplicate
    #[must_use]
    pub const fn record(&self) -> Option<&PuzzleRecord> {
        match self {
            Self::Duplicate(_) => None,
            Self::Accepted(r) | Self::Rejected(r) | Self::Forced(r) => Some(r),
        }
    }

    /// Canonical key of the candidate letters
    #[must_use]
    pub fn key(&self) -> String {
        match self {
            Self::Duplicate(letters) => letters.key(),
            Self::Accepted(r) | Self::Rejected(r) | Self::Forced(r) => r.key(),
        }
    }

    /// Whether a record was written to the store
    #[must_use]
    pub const fn was_written(&self) -> bool {
        matches!(self, Self::Accepted(_) | Self::Forced(_))
    }
}

/// What a run should produce
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunRequest {
    /// Score and write one caller-specified letter set
    Manual(LetterSet),
    /// Rescore every stored puzzle under the current policy
    Regenerate,
    /// Sample until `count` new valid puzzles exist or `max_tries` attempts
    /// have been made
    Batch { count: usize, max_tries: usize },
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Completed,
    BudgetExhausted,
    Cancelled,
}

/// Result of a whole run
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub status: RunStatus,
    /// Keys written during the run
    pub produced: Vec<String>,
    /// Regenerated keys that no longer pass the policy
    pub no_longer_valid: Vec<String>,
    pub stats: RunStats,
}

impl RunSummary {
    fn new() -> Self {
        Self {
            status: RunStatus::Completed,
            produced: Vec::new(),
            no_longer_valid: Vec::new(),
            stats: RunStats::new(),
        }
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.status == RunStatus::Cancelled
    }
}

/// Puzzle generator over a fixed corpus and policy
pub struct Generator<'a> {
    corpus: &'a [String],
    pool: LetterPool,
    policy: GenerationPolicy,
    matcher: Matcher,
    source: Option<String>,
}

impl<'a> Generator<'a> {
    /// Create a generator, building the letter pool from `corpus`
    ///
    /// `corpus` must already be normalized (see `Corpus`). With more than one
    /// thread the corpus scan runs on a dedicated worker pool.
    ///
    /// # Errors
    /// Returns `GenerateError::WorkerPool` if the worker pool cannot start.
    pub fn new(
        corpus: &'a [String],
        policy: GenerationPolicy,
        threads: usize,
    ) -> Result<Self, GenerateError> {
        let pool = LetterPool::build(corpus, policy.total_letter_count);
        log::info!(
            "Unique {}-letter pool: {} combinations from {} words",
            policy.total_letter_count,
            pool.len(),
            corpus.len()
        );

        let matcher = Matcher::new(threads)?;
        log::debug!("Matching with {} worker(s)", matcher.threads());

        Ok(Self {
            corpus,
            pool,
            policy,
            matcher,
            source: None,
        })
    }

    /// Record the word list path in generated puzzles
    #[must_use]
    pub fn with_source(mut self, path: impl Into<String>) -> Self {
        self.source = Some(path.into());
        self
    }

    #[must_use]
    pub const fn pool(&self) -> &LetterPool {
        &self.pool
    }

    #[must_use]
    pub const fn policy(&self) -> &GenerationPolicy {
        &self.policy
    }

    /// Score a letter set and build its record without touching any store
    #[must_use]
    pub fn evaluate(&self, letters: &LetterSet, manual_puzzle: bool) -> PuzzleRecord {
        let letters = letters.canonical();
        let words = self
            .matcher
            .match_corpus(&letters, self.corpus, self.policy.min_word_length);

        let stats = PuzzleStats {
            total_score: words.iter().map(|w| w.score).sum(),
            word_count: words.len(),
            pangram_count: words.iter().filter(|w| w.is_pangram).count(),
            pairs: PairCounts::tally(&letters, &words),
        };
        let quality = self.policy.evaluate(&stats, record_uniqueness(&words));

        PuzzleRecord::new(
            &letters,
            words,
            self.policy.clone(),
            quality,
            manual_puzzle,
            self.source.clone(),
        )
    }

    /// Run one candidate through scoring, validation and persistence
    ///
    /// Sampled candidates whose key is already stored are skipped. Manual
    /// candidates are always written; if a record already exists for the key,
    /// its `manual_puzzle` flag is kept.
    ///
    /// # Errors
    /// Returns an error if writing the record fails.
    pub fn attempt<S: PuzzleStore + ?Sized>(
        &self,
        candidate: Candidate,
        store: &mut S,
        stats: &mut RunStats,
    ) -> Result<AttemptOutcome, GenerateError> {
        match candidate {
            Candidate::Sampled(letters) => {
                if store.contains(&letters.key()) {
                    stats.record_duplicate();
                    return Ok(AttemptOutcome::Duplicate(letters));
                }

                let record = self.evaluate(&letters, false);
                if record.is_valid() {
                    store.save(&record)?;
                    stats.record_valid();
                    log::debug!("Accepted {}", record.key());
                    Ok(AttemptOutcome::Accepted(record))
                } else {
                    stats.record_rejected(&record.quality().failed_reasons);
                    Ok(AttemptOutcome::Rejected(record))
                }
            }
            Candidate::Manual(letters) => {
                let key = letters.key();
                let manual = match store.load(&key) {
                    Ok(Some(prior)) => prior.is_manual(),
                    Ok(None) => true,
                    Err(e) => {
                        let flag = store.manual_flag(&key);
                        log::warn!(
                            "Could not read existing puzzle {key}: {e}; manual_puzzle taken as {}",
                            flag.unwrap_or(true)
                        );
                        flag.unwrap_or(true)
                    }
                };

                let record = self.evaluate(&letters, manual);
                store.save(&record)?;

                if record.is_valid() {
                    stats.record_valid();
                    Ok(AttemptOutcome::Accepted(record))
                } else {
                    log::warn!(
                        "Puzzle {key} written despite: {}",
                        record.quality().reasons_text()
                    );
                    stats.record_forced(&record.quality().failed_reasons);
                    Ok(AttemptOutcome::Forced(record))
                }
            }
        }
    }

    /// Execute a run request
    ///
    /// `observer` sees every attempt together with the running stats. The
    /// cancel flag is checked between attempts; a cancelled run returns
    /// normally with `RunStatus::Cancelled`.
    ///
    /// # Errors
    /// Returns `EmptyCorpus`/`EmptyPool` for a batch run without material to
    /// sample from, and any store error.
    pub fn run<S, R, F>(
        &self,
        request: &RunRequest,
        store: &mut S,
        rng: &mut R,
        cancel: &CancelFlag,
        mut observer: F,
    ) -> Result<RunSummary, GenerateError>
    where
        S: PuzzleStore + ?Sized,
        R: Rng + ?Sized,
        F: FnMut(&AttemptOutcome, &RunStats),
    {
        let mut summary = RunSummary::new();

        match request {
            RunRequest::Manual(letters) => {
                let outcome =
                    self.attempt(Candidate::Manual(letters.clone()), store, &mut summary.stats)?;
                summary.produced.push(outcome.key());
                observer(&outcome, &summary.stats);
            }
            RunRequest::Regenerate => {
                for key in store.keys() {
                    if cancel.is_cancelled() {
                        summary.status = RunStatus::Cancelled;
                        break;
                    }

                    let letters = match LetterSet::new(&key, self.policy.total_letter_count) {
                        Ok(letters) => letters,
                        Err(e) => {
                            log::warn!("Skipping stored puzzle {key}: {e}");
                            continue;
                        }
                    };

                    let outcome =
                        self.attempt(Candidate::Manual(letters), store, &mut summary.stats)?;
                    if matches!(outcome, AttemptOutcome::Forced(_)) {
                        summary.no_longer_valid.push(outcome.key());
                    }
                    summary.produced.push(outcome.key());
                    observer(&outcome, &summary.stats);
                }
            }
            RunRequest::Batch { count, max_tries } => {
                let (count, max_tries) = (*count, *max_tries);
                if self.corpus.is_empty() {
                    return Err(GenerateError::EmptyCorpus);
                }
                if self.pool.is_empty() {
                    return Err(GenerateError::EmptyPool);
                }

                summary.status = if count == 0 {
                    RunStatus::Completed
                } else {
                    RunStatus::BudgetExhausted
                };

                for _ in 0..max_tries {
                    if summary.stats.valid >= count {
                        break;
                    }
                    if cancel.is_cancelled() {
                        summary.status = RunStatus::Cancelled;
                        break;
                    }

                    let candidate =
                        select_from_pool(&self.pool, self.policy.total_letter_count, rng)?;
                    let outcome = self.attempt(candidate, store, &mut summary.stats)?;
                    if outcome.was_written() {
                        summary.produced.push(outcome.key());
                    }
                    observer(&outcome, &summary.stats);

                    if summary.stats.valid >= count {
                        summary.status = RunStatus::Completed;
                    }
                }
            }
        }

        log::info!(
            "Run finished ({:?}): {} attempts, {} valid",
            summary.status,
            summary.stats.attempts,
            summary.stats.valid
        );
        Ok(summary)
    }
}
