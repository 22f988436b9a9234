//! Corpus matching for a fixed letter set
//!
//! Each corpus word is checked independently, so the scan can fan out over a
//! rayon pool. Results are sorted by word afterwards, making the output the
//! same for any worker count.

use crate::core::{LetterSet, WordRecord, check_word};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

/// Matches corpus words against letter sets, optionally in parallel
pub struct Matcher {
    pool: Option<ThreadPool>,
}

impl Matcher {
    /// Create a matcher using `threads` workers
    ///
    /// One thread (or zero) scans sequentially on the calling thread.
    ///
    /// # Errors
    /// Returns an error if the worker pool cannot be created.
    pub fn new(threads: usize) -> Result<Self, rayon::ThreadPoolBuildError> {
        let pool = if threads > 1 {
            Some(ThreadPoolBuilder::new().num_threads(threads).build()?)
        } else {
            None
        };
        Ok(Self { pool })
    }

    /// Sequential matcher
    #[must_use]
    pub const fn sequential() -> Self {
        Self { pool: None }
    }

    /// Number of workers used for a scan
    #[must_use]
    pub(crate) fn threads(&self) -> usize {
        self.pool.as_ref().map_or(1, ThreadPool::current_num_threads)
    }

    /// All qualifying words of `corpus`, sorted by word
    ///
    /// # Examples
    /// ```
    /// use spelling_hive::core::LetterSet;
    /// use spelling_hive::generator::Matcher;
    ///
    /// let corpus = vec!["WORDY".to_string(), "WORD".to_string(), "DORY".to_string()];
    /// let letters = LetterSet::new("WORDYXZ", 7).unwrap();
    ///
    /// let words = Matcher::sequential().match_corpus(&letters, &corpus, 4);
    /// let found: Vec<&str> = words.iter().map(|w| w.word.as_str()).collect();
    /// assert_eq!(found, ["WORD", "WORDY"]);
    /// ```
    #[must_use]
    pub fn match_corpus(
        &self,
        letters: &LetterSet,
        corpus: &[String],
        min_word_length: usize,
    ) -> Vec<WordRecord> {
        let mut records: Vec<WordRecord> = match &self.pool {
            Some(pool) => pool.install(|| {
                corpus
                    .par_iter()
                    .filter_map(|word| check_word(letters, word, min_word_length))
                    .collect()
            }),
            None => corpus
                .iter()
                .filter_map(|word| check_word(letters, word, min_word_length))
                .collect(),
        };

        records.sort_unstable_by(|a, b| a.word.cmp(&b.word));
        records
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::sequential()
    }
}
