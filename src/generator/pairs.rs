//! Morphological pair counting
//!
//! Puzzles where many answers are simple inflections of other answers (LOVE,
//! LOVES, LOVED, LOVING) are tedious to play. These counters find such pairs
//! with fixed suffix tests against the matched word list only.
//!
//! Each counter is independent and order-insensitive. The counts are policy
//! inputs, so the suffix rules are kept exactly as stated, including the
//! places where one word contributes more than one pair.

use crate::core::{LetterSet, WordRecord};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// Pair counts for one puzzle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairCounts {
    pub plurals: usize,
    pub gerunds: usize,
    pub preterites: usize,
}

impl PairCounts {
    /// Count all pair kinds reachable with `letters`
    ///
    /// Plurals need S, preterites need E and D, gerunds need I, N and G.
    /// Counters whose letters are missing are skipped and report zero.
    #[must_use]
    pub fn tally(letters: &LetterSet, words: &[WordRecord]) -> Self {
        let set = WordSet::from_records(words);
        Self {
            plurals: if letters.contains_all("S") {
                set.count_plurals()
            } else {
                0
            },
            gerunds: if letters.contains_all("ING") {
                set.count_gerunds()
            } else {
                0
            },
            preterites: if letters.contains_all("ED") {
                set.count_preterites()
            } else {
                0
            },
        }
    }
}

/// Membership view over a matched word list
pub struct WordSet<'a> {
    words: FxHashSet<&'a str>,
}

impl<'a> WordSet<'a> {
    #[must_use]
    pub fn new<I>(words: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        Self {
            words: words.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn from_records(records: &'a [WordRecord]) -> Self {
        Self::new(records.iter().map(|r| r.word.as_str()))
    }

    fn has(&self, stem: &str) -> bool {
        self.words.contains(stem)
    }

    fn has_with_e(&self, stem: &str) -> bool {
        self.words.contains(format!("{stem}E").as_str())
    }

    /// Singular/plural pairs (-S, -ES)
    ///
    /// A word ending in ES is tested for both suffixes, so GUESSES counts
    /// once for GUESSE and once for GUESS if both are present.
    ///
    /// # Examples
    /// ```
    /// use spelling_hive::generator::pairs::WordSet;
    ///
    /// let set = WordSet::new(["CHEESE", "CHEESES", "HEEL", "HEELS"]);
    /// assert_eq!(set.count_plurals(), 2);
    /// ```
    #[must_use]
    pub fn count_plurals(&self) -> usize {
        self.words
            .iter()
            .map(|word| {
                let Some(stem) = word.strip_suffix('S') else {
                    return 0;
                };
                let mut count = usize::from(self.has(stem));
                if let Some(stem) = word.strip_suffix("ES") {
                    count += usize::from(self.has(stem));
                }
                count
            })
            .sum()
    }

    /// Verb/gerund pairs (-ING)
    ///
    /// Up to three pairs per word: YODELING → YODEL, LOVING → LOVE and the
    /// doubled consonant form YODELLING → YODEL.
    #[must_use]
    pub fn count_gerunds(&self) -> usize {
        self.words
            .iter()
            .map(|word| {
                let Some(stem) = word.strip_suffix("ING") else {
                    return 0;
                };
                let bytes = word.as_bytes();
                let n = bytes.len();

                let mut count = usize::from(self.has(stem));
                count += usize::from(self.has_with_e(stem));
                if n >= 5 && bytes[n - 4] == bytes[n - 5] && self.has(&word[..n - 4]) {
                    count += 1;
                }
                count
            })
            .sum()
    }

    /// Verb/simple past pairs (-ED, -D)
    ///
    /// Up to three pairs per word: YODELED → YODEL, LOVED → LOVE and the
    /// doubled consonant form YODELLED → YODEL.
    #[must_use]
    pub fn count_preterites(&self) -> usize {
        self.words
            .iter()
            .map(|word| {
                let Some(stem) = word.strip_suffix("ED") else {
                    return 0;
                };
                let bytes = word.as_bytes();
                let n = bytes.len();

                let mut count = usize::from(self.has(stem));
                count += usize::from(self.has(&word[..n - 1]));
                if n >= 4 && bytes[n - 3] == bytes[n - 4] && self.has(&word[..n - 3]) {
                    count += 1;
                }
                count
            })
            .sum()
    }
}
