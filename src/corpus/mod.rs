//! Word corpus
//!
//! The corpus is a sorted, deduplicated list of uppercase words of at least
//! the minimum length. Loading and custom-list merging live in `loader`.

pub mod loader;

use std::collections::BTreeSet;

/// Normalized candidate words
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    words: Vec<String>,
}

impl Corpus {
    /// Normalize raw words
    ///
    /// Trims and uppercases each entry, drops entries shorter than
    /// `min_word_length` or containing anything but ASCII letters, then
    /// deduplicates and sorts.
    ///
    /// # Examples
    /// ```
    /// use spelling_hive::corpus::Corpus;
    ///
    /// let corpus = Corpus::from_words(["word ", "Words", "WORD", "owl", "don't"], 4);
    /// assert_eq!(corpus.words(), ["WORD", "WORDS"]);
    /// ```
    pub fn from_words<I, S>(words: I, min_word_length: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let set: BTreeSet<String> = words
            .into_iter()
            .filter_map(|w| normalize(w.as_ref(), min_word_length))
            .collect();
        Self {
            words: set.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn words(&self) -> &[String] {
        &self.words
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.words
            .binary_search_by(|w| w.as_str().cmp(word))
            .is_ok()
    }

    /// Drop every word in `remove`
    #[must_use]
    pub fn without(self, remove: &Self) -> Self {
        Self {
            words: self
                .words
                .into_iter()
                .filter(|w| !remove.contains(w))
                .collect(),
        }
    }

    /// Add every word in `add`
    #[must_use]
    pub fn with(self, add: &Self) -> Self {
        let set: BTreeSet<String> = self
            .words
            .into_iter()
            .chain(add.words.iter().cloned())
            .collect();
        Self {
            words: set.into_iter().collect(),
        }
    }
}

fn normalize(raw: &str, min_word_length: usize) -> Option<String> {
    let word = raw.trim().to_ascii_uppercase();
    (word.len() >= min_word_length && word.bytes().all(|b| b.is_ascii_uppercase())).then_some(word)
}
