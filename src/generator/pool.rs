//! Pangram-capable letter pool
//!
//! Every corpus word with exactly `total_letter_count` distinct letters is a
//! potential pangram seed. The pool keeps one canonical key per distinct
//! letter combination.

use crate::core::{LetterSet, letter_bit, word_mask};
use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};
use rustc_hash::FxHashSet;

/// Distinct letter combinations usable as sampling seeds
#[derive(Debug, Clone, Default)]
pub struct LetterPool {
    masks: Vec<u32>,
}

impl LetterPool {
    /// Build the pool from corpus words
    ///
    /// Returns an empty pool for an empty corpus.
    ///
    /// # Examples
    /// ```
    /// use spelling_hive::generator::LetterPool;
    ///
    /// let pool = LetterPool::build(["REGULARLY", "GRUEL", "YODEL"], 7);
    /// assert_eq!(pool.keys(), vec!["AEGLRUY".to_string()]);
    /// ```
    pub fn build<I, S>(words: I, total_letter_count: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let unique: FxHashSet<u32> = words
            .into_iter()
            .filter_map(|w| word_mask(w.as_ref()))
            .filter(|mask| mask.count_ones() as usize == total_letter_count)
            .collect();

        let mut masks: Vec<u32> = unique.into_iter().collect();
        // Sorting by key keeps seeded sampling reproducible
        masks.sort_unstable_by_key(|&m| mask_letters(m));

        log::debug!(
            "Letter pool: {} combinations of {total_letter_count} letters",
            masks.len()
        );
        Self { masks }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.masks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.masks.is_empty()
    }

    /// Canonical keys (sorted distinct letters), in sorted order
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.masks
            .iter()
            .map(|&m| String::from_utf8_lossy(&mask_letters(m)).into_owned())
            .collect()
    }

    /// Pick one combination uniformly and shuffle it
    ///
    /// The first letter after shuffling becomes the center. The remainder is
    /// left in shuffled order. Returns `None` if the pool is empty.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<LetterSet> {
        let &mask = self.masks.choose(rng)?;
        let mut letters = mask_letters(mask);
        letters.shuffle(rng);
        Some(LetterSet::from_distinct(letters))
    }
}

/// Letters of a mask in alphabetical order
fn mask_letters(mask: u32) -> Vec<u8> {
    (b'A'..=b'Z').filter(|&b| mask & letter_bit(b) != 0).collect()
}
