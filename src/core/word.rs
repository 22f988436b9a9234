//! Word qualification and scoring
//!
//! A word qualifies for a `LetterSet` when it uses only the set's letters and
//! contains the center letter at least once.

use super::letters::{LetterSet, word_mask};
use serde::{Deserialize, Serialize};

/// A word accepted for a puzzle, with its score and pangram flag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordRecord {
    pub word: String,
    pub score: u32,
    #[serde(rename = "pangram")]
    pub is_pangram: bool,
}

/// Score a word
///
/// A word of exactly `min_word_length` letters scores 1, any other word
/// scores its length. With the default minimum of 4 a four-letter word is
/// worth 1 and a five-letter word is worth 5.
///
/// # Examples
/// ```
/// use spelling_hive::core::score_word;
///
/// assert_eq!(score_word("WORD", 4), 1);
/// assert_eq!(score_word("WORDS", 4), 5);
/// ```
#[inline]
#[must_use]
pub fn score_word(word: &str, min_word_length: usize) -> u32 {
    if word.len() == min_word_length {
        1
    } else {
        word.len() as u32
    }
}

/// Check a single word against a letter set
///
/// Returns `None` when the word does not qualify.
///
/// # Examples
/// ```
/// use spelling_hive::core::{LetterSet, check_word};
///
/// let letters = LetterSet::new("WORDYXZ", 7).unwrap();
/// let record = check_word(&letters, "WORDY", 4).unwrap();
/// assert_eq!(record.score, 5);
/// assert!(!record.is_pangram);
///
/// assert!(check_word(&letters, "DORY", 4).is_none()); // no center letter
/// ```
#[must_use]
pub fn check_word(letters: &LetterSet, word: &str, min_word_length: usize) -> Option<WordRecord> {
    let mask = word_mask(word)?;

    if mask & !letters.mask() != 0 || mask & letters.center_bit() == 0 {
        return None;
    }

    Some(WordRecord {
        word: word.to_string(),
        score: score_word(word, min_word_length),
        is_pangram: mask == letters.mask(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn wordy() -> LetterSet {
        LetterSet::new("WORDYXZ", 7).unwrap()
    }

    #[test]
    fn score_boundary_jump() {
        assert_eq!(score_word("LOVE", 4), 1);
        assert_eq!(score_word("LOVED", 4), 5);
        assert_eq!(score_word("LOVING", 4), 6);
    }

    #[test]
    fn score_follows_min_length() {
        assert_eq!(score_word("LOVED", 5), 1);
        assert_eq!(score_word("LOVE", 5), 4);
    }

    #[test]
    fn qualifying_words() {
        let letters = wordy();
        let word = check_word(&letters, "WORD", 4).unwrap();
        assert_eq!(word.score, 1);
        assert!(!word.is_pangram);

        assert!(check_word(&letters, "WOOD", 4).is_some());
        assert!(check_word(&letters, "WORDS", 4).is_none()); // S missing
        assert!(check_word(&letters, "DORY", 4).is_none()); // no W
    }

    #[test]
    fn pangram_detection() {
        let letters = LetterSet::new("GAELRUY", 7).unwrap();
        let word = check_word(&letters, "REGULARLY", 4).unwrap();
        assert!(word.is_pangram);
        assert_eq!(word.score, 9);

        let word = check_word(&letters, "GRUEL", 4).unwrap();
        assert!(!word.is_pangram);
    }

    #[test]
    fn non_letters_never_qualify() {
        let letters = wordy();
        assert!(check_word(&letters, "WO'RD", 4).is_none());
        assert!(check_word(&letters, "word", 4).is_none());
    }

    #[test]
    fn serializes_with_pangram_key() {
        let record = WordRecord {
            word: "WORD".into(),
            score: 1,
            is_pangram: false,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["pangram"], false);
        assert_eq!(json["word"], "WORD");
    }

    fn letter_set_strategy() -> impl Strategy<Value = LetterSet> {
        proptest::sample::subsequence((b'A'..=b'Z').collect::<Vec<u8>>(), 7)
            .prop_shuffle()
            .prop_map(LetterSet::from_distinct)
    }

    proptest! {
        #[test]
        fn qualifies_iff_subset_with_center(
            letters in letter_set_strategy(),
            word in "[A-Z]{1,12}",
        ) {
            let allowed: HashSet<u8> = letters.letters().iter().copied().collect();
            let chars: HashSet<u8> = word.bytes().collect();
            let expected = chars.is_subset(&allowed) && chars.contains(&letters.center());

            prop_assert_eq!(check_word(&letters, &word, 4).is_some(), expected);
        }

        #[test]
        fn pangram_iff_all_letters_used(
            letters in letter_set_strategy(),
            picks in proptest::collection::vec(0usize..7, 1..14),
        ) {
            let mut word: Vec<u8> = vec![letters.center()];
            word.extend(picks.iter().map(|&i| letters.letters()[i]));
            let word = String::from_utf8(word).unwrap();

            let record = check_word(&letters, &word, 4).unwrap();
            let chars: HashSet<u8> = word.bytes().collect();
            let all: HashSet<u8> = letters.letters().iter().copied().collect();
            prop_assert_eq!(record.is_pangram, all.is_subset(&chars));
        }
    }
}
