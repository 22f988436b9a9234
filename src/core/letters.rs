//! Puzzle letter set representation
//!
//! A `LetterSet` holds the distinct uppercase letters of a puzzle. The first
//! letter is the center letter, which every accepted word must contain.

use std::fmt;
use thiserror::Error;

/// Error type for malformed letter sets
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LetterSetError {
    #[error("Puzzles must be exactly {expected} letters long, got {actual}")]
    WrongLength { expected: usize, actual: usize },
    #[error("Letters must not repeat: {0}")]
    DuplicateLetters(String),
    #[error("Letters must be A-Z, found {0:?}")]
    NonAlphabetic(char),
}

/// Bit for an uppercase ASCII letter (`A` = bit 0)
#[inline]
#[must_use]
pub const fn letter_bit(letter: u8) -> u32 {
    1 << (letter - b'A')
}

/// Bitmask of the letters used by `word`, or `None` if it contains anything
/// other than uppercase ASCII letters
#[must_use]
pub fn word_mask(word: &str) -> Option<u32> {
    word.bytes().try_fold(0u32, |mask, b| {
        b.is_ascii_uppercase().then(|| mask | letter_bit(b))
    })
}

/// An ordered set of distinct letters with a designated center letter
///
/// Element 0 is the center. The remaining letters keep whatever order they
/// were given in; `canonical()` sorts them for storage.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LetterSet {
    letters: Vec<u8>,
    mask: u32,
}

impl LetterSet {
    /// Parse a letter set of exactly `expected_len` letters, center first
    ///
    /// Input is case-insensitive and surrounding whitespace is ignored.
    ///
    /// # Errors
    /// Returns `LetterSetError` if the input contains non-letters, repeats a
    /// letter, or does not have `expected_len` letters.
    ///
    /// # Examples
    /// ```
    /// use spelling_hive::core::LetterSet;
    ///
    /// let letters = LetterSet::new("wordyxz", 7).unwrap();
    /// assert_eq!(letters.center(), b'W');
    /// assert_eq!(letters.key(), "WDORXYZ");
    ///
    /// assert!(LetterSet::new("wordy", 7).is_err());
    /// assert!(LetterSet::new("woordyx", 7).is_err());
    /// ```
    pub fn new(text: &str, expected_len: usize) -> Result<Self, LetterSetError> {
        let set = Self::parse(text)?;
        if set.len() != expected_len {
            return Err(LetterSetError::WrongLength {
                expected: expected_len,
                actual: set.len(),
            });
        }
        Ok(set)
    }

    /// Parse a letter set of any length, center first
    ///
    /// # Errors
    /// Returns `LetterSetError` if the input is empty, contains non-letters or
    /// repeats a letter.
    pub fn parse(text: &str) -> Result<Self, LetterSetError> {
        let upper = text.trim().to_ascii_uppercase();

        if let Some(bad) = upper.chars().find(|c| !c.is_ascii_uppercase()) {
            return Err(LetterSetError::NonAlphabetic(bad));
        }
        if upper.is_empty() {
            return Err(LetterSetError::WrongLength {
                expected: 1,
                actual: 0,
            });
        }

        let mut mask = 0u32;
        for &b in upper.as_bytes() {
            let bit = letter_bit(b);
            if mask & bit != 0 {
                return Err(LetterSetError::DuplicateLetters(upper));
            }
            mask |= bit;
        }

        Ok(Self {
            letters: upper.into_bytes(),
            mask,
        })
    }

    /// Build from letters already known to be distinct uppercase ASCII
    pub(crate) fn from_distinct(letters: Vec<u8>) -> Self {
        let mask = letters.iter().fold(0, |m, &b| m | letter_bit(b));
        debug_assert_eq!(mask.count_ones() as usize, letters.len());
        Self { letters, mask }
    }

    /// The center letter (always element 0)
    #[inline]
    #[must_use]
    pub fn center(&self) -> u8 {
        self.letters[0]
    }

    /// Bit of the center letter
    #[inline]
    #[must_use]
    pub fn center_bit(&self) -> u32 {
        letter_bit(self.center())
    }

    /// All letters, center first
    #[inline]
    #[must_use]
    pub fn letters(&self) -> &[u8] {
        &self.letters
    }

    /// Bitmask of every letter in the set
    #[inline]
    #[must_use]
    pub const fn mask(&self) -> u32 {
        self.mask
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.letters.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    /// Check whether `letter` (uppercase ASCII) belongs to the set
    #[inline]
    #[must_use]
    pub fn contains(&self, letter: u8) -> bool {
        letter.is_ascii_uppercase() && self.mask & letter_bit(letter) != 0
    }

    /// Check whether every letter of `letters` belongs to the set
    #[must_use]
    pub fn contains_all(&self, letters: &str) -> bool {
        letters.bytes().all(|b| self.contains(b))
    }

    /// Same letters and center, with the remainder sorted
    #[must_use]
    pub fn canonical(&self) -> Self {
        let mut letters = self.letters.clone();
        letters[1..].sort_unstable();
        Self {
            letters,
            mask: self.mask,
        }
    }

    /// Canonical string identity: center letter followed by the sorted rest
    #[must_use]
    pub fn key(&self) -> String {
        self.canonical().to_string()
    }
}

impl fmt::Display for LetterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Letters are validated ASCII, so each byte is a char
        for &b in &self.letters {
            write!(f, "{}", b as char)?;
        }
        Ok(())
    }
}

impl TryFrom<String> for LetterSet {
    type Error = LetterSetError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<LetterSet> for String {
    fn from(value: LetterSet) -> Self {
        value.key()
    }
}
