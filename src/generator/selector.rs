//! Candidate letter selection
//!
//! Letters come either from the pangram pool (automatic generation) or from
//! the caller (manual generation).

use super::LetterPool;
use super::error::GenerateError;
use crate::core::{LetterSet, LetterSetError};
use rand::Rng;

/// Where a candidate letter set comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Candidate {
    /// Sampled from the pool; duplicates of existing puzzles are skipped
    Sampled(LetterSet),
    /// Supplied by the caller; always written, valid or not
    Manual(LetterSet),
}

impl Candidate {
    #[must_use]
    pub const fn letters(&self) -> &LetterSet {
        match self {
            Self::Sampled(l) | Self::Manual(l) => l,
        }
    }

    #[must_use]
    pub const fn is_manual(&self) -> bool {
        matches!(self, Self::Manual(_))
    }
}

/// Sample a candidate from the pool
///
/// # Errors
/// Returns `GenerateError::EmptyPool` if the pool has no combinations, and
/// `GenerateError::InvalidLetters` if the sampled combination does not have
/// `total_letter_count` letters.
pub fn select_from_pool<R: Rng + ?Sized>(
    pool: &LetterPool,
    total_letter_count: usize,
    rng: &mut R,
) -> Result<Candidate, GenerateError> {
    let letters = pool.sample(rng).ok_or(GenerateError::EmptyPool)?;
    if letters.len() != total_letter_count {
        return Err(LetterSetError::WrongLength {
            expected: total_letter_count,
            actual: letters.len(),
        }
        .into());
    }
    Ok(Candidate::Sampled(letters))
}

/// Take a caller-specified letter set, center letter first
///
/// No pool lookup happens; any distinct letters are accepted.
///
/// # Errors
/// Returns `LetterSetError` if `text` is not `total_letter_count` distinct
/// letters.
///
/// # Examples
/// ```
/// use spelling_hive::generator::select_manual;
///
/// let candidate = select_manual("wordyxz", 7).unwrap();
/// assert!(candidate.is_manual());
/// assert_eq!(candidate.letters().center(), b'W');
/// ```
pub fn select_manual(text: &str, total_letter_count: usize) -> Result<Candidate, LetterSetError> {
    LetterSet::new(text, total_letter_count).map(Candidate::Manual)
}
