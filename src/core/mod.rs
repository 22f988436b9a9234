//! Core domain types for letter puzzles
//!
//! Letter sets, word qualification and scoring. Everything here is pure and
//! independent of the generator, storage and output layers.

mod letters;
mod word;

pub use letters::{LetterSet, LetterSetError, letter_bit, word_mask};
pub use word::{WordRecord, check_word, score_word};
