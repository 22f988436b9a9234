//! Persisted puzzle record
//!
//! Field names follow the on-disk JSON layout: `letters`, `generation_info`,
//! `total_score`, `word_count`, `pangram_count`, `pangram_list`, `word_list`.

use super::StoreError;
use crate::core::{LetterSet, WordRecord};
use crate::generator::{GenerationPolicy, QualityReport};
use serde::{Deserialize, Serialize};

/// Policy snapshot and quality report stored with a puzzle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationInfo {
    /// Word list the puzzle was generated from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(flatten)]
    pub policy: GenerationPolicy,
    pub manual_puzzle: bool,
    /// Absent from records written before quality reports were stored
    #[serde(default)]
    pub quality: QualityReport,
}

/// A generated puzzle
///
/// Records are built once and not modified; regenerating a puzzle builds a
/// new record for the same key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PuzzleRecord {
    pub letters: LetterSet,
    pub generation_info: GenerationInfo,
    pub total_score: u32,
    pub word_count: usize,
    pub pangram_count: usize,
    pub pangram_list: Vec<String>,
    pub word_list: Vec<WordRecord>,
}

impl PuzzleRecord {
    /// Assemble a record from matched words
    ///
    /// Letters are stored in canonical order.
    #[must_use]
    pub fn new(
        letters: &LetterSet,
        word_list: Vec<WordRecord>,
        policy: GenerationPolicy,
        quality: QualityReport,
        manual_puzzle: bool,
        path: Option<String>,
    ) -> Self {
        let pangram_list: Vec<String> = word_list
            .iter()
            .filter(|w| w.is_pangram)
            .map(|w| w.word.clone())
            .collect();

        Self {
            letters: letters.canonical(),
            generation_info: GenerationInfo {
                path,
                policy,
                manual_puzzle,
                quality,
            },
            total_score: word_list.iter().map(|w| w.score).sum(),
            word_count: word_list.len(),
            pangram_count: pangram_list.len(),
            pangram_list,
            word_list,
        }
    }

    /// Canonical key (file stem) of this record
    #[must_use]
    pub fn key(&self) -> String {
        self.letters.key()
    }

    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.generation_info.quality.is_valid
    }

    #[must_use]
    pub const fn is_manual(&self) -> bool {
        self.generation_info.manual_puzzle
    }

    #[must_use]
    pub const fn quality(&self) -> &QualityReport {
        &self.generation_info.quality
    }

    /// Parse and check a record
    ///
    /// # Errors
    /// Returns `StoreError::Json` for malformed JSON and
    /// `StoreError::Inconsistent` if the derived fields disagree with the
    /// word list.
    pub fn from_json(text: &str) -> Result<Self, StoreError> {
        let record: Self = serde_json::from_str(text)?;
        record.validate()?;
        Ok(record)
    }

    /// Check the derived fields against the word list
    ///
    /// # Errors
    /// Returns `StoreError::Inconsistent` naming the first mismatch.
    pub fn validate(&self) -> Result<(), StoreError> {
        let fail = |reason: String| {
            Err(StoreError::Inconsistent {
                key: self.key(),
                reason,
            })
        };

        if self.letters.len() != self.generation_info.policy.total_letter_count {
            return fail(format!(
                "{} letters but total_letter_count is {}",
                self.letters.len(),
                self.generation_info.policy.total_letter_count
            ));
        }
        if self.word_count != self.word_list.len() {
            return fail(format!(
                "word_count {} but {} words listed",
                self.word_count,
                self.word_list.len()
            ));
        }

        let total: u32 = self.word_list.iter().map(|w| w.score).sum();
        if self.total_score != total {
            return fail(format!(
                "total_score {} but word scores sum to {total}",
                self.total_score
            ));
        }

        let flagged: Vec<&str> = self
            .word_list
            .iter()
            .filter(|w| w.is_pangram)
            .map(|w| w.word.as_str())
            .collect();
        if self.pangram_count != self.pangram_list.len() || flagged != self.pangram_list {
            return fail("pangram list does not match flagged words".to_string());
        }

        Ok(())
    }
}
