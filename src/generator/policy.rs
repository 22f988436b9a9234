//! Puzzle acceptance policy
//!
//! Every gate is evaluated, even after one has failed, so a rejection
//! carries the full list of reasons.

use super::pairs::PairCounts;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Generation parameters and acceptance gates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationPolicy {
    pub min_word_length: usize,
    pub total_letter_count: usize,
    /// Exact number of pangrams a puzzle must have
    pub count_pangrams: usize,
    pub min_word_count: usize,
    pub max_word_count: usize,
    pub min_total_score: u32,
    pub max_total_score: u32,
    pub cap_plurals: bool,
    pub max_plurals: usize,
    pub cap_gerunds: bool,
    pub max_gerunds: usize,
    pub cap_preterite: bool,
    pub max_preterite: usize,
}

impl Default for GenerationPolicy {
    fn default() -> Self {
        Self {
            min_word_length: 4,
            total_letter_count: 7,
            count_pangrams: 1,
            min_word_count: 25,
            max_word_count: 50,
            min_total_score: 60,
            max_total_score: 400,
            cap_plurals: true,
            max_plurals: 3,
            cap_gerunds: true,
            max_gerunds: 5,
            cap_preterite: true,
            max_preterite: 7,
        }
    }
}

/// Why a letter set was not accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RejectReason {
    /// Sampled letters already have a puzzle; only counted by the driver
    #[serde(rename = "Already found")]
    AlreadyFound,
    #[serde(rename = "Too few pangrams")]
    TooFewPangrams,
    #[serde(rename = "Too many pangrams")]
    TooManyPangrams,
    #[serde(rename = "Total score too low")]
    TotalScoreTooLow,
    #[serde(rename = "Total score too high")]
    TotalScoreTooHigh,
    #[serde(rename = "Too few words")]
    TooFewWords,
    #[serde(rename = "Too many words")]
    TooManyWords,
    #[serde(rename = "Too many plural pairs")]
    TooManyPluralPairs,
    #[serde(rename = "Too many gerund pairs")]
    TooManyGerundPairs,
    #[serde(rename = "Too many preterite pairs")]
    TooManyPreteritePairs,
}

impl RejectReason {
    pub const ALL: [Self; 10] = [
        Self::AlreadyFound,
        Self::TooFewPangrams,
        Self::TooManyPangrams,
        Self::TotalScoreTooLow,
        Self::TotalScoreTooHigh,
        Self::TooFewWords,
        Self::TooManyWords,
        Self::TooManyPluralPairs,
        Self::TooManyGerundPairs,
        Self::TooManyPreteritePairs,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AlreadyFound => "Already found",
            Self::TooFewPangrams => "Too few pangrams",
            Self::TooManyPangrams => "Too many pangrams",
            Self::TotalScoreTooLow => "Total score too low",
            Self::TotalScoreTooHigh => "Total score too high",
            Self::TooFewWords => "Too few words",
            Self::TooManyWords => "Too many words",
            Self::TooManyPluralPairs => "Too many plural pairs",
            Self::TooManyGerundPairs => "Too many gerund pairs",
            Self::TooManyPreteritePairs => "Too many preterite pairs",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregate statistics of a matched word list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PuzzleStats {
    pub total_score: u32,
    pub word_count: usize,
    pub pangram_count: usize,
    pub pairs: PairCounts,
}

/// Outcome of the acceptance gates for one puzzle
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    pub is_valid: bool,
    pub failed_reasons: BTreeSet<RejectReason>,
    pub plural_pairs: usize,
    pub gerund_pairs: usize,
    pub preterite_pairs: usize,
    pub uniqueness: f64,
}

impl GenerationPolicy {
    /// Run every gate against `stats`
    ///
    /// Pair gates only apply when their cap is enabled.
    ///
    /// # Examples
    /// ```
    /// use spelling_hive::generator::{GenerationPolicy, PuzzleStats, RejectReason};
    ///
    /// let policy = GenerationPolicy::default();
    /// let failed = policy.failed_gates(&PuzzleStats::default());
    /// assert!(failed.contains(&RejectReason::TooFewPangrams));
    /// assert!(failed.contains(&RejectReason::TooFewWords));
    /// ```
    #[must_use]
    pub fn failed_gates(&self, stats: &PuzzleStats) -> BTreeSet<RejectReason> {
        let gates = [
            (
                stats.pangram_count < self.count_pangrams,
                RejectReason::TooFewPangrams,
            ),
            (
                stats.pangram_count > self.count_pangrams,
                RejectReason::TooManyPangrams,
            ),
            (
                stats.total_score < self.min_total_score,
                RejectReason::TotalScoreTooLow,
            ),
            (
                stats.total_score > self.max_total_score,
                RejectReason::TotalScoreTooHigh,
            ),
            (
                stats.word_count < self.min_word_count,
                RejectReason::TooFewWords,
            ),
            (
                stats.word_count > self.max_word_count,
                RejectReason::TooManyWords,
            ),
            (
                self.cap_plurals && stats.pairs.plurals > self.max_plurals,
                RejectReason::TooManyPluralPairs,
            ),
            (
                self.cap_gerunds && stats.pairs.gerunds > self.max_gerunds,
                RejectReason::TooManyGerundPairs,
            ),
            (
                self.cap_preterite && stats.pairs.preterites > self.max_preterite,
                RejectReason::TooManyPreteritePairs,
            ),
        ];

        gates
            .into_iter()
            .filter_map(|(failed, reason)| failed.then_some(reason))
            .collect()
    }

    /// Build the quality report for a puzzle
    #[must_use]
    pub fn evaluate(&self, stats: &PuzzleStats, uniqueness: f64) -> QualityReport {
        let failed_reasons = self.failed_gates(stats);
        QualityReport {
            is_valid: failed_reasons.is_empty(),
            failed_reasons,
            plural_pairs: stats.pairs.plurals,
            gerund_pairs: stats.pairs.gerunds,
            preterite_pairs: stats.pairs.preterites,
            uniqueness,
        }
    }
}

impl QualityReport {
    /// Failed reasons joined for display
    #[must_use]
    pub fn reasons_text(&self) -> String {
        self.failed_reasons
            .iter()
            .map(|r| r.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn good_stats() -> PuzzleStats {
        PuzzleStats {
            total_score: 120,
            word_count: 30,
            pangram_count: 1,
            pairs: PairCounts {
                plurals: 3,
                gerunds: 5,
                preterites: 7,
            },
        }
    }

    #[test]
    fn default_matches_tuned_values() {
        let policy = GenerationPolicy::default();
        assert_eq!(policy.min_word_length, 4);
        assert_eq!(policy.total_letter_count, 7);
        assert_eq!(policy.max_total_score, 400);
        assert_eq!(policy.max_preterite, 7);
    }

    #[test]
    fn passing_puzzle_has_no_reasons() {
        let report = GenerationPolicy::default().evaluate(&good_stats(), 0.45);
        assert!(report.is_valid);
        assert!(report.failed_reasons.is_empty());
        assert_eq!(report.plural_pairs, 3);
    }

    #[test]
    fn too_few_pangrams() {
        let stats = PuzzleStats {
            pangram_count: 0,
            ..good_stats()
        };
        let report = GenerationPolicy::default().evaluate(&stats, 0.5);
        assert!(!report.is_valid);
        assert!(report.failed_reasons.contains(&RejectReason::TooFewPangrams));
        assert_eq!(report.reasons_text(), "Too few pangrams");
    }

    #[test]
    fn every_failure_is_reported() {
        let stats = PuzzleStats {
            total_score: 500,
            word_count: 80,
            pangram_count: 2,
            pairs: PairCounts {
                plurals: 4,
                gerunds: 6,
                preterites: 8,
            },
        };
        let failed = GenerationPolicy::default().failed_gates(&stats);
        assert_eq!(
            failed.into_iter().collect::<Vec<_>>(),
            vec![
                RejectReason::TooManyPangrams,
                RejectReason::TotalScoreTooHigh,
                RejectReason::TooManyWords,
                RejectReason::TooManyPluralPairs,
                RejectReason::TooManyGerundPairs,
                RejectReason::TooManyPreteritePairs,
            ]
        );
    }

    #[test]
    fn disabled_caps_are_ignored() {
        let policy = GenerationPolicy {
            cap_plurals: false,
            cap_gerunds: false,
            cap_preterite: false,
            ..GenerationPolicy::default()
        };
        let stats = PuzzleStats {
            pairs: PairCounts {
                plurals: 40,
                gerunds: 40,
                preterites: 40,
            },
            ..good_stats()
        };
        assert!(policy.failed_gates(&stats).is_empty());
    }

    #[test]
    fn reasons_serialize_as_text() {
        let report = GenerationPolicy::default().evaluate(&PuzzleStats::default(), 1.0);
        let json = serde_json::to_value(&report).unwrap();
        let reasons = json["failed_reasons"].as_array().unwrap();
        assert!(reasons.iter().any(|r| r == "Too few words"));
        assert!(reasons.iter().any(|r| r == "Total score too low"));
    }

    #[test]
    fn policy_fills_missing_fields_with_defaults() {
        let policy: GenerationPolicy =
            serde_json::from_str(r#"{"min_word_count": 10, "cap_plurals": false}"#).unwrap();
        assert_eq!(policy.min_word_count, 10);
        assert!(!policy.cap_plurals);
        assert_eq!(policy.max_word_count, 50);
    }
}
