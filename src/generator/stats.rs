//! Run-scoped generation statistics
//!
//! One `RunStats` lives for one generation run and is handed back to the
//! caller at the end. Stats from separate runs can be merged.

use super::policy::RejectReason;
use std::collections::{BTreeMap, BTreeSet};

/// Counters and rejection-reason tallies for one run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunStats {
    pub attempts: usize,
    pub valid: usize,
    pub rejected: usize,
    pub forced: usize,
    pub duplicates: usize,
    reason_weights: BTreeMap<RejectReason, f64>,
}

impl RunStats {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_valid(&mut self) {
        self.attempts += 1;
        self.valid += 1;
    }

    pub(crate) fn record_duplicate(&mut self) {
        self.attempts += 1;
        self.duplicates += 1;
        *self
            .reason_weights
            .entry(RejectReason::AlreadyFound)
            .or_insert(0.0) += 1.0;
    }

    /// Count a rejected attempt; each reason gets an equal share of one
    pub(crate) fn record_rejected(&mut self, reasons: &BTreeSet<RejectReason>) {
        self.attempts += 1;
        self.rejected += 1;
        self.add_reasons(reasons);
    }

    /// Count an invalid manual puzzle that was written anyway
    pub(crate) fn record_forced(&mut self, reasons: &BTreeSet<RejectReason>) {
        self.attempts += 1;
        self.forced += 1;
        self.add_reasons(reasons);
    }

    fn add_reasons(&mut self, reasons: &BTreeSet<RejectReason>) {
        if reasons.is_empty() {
            return;
        }
        let share = 1.0 / reasons.len() as f64;
        for &reason in reasons {
            *self.reason_weights.entry(reason).or_insert(0.0) += share;
        }
    }

    /// Accumulated weight for one reason
    #[must_use]
    pub fn reason_weight(&self, reason: RejectReason) -> f64 {
        self.reason_weights.get(&reason).copied().unwrap_or(0.0)
    }

    /// Share of all rejections per reason, in percent
    ///
    /// Every reason is listed, in a fixed order. All shares are zero when
    /// nothing has been rejected yet.
    #[must_use]
    pub fn breakdown(&self) -> Vec<(RejectReason, f64)> {
        let total: f64 = self.reason_weights.values().sum();
        RejectReason::ALL
            .iter()
            .map(|&reason| {
                let pct = if total > 0.0 {
                    100.0 * self.reason_weight(reason) / total
                } else {
                    0.0
                };
                (reason, pct)
            })
            .collect()
    }

    /// Fold another shard's counters into this one
    pub fn merge(&mut self, other: &Self) {
        self.attempts += other.attempts;
        self.valid += other.valid;
        self.rejected += other.rejected;
        self.forced += other.forced;
        self.duplicates += other.duplicates;
        for (&reason, &weight) in &other.reason_weights {
            *self.reason_weights.entry(reason).or_insert(0.0) += weight;
        }
    }
}
