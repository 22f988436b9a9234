//! Per-attempt reporting during a generation run

use super::formatters::{csv_header, csv_row, why_table};
use crate::generator::{AttemptOutcome, RunStats};
use crate::store::PuzzleRecord;
use clap::ValueEnum;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

/// How attempts are reported on stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportMode {
    /// One character per attempt: `!` for valid, `.` for invalid
    Dots,
    /// Tab-separated row per attempt
    #[default]
    Csv,
    /// Running rejection breakdown
    Why,
    /// Nothing
    #[serde(rename = "none")]
    #[value(name = "none")]
    Silent,
    /// Nothing for sampled runs, same as the valid mode for manual ones
    Auto,
}

impl ReportMode {
    /// Concrete mode for invalid attempts
    #[must_use]
    pub const fn resolve_invalid(self, sampled: bool, valid: Self) -> Self {
        match self {
            Self::Auto if sampled => Self::Silent,
            Self::Auto => valid.resolve_valid(),
            other => other,
        }
    }

    /// Concrete mode for valid attempts
    #[must_use]
    pub const fn resolve_valid(self) -> Self {
        match self {
            Self::Auto => Self::Csv,
            other => other,
        }
    }
}

/// What a progress bar counts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressUnit {
    /// Valid puzzles toward a batch target
    Valid,
    /// Processed candidates, such as stored keys during regeneration
    Attempts,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Emit {
    /// Written without a newline
    Inline(&'static str),
    Line(String),
    Warning(String),
}

/// Writes attempt output as a run progresses
pub struct Reporter {
    valid: ReportMode,
    invalid: ReportMode,
    warn_invalid_manual: bool,
    progress: Option<(ProgressBar, ProgressUnit)>,
    header_printed: bool,
    mid_line: bool,
}

impl Reporter {
    /// `sampled` is true for batch runs, where `auto` silences invalid output
    #[must_use]
    pub const fn new(
        valid: ReportMode,
        invalid: ReportMode,
        sampled: bool,
        warn_invalid_manual: bool,
    ) -> Self {
        let valid = valid.resolve_valid();
        Self {
            valid,
            invalid: invalid.resolve_invalid(sampled, valid),
            warn_invalid_manual,
            progress: None,
            header_printed: false,
            mid_line: false,
        }
    }

    /// Attach a stderr progress bar counting `unit` toward `target`
    ///
    /// Ignored when either channel prints dots, since those share the line.
    #[must_use]
    pub fn with_progress(mut self, target: usize, unit: ProgressUnit) -> Self {
        if self.valid == ReportMode::Dots || self.invalid == ReportMode::Dots {
            return self;
        }
        let pb = ProgressBar::new(target as u64);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} | {msg}")
        {
            pb.set_style(style.progress_chars("█▓▒░"));
        }
        self.progress = Some((pb, unit));
        self
    }

    /// Report one attempt
    pub fn report(&mut self, outcome: &AttemptOutcome, stats: &RunStats) {
        for emit in self.render(outcome, stats) {
            self.write(emit);
        }
        if let Some((pb, unit)) = &self.progress {
            let pos = match unit {
                ProgressUnit::Valid => stats.valid,
                ProgressUnit::Attempts => stats.attempts,
            };
            pb.set_position(pos as u64);
            pb.set_message(format!("{} valid, {} tries", stats.valid, stats.attempts));
        }
    }

    /// Close any open dot row and clear the progress bar
    pub fn finish(&mut self) {
        if self.mid_line {
            println!();
            self.mid_line = false;
        }
        if let Some((pb, _)) = self.progress.take() {
            pb.finish_and_clear();
        }
    }

    fn write(&self, emit: Emit) {
        match emit {
            Emit::Inline(mark) => {
                print!("{mark}");
                let _ = io::stdout().flush();
            }
            Emit::Line(line) => match &self.progress {
                Some((pb, _)) => pb.println(line),
                None => println!("{line}"),
            },
            Emit::Warning(text) => match &self.progress {
                Some((pb, _)) => pb.suspend(|| eprintln!("{}", text.yellow())),
                None => eprintln!("{}", text.yellow()),
            },
        }
    }

    fn render(&mut self, outcome: &AttemptOutcome, stats: &RunStats) -> Vec<Emit> {
        let mut out = Vec::new();
        match outcome {
            AttemptOutcome::Duplicate(_) => {}
            AttemptOutcome::Rejected(record) => {
                self.render_mode(self.invalid, ".", record, stats, &mut out);
            }
            AttemptOutcome::Forced(record) => {
                if self.warn_invalid_manual {
                    if self.mid_line {
                        out.push(Emit::Warning(String::new()));
                        self.mid_line = false;
                    }
                    out.push(Emit::Warning(format!(
                        "Warning: {} does not meet the requirements: {}",
                        record.letters,
                        record.quality().reasons_text()
                    )));
                }
                self.render_valid(record, stats, &mut out);
            }
            AttemptOutcome::Accepted(record) => self.render_valid(record, stats, &mut out),
        }
        out
    }

    fn render_valid(&mut self, record: &PuzzleRecord, stats: &RunStats, out: &mut Vec<Emit>) {
        if self.mid_line && self.valid != ReportMode::Dots {
            out.push(Emit::Line(String::new()));
            self.mid_line = false;
        }
        self.render_mode(self.valid, "!", record, stats, out);
    }

    fn render_mode(
        &mut self,
        mode: ReportMode,
        mark: &'static str,
        record: &PuzzleRecord,
        stats: &RunStats,
        out: &mut Vec<Emit>,
    ) {
        match mode {
            ReportMode::Dots => {
                out.push(Emit::Inline(mark));
                self.mid_line = true;
            }
            ReportMode::Csv => {
                if !self.header_printed {
                    out.push(Emit::Line(csv_header()));
                    self.header_printed = true;
                }
                out.push(Emit::Line(csv_row(record)));
            }
            ReportMode::Why => out.push(Emit::Line(why_table(stats))),
            ReportMode::Silent | ReportMode::Auto => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LetterSet;
    use crate::generator::{GenerationPolicy, PuzzleStats};

    fn record(valid: bool) -> PuzzleRecord {
        let letters = LetterSet::new("LAEGRUY", 7).unwrap();
        let policy = GenerationPolicy::default();
        let quality = policy.evaluate(&PuzzleStats::default(), 0.5);
        let mut record = PuzzleRecord::new(&letters, Vec::new(), policy, quality, false, None);
        if valid {
            record.generation_info.quality.is_valid = true;
            record.generation_info.quality.failed_reasons.clear();
        }
        record
    }

    fn lines(emits: &[Emit]) -> Vec<String> {
        emits
            .iter()
            .map(|e| match e {
                Emit::Inline(s) => (*s).to_string(),
                Emit::Line(s) | Emit::Warning(s) => s.clone(),
            })
            .collect()
    }

    #[test]
    fn auto_resolution() {
        assert_eq!(
            ReportMode::Auto.resolve_invalid(true, ReportMode::Csv),
            ReportMode::Silent
        );
        assert_eq!(
            ReportMode::Auto.resolve_invalid(false, ReportMode::Dots),
            ReportMode::Dots
        );
        assert_eq!(
            ReportMode::Why.resolve_invalid(true, ReportMode::Csv),
            ReportMode::Why
        );
        assert_eq!(ReportMode::Auto.resolve_valid(), ReportMode::Csv);
    }

    #[test]
    fn mode_names() {
        let mode: ReportMode = serde_json::from_str("\"none\"").unwrap();
        assert_eq!(mode, ReportMode::Silent);
        assert_eq!(
            ReportMode::from_str("none", true).unwrap(),
            ReportMode::Silent
        );
        assert_eq!(serde_json::to_string(&ReportMode::Why).unwrap(), "\"why\"");
    }

    #[test]
    fn csv_header_printed_once() {
        let mut reporter = Reporter::new(ReportMode::Csv, ReportMode::Auto, true, true);
        let stats = RunStats::new();
        let first = reporter.render(&AttemptOutcome::Accepted(record(true)), &stats);
        let second = reporter.render(&AttemptOutcome::Accepted(record(true)), &stats);
        assert_eq!(first.len(), 2);
        assert_eq!(lines(&first)[0], csv_header());
        assert_eq!(second.len(), 1);
    }

    #[test]
    fn sampled_invalid_silent_under_auto() {
        let mut reporter = Reporter::new(ReportMode::Csv, ReportMode::Auto, true, true);
        let emits = reporter.render(&AttemptOutcome::Rejected(record(false)), &RunStats::new());
        assert!(emits.is_empty());
    }

    #[test]
    fn duplicates_print_nothing() {
        let mut reporter = Reporter::new(ReportMode::Dots, ReportMode::Dots, true, true);
        let letters = LetterSet::new("LAEGRUY", 7).unwrap();
        let emits = reporter.render(&AttemptOutcome::Duplicate(letters), &RunStats::new());
        assert!(emits.is_empty());
    }

    #[test]
    fn dots_row_closed_before_csv() {
        let mut reporter = Reporter::new(ReportMode::Csv, ReportMode::Dots, true, true);
        let stats = RunStats::new();
        let dots = reporter.render(&AttemptOutcome::Rejected(record(false)), &stats);
        assert_eq!(dots, vec![Emit::Inline(".")]);

        let valid = reporter.render(&AttemptOutcome::Accepted(record(true)), &stats);
        assert_eq!(valid[0], Emit::Line(String::new()));
        assert_eq!(lines(&valid)[1], csv_header());
    }

    #[test]
    fn dots_for_both_channels() {
        let mut reporter = Reporter::new(ReportMode::Dots, ReportMode::Dots, true, true);
        let stats = RunStats::new();
        let a = reporter.render(&AttemptOutcome::Rejected(record(false)), &stats);
        let b = reporter.render(&AttemptOutcome::Accepted(record(true)), &stats);
        assert_eq!(a, vec![Emit::Inline(".")]);
        assert_eq!(b, vec![Emit::Inline("!")]);
    }

    #[test]
    fn forced_manual_warns_then_reports() {
        let mut reporter = Reporter::new(ReportMode::Csv, ReportMode::Auto, false, true);
        let emits = reporter.render(&AttemptOutcome::Forced(record(false)), &RunStats::new());
        assert!(matches!(&emits[0], Emit::Warning(w) if w.contains("LAEGRUY")));
        assert!(lines(&emits)[2].contains("False"));
    }

    #[test]
    fn forced_manual_warning_can_be_disabled() {
        let mut reporter = Reporter::new(ReportMode::Csv, ReportMode::Auto, false, false);
        let emits = reporter.render(&AttemptOutcome::Forced(record(false)), &RunStats::new());
        assert!(emits.iter().all(|e| !matches!(e, Emit::Warning(_))));
    }

    #[test]
    fn why_mode_prints_breakdown() {
        let mut reporter = Reporter::new(ReportMode::Silent, ReportMode::Why, true, true);
        let emits = reporter.render(&AttemptOutcome::Rejected(record(false)), &RunStats::new());
        assert!(lines(&emits)[0].starts_with("Reasons why"));
    }

    #[test]
    fn progress_skipped_with_dots() {
        let reporter = Reporter::new(ReportMode::Dots, ReportMode::Auto, true, true)
            .with_progress(10, ProgressUnit::Valid);
        assert!(reporter.progress.is_none());
    }
}
