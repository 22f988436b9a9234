//! Formatting utilities for terminal output

use crate::generator::RunStats;
use crate::store::PuzzleRecord;
use std::fmt::Write;

/// Column names for tab-separated attempt rows
pub const CSV_COLUMNS: [&str; 8] = [
    "letters", "words", "score", "pangram", "valid?", "-S pair", "-ED", "-ING",
];

/// Header line for tab-separated output
#[must_use]
pub fn csv_header() -> String {
    CSV_COLUMNS.join("\t")
}

/// One tab-separated row describing a scored puzzle
#[must_use]
pub fn csv_row(record: &PuzzleRecord) -> String {
    let quality = record.quality();
    format!(
        "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
        record.letters,
        record.word_count,
        record.total_score,
        record.pangram_count,
        if quality.is_valid { "True" } else { "False" },
        quality.plural_pairs,
        quality.preterite_pairs,
        quality.gerund_pairs,
    )
}

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 {
        return "░".repeat(width);
    }
    // Cast is safe: values are clamped to [0, width]
    let filled = ((value / max) * width as f64) as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Rejection breakdown table for `why` reporting
#[must_use]
pub fn why_table(stats: &RunStats) -> String {
    let mut out = String::from("Reasons why generated games were rejected:\n");
    for (reason, pct) in stats.breakdown() {
        let _ = writeln!(
            out,
            "{:>24}: {:5.2}% {}",
            reason.as_str(),
            pct,
            create_progress_bar(pct, 100.0, 20)
        );
    }
    let _ = write!(out, "{:>24}: {}", "Valid games found", stats.valid);
    out
}

/// Lay out items in fixed-width columns, filling rows left to right
#[must_use]
pub fn columns(items: &[String], cols: usize, width: usize) -> String {
    items
        .chunks(cols.max(1))
        .map(|row| {
            row.iter()
                .map(|item| format!("{item:<width$}"))
                .collect::<String>()
                .trim_end()
                .to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
