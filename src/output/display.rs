//! Display functions for command results

use super::formatters::columns;
use crate::commands::{GenerateMode, Overlap, SolveResult, UniqRow};
use crate::generator::{RunStatus, RunSummary};
use colored::Colorize;

/// Print how a generation run ended
pub fn print_run_summary(summary: &RunSummary, mode: &GenerateMode) {
    let stats = &summary.stats;

    match summary.status {
        RunStatus::Cancelled => eprintln!("\n{}", "Interrupted. Exiting.".yellow()),
        RunStatus::BudgetExhausted => eprintln!(
            "{}",
            format!(
                "Gave up after {} tries with {} valid puzzles",
                stats.attempts, stats.valid
            )
            .yellow()
        ),
        RunStatus::Completed => {}
    }

    match mode {
        GenerateMode::Manual(_) => {
            if let Some(key) = summary.produced.first() {
                eprintln!("Wrote puzzle {}", key.bright_yellow().bold());
            }
        }
        GenerateMode::Regenerate => {
            eprintln!("Regenerated {} puzzles", summary.produced.len());
            if !summary.no_longer_valid.is_empty() {
                eprintln!(
                    "\n{}",
                    "These puzzles no longer meet the requirements and can be deleted:".red()
                );
                for key in &summary.no_longer_valid {
                    eprintln!("  {key}");
                }
            }
        }
        GenerateMode::Batch => {
            eprintln!(
                "{} new puzzles from {} tries ({} duplicates)",
                format!("{}", summary.produced.len()).green().bold(),
                stats.attempts,
                stats.duplicates
            );
        }
    }
}

/// Print every answer of a puzzle
pub fn print_solve_result(result: &SolveResult) {
    let record = &result.record;

    println!("\n{}", "─".repeat(40).cyan());
    if result.generated {
        println!("You created a new puzzle: {}", record.key().bright_yellow().bold());
    }
    println!("letters:     {}", record.letters.to_string().bright_yellow().bold());
    println!("total_score: {}", record.total_score);
    println!("max_score:   {}", result.max_score);
    println!("word_count:  {}", record.word_count);
    println!("pangram(s):  {}", record.pangram_list.join(", ").green());
    println!("{}", "─".repeat(40).cyan());

    let cells: Vec<String> = result
        .answers
        .iter()
        .flat_map(|a| [a.word.clone(), a.points.to_string()])
        .collect();
    println!("{}", columns(&cells, 2, 12));
}

/// Print uniqueness scores, one puzzle per line
pub fn print_uniqueness(rows: &[UniqRow]) {
    for row in rows {
        println!("{:.2}\t{}", row.score, row.path.display());
    }
}

/// Print the words two puzzles share
pub fn print_overlap(result: &Overlap) {
    let (left_pct, right_pct) = result.shares();
    println!(
        "{} ({} words) and {} ({} words) share {} words",
        result.left.bright_yellow(),
        result.left_count,
        result.right.bright_yellow(),
        result.right_count,
        format!("{}", result.shared.len()).bold()
    );
    println!(
        "  {left_pct:.1}% of {} and {right_pct:.1}% of {}",
        result.left, result.right
    );
    if !result.shared.is_empty() {
        println!("{}", columns(&result.shared, 6, 12));
    }
}
