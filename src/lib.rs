//! Spelling Hive
//!
//! Generates seven-letter word puzzles: a center letter plus six others,
//! every answer uses the center letter, and at least one answer (a pangram)
//! uses all seven. Candidates are scored against a word list and accepted
//! only if they meet the configured quality rules.
//!
//! # Quick Start
//!
//! ```rust
//! use spelling_hive::core::{LetterSet, check_word};
//!
//! let letters = LetterSet::new("LAEGRUY", 7).unwrap();
//! let record = check_word(&letters, "REGULARLY", 4).unwrap();
//! assert!(record.is_pangram);
//! assert_eq!(record.score, 9);
//! assert!(check_word(&letters, "GRAY", 4).is_none());
//! ```

// Configuration
pub mod config;

// Core domain types
pub mod core;

// Word lists
pub mod corpus;

// Generation and validation
pub mod generator;

// Puzzle persistence
pub mod store;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;
