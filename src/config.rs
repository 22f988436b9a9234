//! Generator configuration
//!
//! Defaults can be overridden from a JSON file and then from the command
//! line.

use crate::generator::GenerationPolicy;
use crate::output::ReportMode;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Everything a generation run needs besides the request itself
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub word_list_path: PathBuf,
    pub add_list_path: Option<PathBuf>,
    pub remove_list_path: Option<PathBuf>,
    pub data_dir: PathBuf,
    /// Corpus scan workers; more than one enables the parallel matcher
    pub threads: usize,
    pub puzzle_count: usize,
    pub max_puzzle_tries: usize,
    pub print_valid: ReportMode,
    pub print_invalid: ReportMode,
    pub warn_invalid_manual: bool,
    pub policy: GenerationPolicy,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            word_list_path: PathBuf::from("word_lists/scowl.txt"),
            add_list_path: Some(PathBuf::from("word_lists/dict-add.txt")),
            remove_list_path: Some(PathBuf::from("word_lists/dict-remove.txt")),
            data_dir: PathBuf::from("data"),
            threads: 1,
            puzzle_count: 1000,
            max_puzzle_tries: 100_000,
            print_valid: ReportMode::Csv,
            print_invalid: ReportMode::Auto,
            warn_invalid_manual: true,
            policy: GenerationPolicy::default(),
        }
    }
}

impl GeneratorConfig {
    /// Load from a JSON file; missing fields keep their defaults
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config {}", path.display()))
    }

    /// Defaults, or the given file when present
    ///
    /// # Errors
    /// Returns an error if a given file cannot be loaded.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::from_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.threads, 1);
        assert_eq!(config.puzzle_count, 1000);
        assert_eq!(config.max_puzzle_tries, 100_000);
        assert_eq!(config.print_invalid, ReportMode::Auto);
        assert_eq!(config.data_dir, PathBuf::from("data"));
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("hive.json");
        fs::write(
            &path,
            r#"{"threads": 4, "print_valid": "dots", "policy": {"max_plurals": 1}}"#,
        )
        .unwrap();

        let config = GeneratorConfig::load(Some(&path)).unwrap();
        assert_eq!(config.threads, 4);
        assert_eq!(config.print_valid, ReportMode::Dots);
        assert_eq!(config.policy.max_plurals, 1);
        assert_eq!(config.policy.max_gerunds, 5);
        assert_eq!(config.puzzle_count, 1000);
    }

    #[test]
    fn no_file_means_defaults() {
        assert_eq!(GeneratorConfig::load(None).unwrap(), GeneratorConfig::default());
    }

    #[test]
    fn bad_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("hive.json");
        fs::write(&path, "threads = 4").unwrap();
        assert!(GeneratorConfig::load(Some(&path)).is_err());
        assert!(GeneratorConfig::load(Some(&dir.path().join("missing.json"))).is_err());
    }
}
