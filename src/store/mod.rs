//! Puzzle persistence
//!
//! Puzzles are keyed by their canonical letters. `DirectoryStore` keeps one
//! JSON file per puzzle; `MemoryStore` keeps them in a map.

mod record;

pub use record::{GenerationInfo, PuzzleRecord};

use rustc_hash::FxHashMap;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

/// Errors reading or writing puzzle records
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Malformed puzzle record: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Puzzle {key} is inconsistent: {reason}")]
    Inconsistent { key: String, reason: String },

    #[error("No puzzle stored for {0}")]
    NotFound(String),
}

/// Storage for generated puzzles
pub trait PuzzleStore {
    /// Whether a puzzle exists for a canonical key
    fn contains(&self, key: &str) -> bool;

    /// Load the puzzle for a canonical key, if any
    ///
    /// # Errors
    /// Returns an error if a stored record cannot be read or is malformed.
    fn load(&self, key: &str) -> Result<Option<PuzzleRecord>, StoreError>;

    /// Store a puzzle, replacing any previous record with the same key
    ///
    /// # Errors
    /// Returns an error if the record cannot be written.
    fn save(&mut self, record: &PuzzleRecord) -> Result<(), StoreError>;

    /// All stored keys, sorted
    fn keys(&self) -> Vec<String>;

    /// The stored `manual_puzzle` flag for a key, read even when the rest of
    /// the record does not load
    fn manual_flag(&self, key: &str) -> Option<bool> {
        self.load(key).ok().flatten().map(|r| r.is_manual())
    }
}

/// In-memory store
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: FxHashMap<String, PuzzleRecord>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl PuzzleStore for MemoryStore {
    fn contains(&self, key: &str) -> bool {
        self.records.contains_key(key)
    }

    fn load(&self, key: &str) -> Result<Option<PuzzleRecord>, StoreError> {
        Ok(self.records.get(key).cloned())
    }

    fn save(&mut self, record: &PuzzleRecord) -> Result<(), StoreError> {
        self.records.insert(record.key(), record.clone());
        Ok(())
    }

    fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.records.keys().cloned().collect();
        keys.sort_unstable();
        keys
    }
}

/// One `<KEY>.json` file per puzzle in a directory
#[derive(Debug)]
pub struct DirectoryStore {
    dir: PathBuf,
    keys: BTreeSet<String>,
}

impl DirectoryStore {
    /// Open (creating if needed) a puzzle directory and index its records
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created or listed.
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self, StoreError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;

        let mut keys = BTreeSet::new();
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "json")
                && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
            {
                keys.insert(stem.to_string());
            }
        }

        log::info!("{} existing puzzles in {}", keys.len(), dir.display());
        Ok(Self { dir, keys })
    }

    /// File path for a key
    #[must_use]
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl PuzzleStore for DirectoryStore {
    fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    fn load(&self, key: &str) -> Result<Option<PuzzleRecord>, StoreError> {
        if !self.keys.contains(key) {
            return Ok(None);
        }
        read_record(self.path_for(key)).map(Some)
    }

    fn save(&mut self, record: &PuzzleRecord) -> Result<(), StoreError> {
        let key = record.key();
        let path = self.path_for(&key);

        // Write to a sibling temp file and rename, so a record is either
        // fully replaced or untouched
        let temp = NamedTempFile::new_in(&self.dir)?;
        {
            let mut writer = BufWriter::new(temp.as_file());
            write_pretty(&mut writer, record)?;
            writer.write_all(b"\n")?;
            writer.flush()?;
        }
        temp.persist(&path).map_err(|e| StoreError::Io(e.error))?;

        log::debug!("Wrote {}", path.display());
        self.keys.insert(key);
        Ok(())
    }

    fn keys(&self) -> Vec<String> {
        self.keys.iter().cloned().collect()
    }

    fn manual_flag(&self, key: &str) -> Option<bool> {
        if !self.keys.contains(key) {
            return None;
        }
        let text = fs::read_to_string(self.path_for(key)).ok()?;
        let value: serde_json::Value = serde_json::from_str(&text).ok()?;
        value.pointer("/generation_info/manual_puzzle")?.as_bool()
    }
}

/// Read and validate a puzzle record from any path
///
/// # Errors
/// Returns an error if the file cannot be read or is not a valid record.
pub fn read_record<P: AsRef<Path>>(path: P) -> Result<PuzzleRecord, StoreError> {
    let text = fs::read_to_string(path)?;
    PuzzleRecord::from_json(&text)
}

/// Serialize with four-space indentation
fn write_pretty<W: Write, T: Serialize>(writer: W, value: &T) -> Result<(), serde_json::Error> {
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(writer, formatter);
    value.serialize(&mut serializer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LetterSet, WordRecord};
    use crate::generator::{GenerationPolicy, PuzzleStats};
    use tempfile::TempDir;

    fn record(letters: &str, manual: bool) -> PuzzleRecord {
        let letters = LetterSet::new(letters, 7).unwrap();
        let words = vec![WordRecord {
            word: "WORD".into(),
            score: 1,
            is_pangram: false,
        }];
        let policy = GenerationPolicy::default();
        let quality = policy.evaluate(&PuzzleStats::default(), 0.4);
        PuzzleRecord::new(&letters, words, policy, quality, manual, Some("words.txt".into()))
    }

    #[test]
    fn directory_store_round_trip() {
        let dir = TempDir::new().unwrap();
        let mut store = DirectoryStore::open(dir.path()).unwrap();
        assert!(store.is_empty());

        let saved = record("WZYXROD", false);
        store.save(&saved).unwrap();

        assert!(store.contains("WDORXYZ"));
        assert!(dir.path().join("WDORXYZ.json").exists());
        assert_eq!(store.load("WDORXYZ").unwrap(), Some(saved));
        assert_eq!(store.load("ABCDEFG").unwrap(), None);
    }

    #[test]
    fn directory_store_indexes_existing_files() {
        let dir = TempDir::new().unwrap();
        {
            let mut store = DirectoryStore::open(dir.path()).unwrap();
            store.save(&record("WORDYXZ", true)).unwrap();
            store.save(&record("ABCDEFG", false)).unwrap();
        }
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let store = DirectoryStore::open(dir.path()).unwrap();
        assert_eq!(store.keys(), vec!["ABCDEFG", "WDORXYZ"]);
        assert!(store.load("WDORXYZ").unwrap().unwrap().is_manual());
    }

    #[test]
    fn directory_store_overwrites() {
        let dir = TempDir::new().unwrap();
        let mut store = DirectoryStore::open(dir.path()).unwrap();
        store.save(&record("WORDYXZ", true)).unwrap();
        store.save(&record("WORDYXZ", false)).unwrap();

        assert_eq!(store.len(), 1);
        assert!(!store.load("WDORXYZ").unwrap().unwrap().is_manual());
        // No stray temp files left behind
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn files_are_indented_json() {
        let dir = TempDir::new().unwrap();
        let mut store = DirectoryStore::open(dir.path()).unwrap();
        store.save(&record("WORDYXZ", false)).unwrap();

        let text = fs::read_to_string(store.path_for("WDORXYZ")).unwrap();
        assert!(text.starts_with("{\n    \"letters\": \"WDORXYZ\""));
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("WDORXYZ.json"), "{ not json").unwrap();
        let store = DirectoryStore::open(dir.path()).unwrap();
        assert!(matches!(store.load("WDORXYZ"), Err(StoreError::Json(_))));
    }

    #[test]
    fn memory_store_basics() {
        let mut store = MemoryStore::new();
        store.save(&record("WORDYXZ", false)).unwrap();
        store.save(&record("ABCDEFG", false)).unwrap();
        assert_eq!(store.len(), 2);
        assert!(store.contains("ABCDEFG"));
        assert_eq!(store.keys(), vec!["ABCDEFG", "WDORXYZ"]);
    }

    #[test]
    fn manual_flag_read_from_unloadable_record() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("WDORSXY.json"),
            r#"{"letters": "WDORSXY", "generation_info": {"manual_puzzle": false}}"#,
        )
        .unwrap();
        let store = DirectoryStore::open(dir.path()).unwrap();

        assert!(store.load("WDORSXY").is_err());
        assert_eq!(store.manual_flag("WDORSXY"), Some(false));
        assert_eq!(store.manual_flag("ABCDEFG"), None);
    }

    #[test]
    fn memory_store_manual_flag() {
        let mut store = MemoryStore::new();
        store.save(&record("WORDSYX", true)).unwrap();
        assert_eq!(store.manual_flag("WDORSXY"), Some(true));
        assert_eq!(store.manual_flag("ABCDEFG"), None);
    }
}
