//! Uniqueness ranking of stored puzzles

use crate::core::LetterSet;
use crate::generator::record_uniqueness;
use crate::store::read_record;
use anyhow::{Context, Result, bail};
use std::fs;
use std::path::{Path, PathBuf};

/// Uniqueness score of one puzzle file
#[derive(Debug, Clone, PartialEq)]
pub struct UniqRow {
    pub score: f64,
    pub path: PathBuf,
}

/// Resolve a target into puzzle files
///
/// A directory yields every `.json` file in it. Otherwise the target is
/// tried as puzzle letters under `data_dir` (case-insensitive, any order
/// after the center letter) and finally as a plain file path.
///
/// # Errors
/// Returns an error if nothing matches the target.
pub fn resolve_target(target: &str, data_dir: &Path) -> Result<Vec<PathBuf>> {
    let path = Path::new(target);
    if path.is_dir() {
        return json_files(path);
    }

    if let Ok(letters) = LetterSet::parse(target) {
        let candidate = data_dir.join(format!("{}.json", letters.key()));
        if candidate.is_file() {
            return Ok(vec![candidate]);
        }
    }

    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    bail!("No such directory or file '{target}'")
}

/// Every `.json` file in a directory, sorted by path
///
/// # Errors
/// Returns an error if the directory cannot be listed.
pub fn json_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("Failed to list {}", dir.display()))? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Score every puzzle named by `targets`, least unique first
///
/// With no targets, every puzzle in `data_dir` is scored.
///
/// # Errors
/// Returns an error if a target does not resolve or a file is not a puzzle.
pub fn rank_uniqueness(targets: &[String], data_dir: &Path) -> Result<Vec<UniqRow>> {
    let paths = if targets.is_empty() {
        json_files(data_dir)?
    } else {
        let mut paths = Vec::new();
        for target in targets {
            paths.extend(resolve_target(target, data_dir)?);
        }
        paths
    };

    let mut rows = paths
        .into_iter()
        .map(|path| {
            let record = read_record(&path)
                .with_context(|| format!("Failed to read puzzle {}", path.display()))?;
            Ok(UniqRow {
                score: record_uniqueness(&record.word_list),
                path,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    rows.sort_by(|a, b| a.score.total_cmp(&b.score).then_with(|| a.path.cmp(&b.path)));
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::WordRecord;
    use crate::generator::GenerationPolicy;
    use crate::store::{DirectoryStore, PuzzleRecord, PuzzleStore};
    use tempfile::TempDir;

    fn save(store: &mut DirectoryStore, letters: &str, words: &[&str]) {
        let letters = LetterSet::new(letters, 7).unwrap();
        let words = words
            .iter()
            .map(|w| WordRecord {
                word: (*w).to_string(),
                score: u32::try_from(w.len()).unwrap(),
                is_pangram: false,
            })
            .collect();
        let policy = GenerationPolicy::default();
        let quality = policy.evaluate(&Default::default(), 0.5);
        store
            .save(&PuzzleRecord::new(&letters, words, policy, quality, true, None))
            .unwrap();
    }

    fn store() -> (TempDir, DirectoryStore) {
        let dir = TempDir::new().unwrap();
        let mut store = DirectoryStore::open(dir.path()).unwrap();
        save(
            &mut store,
            "WIGLEDR",
            &["WIGGLE", "WIGGLED", "WRIGGLE", "WRIGGLED", "WIGGLER", "WRIGGLER"],
        );
        save(&mut store, "BACIORT", &["ABORT", "ACTOR", "BIOTIC", "CAROB"]);
        (dir, store)
    }

    #[test]
    fn ranks_whole_directory_ascending() {
        let (dir, _store) = store();
        let rows = rank_uniqueness(&[], dir.path()).unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].score <= rows[1].score);
        assert!(rows[0].path.ends_with("WDEGILR.json"));
    }

    #[test]
    fn letters_resolve_in_any_order() {
        let (dir, _store) = store();
        let rows = rank_uniqueness(&["bitcoar".to_string()], dir.path()).unwrap();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].path.ends_with("BACIORT.json"));
    }

    #[test]
    fn unknown_target() {
        let (dir, _store) = store();
        assert!(rank_uniqueness(&["QXZ".to_string()], dir.path()).is_err());
    }

    #[test]
    fn ignores_other_files() {
        let (dir, _store) = store();
        fs::write(dir.path().join("notes.txt"), "hello").unwrap();
        assert_eq!(json_files(dir.path()).unwrap().len(), 2);
    }
}
