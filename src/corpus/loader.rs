//! Word list loading
//!
//! Reads the main word list and merges the optional custom lists: a remove
//! list for words known to be too obscure and an add list for words the
//! main list is missing.

use super::Corpus;
use std::fs;
use std::io;
use std::path::Path;

/// Load and normalize words from a file, one per line
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read or opened.
///
/// # Examples
/// ```no_run
/// use spelling_hive::corpus::loader::load_from_file;
///
/// let corpus = load_from_file("word_lists/scowl.txt", 4).unwrap();
/// println!("Loaded {} words", corpus.len());
/// ```
pub fn load_from_file<P: AsRef<Path>>(path: P, min_word_length: usize) -> io::Result<Corpus> {
    let content = fs::read_to_string(path)?;
    Ok(Corpus::from_words(content.lines(), min_word_length))
}

/// Paths making up a corpus
#[derive(Debug, Clone, Copy)]
pub struct CorpusSources<'a> {
    pub word_list: &'a Path,
    pub add_list: Option<&'a Path>,
    pub remove_list: Option<&'a Path>,
}

/// Load the main word list and apply the custom lists
///
/// The remove list is applied first, then the add list. The add list is only
/// merged when both it and the main corpus are non-empty. A missing or
/// unreadable custom list is logged and skipped.
///
/// # Errors
///
/// Returns an I/O error if the main word list cannot be read.
pub fn load_corpus(sources: CorpusSources<'_>, min_word_length: usize) -> io::Result<Corpus> {
    let mut corpus = load_from_file(sources.word_list, min_word_length)?;
    log::info!(
        "Loaded {} words from {}",
        corpus.len(),
        sources.word_list.display()
    );

    if let Some(remove) = sources
        .remove_list
        .and_then(|p| optional_list(p, "remove", min_word_length))
    {
        let before = corpus.len();
        corpus = corpus.without(&remove);
        log::info!("Removed {} words", before - corpus.len());
    }

    if let Some(add) = sources
        .add_list
        .and_then(|p| optional_list(p, "add", min_word_length))
        && !corpus.is_empty()
        && !add.is_empty()
    {
        let before = corpus.len();
        corpus = corpus.with(&add);
        log::info!("Added {} words", corpus.len() - before);
    }

    Ok(corpus)
}

fn optional_list(path: &Path, name: &str, min_word_length: usize) -> Option<Corpus> {
    match load_from_file(path, min_word_length) {
        Ok(list) => Some(list),
        Err(e) => {
            log::warn!(
                "Could not read optional \"{name}\" list {}: {e}",
                path.display()
            );
            None
        }
    }
}
