//! Generation error type

use crate::core::LetterSetError;
use crate::store::StoreError;
use thiserror::Error;

/// Errors that stop a generation request
///
/// Policy rejections are not errors; they are reported through
/// `AttemptOutcome`.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("Invalid letters: {0}")]
    InvalidLetters(#[from] LetterSetError),

    #[error("Word list is empty")]
    EmptyCorpus,

    #[error("No pangram-capable letter combinations in the word list")]
    EmptyPool,

    #[error("Could not start worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
