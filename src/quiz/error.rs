use thiserror::Error;

use crate::retrieval::RetrievalError;
use crate::store::{ChapterKey, StoreError};

#[derive(Debug, Error)]
/// Errors returned while building a quiz context.
pub enum QuizError {
    /// Passage pools could not be fetched.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Ranking failed (embedder unavailable, dimension mismatch).
    #[error(transparent)]
    Retrieval(#[from] RetrievalError),

    /// Retrieval succeeded but selected nothing for this chapter.
    #[error("no content found for chapter {key}")]
    NoContext {
        /// Chapter that was queried.
        key: ChapterKey,
    },

    /// Request rejected before retrieval.
    #[error("invalid quiz request: {reason}")]
    InvalidRequest {
        /// Why the request was rejected.
        reason: String,
    },
}

impl QuizError {
    /// Returns `true` when the embedding model could not be loaded.
    pub fn is_model_unavailable(&self) -> bool {
        matches!(self, Self::Retrieval(e) if e.is_model_unavailable())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
/// Errors returned when grading a submission.
pub enum GradingError {
    #[error("expected {expected} answers, got {actual}")]
    AnswerCountMismatch { expected: usize, actual: usize },

    #[error("quiz has no questions")]
    NoQuestions,
}
