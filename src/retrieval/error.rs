use thiserror::Error;

use crate::embedding::EmbeddingError;

#[derive(Debug, Error)]
pub enum RetrievalError {
    /// Query embedding failed; the whole retrieval is aborted.
    #[error("embedding error: {0}")]
    Embedding(#[from] EmbeddingError),

    /// A passage vector and the query vector disagree on dimensionality. This means
    /// the passage was embedded with a different model than the query.
    #[error("embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

impl RetrievalError {
    /// Returns `true` if the embedding model could not be loaded.
    pub fn is_model_unavailable(&self) -> bool {
        matches!(self, RetrievalError::Embedding(e) if e.is_model_unavailable())
    }
}
