use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmbeddingError {
    /// Weights, config or tokenizer could not be obtained or loaded.
    #[error("embedding model unavailable: {reason}")]
    ModelUnavailable { reason: String },

    #[error("embedding model not found at path: {path}")]
    ModelNotFound { path: PathBuf },

    #[error("embedding inference failed: {reason}")]
    InferenceFailed { reason: String },

    #[error("tokenization failed: {reason}")]
    TokenizationFailed { reason: String },

    #[error("invalid model configuration: {reason}")]
    InvalidConfig { reason: String },
}

impl EmbeddingError {
    /// Returns `true` for failures that mean no model could be loaded at all.
    pub fn is_model_unavailable(&self) -> bool {
        matches!(
            self,
            EmbeddingError::ModelUnavailable { .. } | EmbeddingError::ModelNotFound { .. }
        )
    }
}

impl From<candle_core::Error> for EmbeddingError {
    fn from(err: candle_core::Error) -> Self {
        EmbeddingError::InferenceFailed {
            reason: err.to_string(),
        }
    }
}

impl From<std::io::Error> for EmbeddingError {
    fn from(err: std::io::Error) -> Self {
        EmbeddingError::ModelUnavailable {
            reason: err.to_string(),
        }
    }
}
