//! Cross-cutting, shared constants.
//!
//! # Dimension Invariants
//!
//! [`DEFAULT_EMBEDDING_DIM`] matches the reference sentence-embedding model
//! (`all-MiniLM-L6-v2`). It is a default, not a contract: a deployment that swaps the
//! model gets whatever hidden size that model produces, and every passage vector in
//! the store must have been computed with the same model. Use
//! [`validate_embedding_dim`] where a caller wants to check that agreement up front.

use thiserror::Error;

pub const DEFAULT_EMBEDDING_DIM: usize = 384;

/// Word-piece budget per text; longer inputs are truncated by the tokenizer.
pub const DEFAULT_MAX_SEQ_LEN: usize = 256;

pub const DEFAULT_MODEL_ID: &str = "sentence-transformers/all-MiniLM-L6-v2";

/// Exam-style (past question) passages drawn per quiz.
pub const DEFAULT_PRIMARY_QUOTA: usize = 5;

/// Chapter-content passages drawn per quiz.
pub const DEFAULT_SUPPLEMENTARY_QUOTA: usize = 3;

/// Total passages handed to the generation step.
pub const DEFAULT_OVERALL_CAP: usize = 8;

/// Characters of each passage included in the rendered context block.
pub const DEFAULT_SNIPPET_CHARS: usize = 500;

pub const DEFAULT_NUM_QUESTIONS: usize = 10;

/// Error returned when a runtime dimension disagrees with the expected one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DimValidationError {
    #[error("embedding dimension cannot be zero")]
    ZeroDimension,

    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

/// Validates that a runtime embedding dimension matches the expected dimension.
///
/// # Example
///
/// ```
/// use quizrag::constants::{validate_embedding_dim, DEFAULT_EMBEDDING_DIM};
///
/// validate_embedding_dim(384, DEFAULT_EMBEDDING_DIM).unwrap();
/// assert!(validate_embedding_dim(768, DEFAULT_EMBEDDING_DIM).is_err());
/// ```
pub fn validate_embedding_dim(actual: usize, expected: usize) -> Result<(), DimValidationError> {
    if expected == 0 {
        return Err(DimValidationError::ZeroDimension);
    }
    if actual != expected {
        return Err(DimValidationError::DimensionMismatch { expected, actual });
    }
    Ok(())
}
