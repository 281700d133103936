//! Text embedding.
//!
//! - [`Embedder`] is the seam the retrieval core depends on; inject any implementation.
//! - [`minilm`] provides the sentence-transformer encoder used in production.
//! - [`LazyEmbedder`] defers the model load to first use and shares it afterwards.

/// Device selection (CPU / Metal / CUDA).
pub mod device;
mod error;
mod lazy;
/// MiniLM sentence embedder.
pub mod minilm;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
/// Tokenizer loading helpers.
pub mod utils;

use std::sync::Arc;

pub use error::EmbeddingError;
pub use lazy::LazyEmbedder;
pub use minilm::{MINILM_EMBEDDING_DIM, MINILM_MAX_SEQ_LEN, MiniLmConfig, MiniLmEmbedder};
#[cfg(any(test, feature = "mock"))]
pub use mock::{FixedEmbedder, KeywordEmbedder, UnavailableEmbedder};

/// Converts text into a fixed-length vector.
///
/// Implementations must be deterministic for a fixed model: the same text yields the
/// same vector (bit-exactness across hardware is not required). Any text length must
/// be accepted; implementations may truncate internally.
pub trait Embedder: Send + Sync {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    /// Length of the vectors returned by [`embed`](Embedder::embed).
    fn embedding_dim(&self) -> usize;
}

impl<T: Embedder + ?Sized> Embedder for &T {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        (**self).embed(text)
    }

    fn embedding_dim(&self) -> usize {
        (**self).embedding_dim()
    }
}

impl<T: Embedder + ?Sized> Embedder for Arc<T> {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        (**self).embed(text)
    }

    fn embedding_dim(&self) -> usize {
        (**self).embedding_dim()
    }
}
