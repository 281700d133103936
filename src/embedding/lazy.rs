//! Load-once embedder handle.
//!
//! Loading the encoder is the only expensive, blocking step in retrieval. [`LazyEmbedder`]
//! defers it to the first `embed` call and then keeps the model for the life of the
//! handle:
//!
//! - concurrent first callers block on the cell's internal lock; exactly one of them
//!   runs [`MiniLmEmbedder::load`], the rest observe its result;
//! - a failed load is returned to the caller that triggered it and leaves the cell
//!   empty, so a later call tries again;
//! - once loaded, `embed` is lock-free (`&self` inference).
//!
//! [`LazyEmbedder::global`] provides the process-wide instance used by the binary. It
//! is never torn down explicitly; the model is released when the process exits.

use once_cell::sync::OnceCell;
use tracing::info;

use super::Embedder;
use super::error::EmbeddingError;
use super::minilm::{MiniLmConfig, MiniLmEmbedder};

static GLOBAL_EMBEDDER: OnceCell<LazyEmbedder> = OnceCell::new();

pub struct LazyEmbedder {
    config: MiniLmConfig,
    cell: OnceCell<MiniLmEmbedder>,
}

impl std::fmt::Debug for LazyEmbedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LazyEmbedder")
            .field("model_id", &self.config.model_id)
            .field("model_dir", &self.config.model_dir)
            .field("loaded", &self.is_loaded())
            .finish()
    }
}

impl LazyEmbedder {
    /// Creates an unloaded handle. Nothing is read or downloaded until first use.
    pub fn new(config: MiniLmConfig) -> Self {
        Self {
            config,
            cell: OnceCell::new(),
        }
    }

    /// Returns the process-wide handle, creating it from `config` on the first call.
    ///
    /// Later calls ignore their `config` argument and return the existing handle.
    pub fn global(config: &MiniLmConfig) -> &'static LazyEmbedder {
        GLOBAL_EMBEDDER.get_or_init(|| LazyEmbedder::new(config.clone()))
    }

    /// Returns the loaded embedder, loading it if this is the first use.
    pub fn get(&self) -> Result<&MiniLmEmbedder, EmbeddingError> {
        self.cell.get_or_try_init(|| {
            info!(model_id = %self.config.model_id, "First embedding request, loading model");
            MiniLmEmbedder::load(self.config.clone())
        })
    }

    /// Forces the model load now (e.g. at startup) instead of on the first query.
    pub fn warm_up(&self) -> Result<(), EmbeddingError> {
        self.get().map(|_| ())
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }

    pub fn config(&self) -> &MiniLmConfig {
        &self.config
    }
}

impl Embedder for LazyEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        self.get()?.embed(text)
    }

    /// Reports the configured dimension until the model is loaded, then the model's.
    fn embedding_dim(&self) -> usize {
        self.cell
            .get()
            .map(|embedder| embedder.embedding_dim())
            .unwrap_or(self.config.embedding_dim)
    }
}
