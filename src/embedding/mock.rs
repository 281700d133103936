//! Deterministic embedders for tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use super::Embedder;
use super::error::EmbeddingError;

/// Returns the same vector for every text and counts calls.
#[derive(Debug)]
pub struct FixedEmbedder {
    vector: Vec<f32>,
    calls: AtomicUsize,
}

impl FixedEmbedder {
    pub fn new(vector: Vec<f32>) -> Self {
        Self {
            vector,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of `embed` calls observed so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Embedder for FixedEmbedder {
    fn embed(&self, _text: &str) -> Result<Vec<f32>, EmbeddingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.vector.clone())
    }

    fn embedding_dim(&self) -> usize {
        self.vector.len()
    }
}

/// Always fails as if the model could not be loaded; counts calls.
#[derive(Debug, Default)]
pub struct UnavailableEmbedder {
    calls: AtomicUsize,
}

impl UnavailableEmbedder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Embedder for UnavailableEmbedder {
    fn embed(&self, _text: &str) -> Result<Vec<f32>, EmbeddingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(EmbeddingError::ModelUnavailable {
            reason: "mock embedder has no model".to_string(),
        })
    }

    fn embedding_dim(&self) -> usize {
        crate::constants::DEFAULT_EMBEDDING_DIM
    }
}

/// Maps text to a vector by keyword: the first entry whose keyword occurs in the text
/// wins, otherwise `fallback`. Counts calls.
#[derive(Debug)]
pub struct KeywordEmbedder {
    table: Vec<(String, Vec<f32>)>,
    fallback: Vec<f32>,
    calls: AtomicUsize,
}

impl KeywordEmbedder {
    pub fn new(fallback: Vec<f32>) -> Self {
        Self {
            table: Vec::new(),
            fallback,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_keyword(mut self, keyword: impl Into<String>, vector: Vec<f32>) -> Self {
        self.table.push((keyword.into(), vector));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Embedder for KeywordEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let vector = self
            .table
            .iter()
            .find(|(keyword, _)| text.contains(keyword.as_str()))
            .map_or(&self.fallback, |(_, vector)| vector);
        Ok(vector.clone())
    }

    fn embedding_dim(&self) -> usize {
        self.fallback.len()
    }
}
