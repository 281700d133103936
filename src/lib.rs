//! Retrieval core for grounded multiple-choice quiz generation.
//!
//! A chapter's passages live in two pools: exam-style questions (primary) and general
//! chapter content (supplementary). For each quiz request the pools are ranked by
//! cosine similarity to an embedded query, a fixed quota is taken from each, and the
//! result is capped and handed to question generation.
//!
//! ## Modules
//! - [`embedding`] - [`Embedder`] trait, the MiniLM sentence encoder, lazy loading
//! - [`retrieval`] - similarity, top-k selection, quota-based context assembly
//! - [`store`] - passage pools in Qdrant (and in memory for tests)
//! - [`quiz`] - quiz requests, the context service, answer grading
//! - [`config`] - `QUIZRAG_*` environment configuration
//!
//! ## Test/Mock Support
//! Mock implementations are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod config;
pub mod constants;
pub mod embedding;
pub mod quiz;
pub mod retrieval;
pub mod store;

pub use config::{Config, ConfigError};
pub use constants::{DimValidationError, validate_embedding_dim};
pub use embedding::{Embedder, EmbeddingError, LazyEmbedder, MiniLmConfig, MiniLmEmbedder};
#[cfg(any(test, feature = "mock"))]
pub use embedding::{FixedEmbedder, KeywordEmbedder, UnavailableEmbedder};
pub use quiz::{
    GradeReport, GradingError, Question, QuizContext, QuizContextService, QuizError, QuizRequest,
    grade,
};
pub use retrieval::{
    Passage, PoolTag, RetrievalConfig, RetrievalError, RetrievalResult, Retriever,
    ScoredPassage, cosine_similarity, select_top_k,
};
#[cfg(any(test, feature = "mock"))]
pub use store::InMemoryPassageStore;
pub use store::{ChapterKey, PassageStore, QdrantPassageStore, StoreError};
