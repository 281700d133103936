use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use super::error::QuizError;
use super::query::QuizRequest;
use crate::constants::DEFAULT_SNIPPET_CHARS;
use crate::embedding::Embedder;
use crate::retrieval::passage::render_context;
use crate::retrieval::{PoolTag, RetrievalResult, Retriever};
use crate::store::{ChapterKey, PassageStore};

/// One selected passage, detached from the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextPassage {
    pub id: String,
    pub text: String,
    pub pool: PoolTag,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Cosine similarity to the request query.
    pub score: f32,
}

/// Passages selected for one quiz request, in hand-off order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizContext {
    pub key: ChapterKey,
    pub query: String,
    pub passages: Vec<ContextPassage>,
}

impl QuizContext {
    fn from_result(key: ChapterKey, query: String, result: &RetrievalResult<'_>) -> Self {
        let passages = result
            .scored()
            .iter()
            .map(|entry| ContextPassage {
                id: entry.passage.id.clone(),
                text: entry.passage.text.clone(),
                pool: entry.pool,
                source: entry.passage.source.clone(),
                score: entry.score,
            })
            .collect();

        Self {
            key,
            query,
            passages,
        }
    }

    pub fn ids(&self) -> Vec<&str> {
        self.passages.iter().map(|p| p.id.as_str()).collect()
    }

    /// Renders the context block with snippets cut to `snippet_chars` characters.
    pub fn render(&self, snippet_chars: usize) -> String {
        render_context(
            self.passages.iter().map(|p| (p.id.as_str(), p.text.as_str())),
            snippet_chars,
        )
    }

    /// [`render`](Self::render) with [`DEFAULT_SNIPPET_CHARS`].
    pub fn render_default(&self) -> String {
        self.render(DEFAULT_SNIPPET_CHARS)
    }
}

/// Fetches a chapter's pools and assembles the quiz context from them.
///
/// The query embedding runs on the calling task.
pub struct QuizContextService<S, E> {
    store: S,
    retriever: Retriever<E>,
}

impl<S: PassageStore, E: Embedder> QuizContextService<S, E> {
    pub fn new(store: S, retriever: Retriever<E>) -> Self {
        Self { store, retriever }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn retriever(&self) -> &Retriever<E> {
        &self.retriever
    }

    /// Returns [`QuizError::NoContext`] when nothing could be selected, which is distinct
    /// from store or embedder failures.
    #[instrument(skip_all, fields(chapter = %request.key, num_questions = request.num_questions))]
    pub async fn retrieve_context(&self, request: &QuizRequest) -> Result<QuizContext, QuizError> {
        request.validate()?;

        let (primary, supplementary) = self.store.fetch_pools(&request.key).await?;
        let query = request.query();
        let result = self.retriever.assemble(&primary, &supplementary, &query)?;

        if result.is_empty() {
            return Err(QuizError::NoContext {
                key: request.key.clone(),
            });
        }

        info!(
            selected = result.len(),
            primary = result.primary_count(),
            primary_pool = primary.len(),
            supplementary_pool = supplementary.len(),
            "Retrieved quiz context"
        );

        Ok(QuizContext::from_result(request.key.clone(), query, &result))
    }
}
