use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::{DEFAULT_OVERALL_CAP, DEFAULT_PRIMARY_QUOTA, DEFAULT_SUPPLEMENTARY_QUOTA};
use crate::embedding::Embedder;

use super::error::RetrievalError;
use super::passage::{Passage, PoolTag, RetrievalResult, ScoredPassage};
use super::selector::{has_candidates, select_top_k};

/// Per-pool quotas and the overall context cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Max exam-style passages. Default: `5`.
    pub primary_quota: usize,
    /// Max chapter-content passages. Default: `3`.
    pub supplementary_quota: usize,
    /// Max passages overall. Default: `8`.
    pub overall_cap: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            primary_quota: DEFAULT_PRIMARY_QUOTA,
            supplementary_quota: DEFAULT_SUPPLEMENTARY_QUOTA,
            overall_cap: DEFAULT_OVERALL_CAP,
        }
    }
}

impl RetrievalConfig {
    pub fn new(primary_quota: usize, supplementary_quota: usize, overall_cap: usize) -> Self {
        Self {
            primary_quota,
            supplementary_quota,
            overall_cap,
        }
    }

    pub fn quota(&self, pool: PoolTag) -> usize {
        match pool {
            PoolTag::Primary => self.primary_quota,
            PoolTag::Supplementary => self.supplementary_quota,
        }
    }
}

/// Embedding-based top-k selection and quota-based context assembly.
///
/// Runs synchronously on the calling thread. The only potentially slow step is the
/// query embedding (and, for a lazily loaded model, the first-use load). There is no
/// internal timeout; callers with a deadline bound their own wait.
#[derive(Debug)]
pub struct Retriever<E> {
    embedder: E,
    config: RetrievalConfig,
}

impl<E: Embedder> Retriever<E> {
    pub fn new(embedder: E) -> Self {
        Self::with_config(embedder, RetrievalConfig::default())
    }

    pub fn with_config(embedder: E, config: RetrievalConfig) -> Self {
        Self { embedder, config }
    }

    pub fn config(&self) -> &RetrievalConfig {
        &self.config
    }

    pub fn embedder(&self) -> &E {
        &self.embedder
    }

    pub fn embed_query(&self, query: &str) -> Result<Vec<f32>, RetrievalError> {
        Ok(self.embedder.embed(query)?)
    }

    /// Returns up to `k` passages most similar to `query`, best first.
    ///
    /// The query is embedded once. Nothing is embedded when there is nothing to rank
    /// (`k == 0`, or no passage carries an embedding).
    pub fn top_k<'a>(
        &self,
        passages: &'a [Passage],
        query: &str,
        k: usize,
    ) -> Result<Vec<&'a Passage>, RetrievalError> {
        Ok(self
            .top_k_scored(passages, query, k)?
            .into_iter()
            .map(|s| s.passage)
            .collect())
    }

    /// Like [`top_k`](Self::top_k) but keeps the similarity scores.
    pub fn top_k_scored<'a>(
        &self,
        passages: &'a [Passage],
        query: &str,
        k: usize,
    ) -> Result<Vec<ScoredPassage<'a>>, RetrievalError> {
        if k == 0 || !has_candidates(passages) {
            return Ok(Vec::new());
        }

        let query_vec = self.embed_query(query)?;
        select_top_k(&query_vec, passages, k)
    }

    /// Assembles the quiz context using this retriever's [`RetrievalConfig`].
    pub fn assemble<'a>(
        &self,
        primary: &'a [Passage],
        supplementary: &'a [Passage],
        query: &str,
    ) -> Result<RetrievalResult<'a>, RetrievalError> {
        self.assemble_with(primary, supplementary, query, &self.config)
    }

    /// Takes the top `primary_quota` primary passages, then the top
    /// `supplementary_quota` supplementary passages, and cuts the concatenation to
    /// `overall_cap`.
    ///
    /// The query is embedded at most once per call, and only if some pool has a
    /// passage to rank. Any embedding failure aborts the whole assembly.
    pub fn assemble_with<'a>(
        &self,
        primary: &'a [Passage],
        supplementary: &'a [Passage],
        query: &str,
        config: &RetrievalConfig,
    ) -> Result<RetrievalResult<'a>, RetrievalError> {
        let mut query_vec: Option<Vec<f32>> = None;

        let mut entries = self.pool_contribution(
            primary,
            PoolTag::Primary,
            config.primary_quota,
            query,
            &mut query_vec,
        )?;
        let supplementary_top = self.pool_contribution(
            supplementary,
            PoolTag::Supplementary,
            config.supplementary_quota,
            query,
            &mut query_vec,
        )?;

        entries.extend(supplementary_top);
        entries.truncate(config.overall_cap);

        debug!(
            selected = entries.len(),
            overall_cap = config.overall_cap,
            "Assembled retrieval context"
        );

        Ok(RetrievalResult::from_entries(entries))
    }

    fn pool_contribution<'a>(
        &self,
        pool: &'a [Passage],
        tag: PoolTag,
        quota: usize,
        query: &str,
        query_vec: &mut Option<Vec<f32>>,
    ) -> Result<Vec<ScoredPassage<'a>>, RetrievalError> {
        if quota == 0 || !has_candidates(pool) {
            debug!(pool = %tag, pool_size = pool.len(), quota, "Pool contributes nothing");
            return Ok(Vec::new());
        }

        if query_vec.is_none() {
            *query_vec = Some(self.embed_query(query)?);
        }
        let query_vec = query_vec.as_deref().unwrap_or_default();

        let mut selected = select_top_k(query_vec, pool, quota)?;
        for entry in &mut selected {
            entry.pool = tag;
        }
        debug!(
            pool = %tag,
            pool_size = pool.len(),
            quota,
            selected = selected.len(),
            "Ranked pool"
        );

        Ok(selected)
    }
}
