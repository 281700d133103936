//! Read-only access to passage pools.
//!
//! Passages are grouped per chapter, identified by a [`ChapterKey`], and split into the
//! two pools the retriever ranks independently. Stores never write.

pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod memory;
pub mod qdrant;


pub use error::StoreError;
#[cfg(any(test, feature = "mock"))]
pub use memory::InMemoryPassageStore;
pub use qdrant::{DEFAULT_COLLECTION_NAME, QdrantPassageStore};

use serde::{Deserialize, Serialize};

use crate::retrieval::{Passage, PoolTag};

/// Identifies one chapter's passages: `(class, subject, chapter)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChapterKey {
    pub class_id: String,
    pub subject_id: String,
    pub chapter_id: String,
}

impl ChapterKey {
    pub fn new(
        class_id: impl Into<String>,
        subject_id: impl Into<String>,
        chapter_id: impl Into<String>,
    ) -> Self {
        Self {
            class_id: class_id.into(),
            subject_id: subject_id.into(),
            chapter_id: chapter_id.into(),
        }
    }
}

impl std::fmt::Display for ChapterKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.class_id, self.subject_id, self.chapter_id)
    }
}

/// Source of passage pools.
pub trait PassageStore: Send + Sync {
    /// Fetches every passage of `pool` for `key`, in the store's natural order.
    ///
    /// An unknown chapter is an empty pool, not an error.
    fn fetch_pool(
        &self,
        key: &ChapterKey,
        pool: PoolTag,
    ) -> impl std::future::Future<Output = Result<Vec<Passage>, StoreError>> + Send;

    /// Fetches `(primary, supplementary)` for `key`.
    fn fetch_pools(
        &self,
        key: &ChapterKey,
    ) -> impl std::future::Future<Output = Result<(Vec<Passage>, Vec<Passage>), StoreError>> + Send
    {
        async move {
            let primary = self.fetch_pool(key, PoolTag::Primary).await?;
            let supplementary = self.fetch_pool(key, PoolTag::Supplementary).await?;
            Ok((primary, supplementary))
        }
    }
}
