use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::RwLock;

use super::error::StoreError;
use super::{ChapterKey, PassageStore};
use crate::retrieval::{Passage, PoolTag};

/// In-memory passage pools for tests. Insertion order is fetch order.
#[derive(Default)]
pub struct InMemoryPassageStore {
    pools: RwLock<HashMap<(ChapterKey, PoolTag), Vec<Passage>>>,
    fetches: AtomicUsize,
}

impl InMemoryPassageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `passage` to its pool (taken from `passage.pool`) under `key`.
    pub fn insert(&self, key: &ChapterKey, passage: Passage) {
        self.pools
            .write()
            .entry((key.clone(), passage.pool))
            .or_default()
            .push(passage);
    }

    pub fn extend(&self, key: &ChapterKey, passages: impl IntoIterator<Item = Passage>) {
        for passage in passages {
            self.insert(key, passage);
        }
    }

    pub fn pool_len(&self, key: &ChapterKey, pool: PoolTag) -> usize {
        self.pools
            .read()
            .get(&(key.clone(), pool))
            .map_or(0, Vec::len)
    }

    /// Number of `fetch_pool` calls served.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl PassageStore for InMemoryPassageStore {
    async fn fetch_pool(&self, key: &ChapterKey, pool: PoolTag) -> Result<Vec<Passage>, StoreError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .pools
            .read()
            .get(&(key.clone(), pool))
            .cloned()
            .unwrap_or_default())
    }
}
