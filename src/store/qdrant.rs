use qdrant_client::Qdrant;
use qdrant_client::qdrant::point_id::PointIdOptions;
use qdrant_client::qdrant::vectors_output::VectorsOptions;
use qdrant_client::qdrant::{Condition, Filter, PointId, RetrievedPoint, ScrollPointsBuilder};
use tracing::debug;

use super::error::StoreError;
use super::{ChapterKey, PassageStore};
use crate::retrieval::{Passage, PoolTag};

pub const DEFAULT_COLLECTION_NAME: &str = "quiz_passages";

/// Points fetched per scroll request.
pub const SCROLL_PAGE_SIZE: u32 = 256;

/// Payload field names written by the ingestion side.
pub mod fields {
    pub const CLASS_ID: &str = "class_id";
    pub const SUBJECT_ID: &str = "subject_id";
    pub const CHAPTER_ID: &str = "chapter_id";
    pub const POOL: &str = "pool";
    pub const TEXT: &str = "text";
    pub const SOURCE: &str = "source";
}

#[derive(Clone)]
/// Passage pools stored as points in a single Qdrant collection.
///
/// Every point carries its chapter key and pool label (`"pyq"` / `"chapter"`) in the
/// payload, plus `text` and an optional `source`. The point's unnamed dense vector is
/// the passage embedding; points stored without one come back unembedded.
pub struct QdrantPassageStore {
    client: Qdrant,
    url: String,
    collection: String,
}

impl QdrantPassageStore {
    /// Creates a store reading `collection` at `url`.
    pub fn new(url: &str, collection: impl Into<String>) -> Result<Self, StoreError> {
        let client = Qdrant::from_url(url)
            .build()
            .map_err(|e| StoreError::ConnectionFailed {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            url: url.to_string(),
            collection: collection.into(),
        })
    }

    /// Returns the configured URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Performs a basic health check request.
    pub async fn health_check(&self) -> Result<(), StoreError> {
        self.client
            .health_check()
            .await
            .map_err(|e| StoreError::ConnectionFailed {
                url: self.url.clone(),
                message: e.to_string(),
            })?;
        Ok(())
    }

    async fn scroll_pool(
        &self,
        key: &ChapterKey,
        pool: PoolTag,
    ) -> Result<Vec<Passage>, StoreError> {
        let filter = pool_filter(key, pool);
        let mut passages = Vec::new();
        let mut offset: Option<PointId> = None;

        loop {
            let mut request = ScrollPointsBuilder::new(self.collection.as_str())
                .filter(filter.clone())
                .limit(SCROLL_PAGE_SIZE)
                .with_payload(true)
                .with_vectors(true);
            if let Some(next) = offset.take() {
                request = request.offset(next);
            }

            let response =
                self.client
                    .scroll(request)
                    .await
                    .map_err(|e| StoreError::FetchFailed {
                        key: key.to_string(),
                        pool: pool.to_string(),
                        message: e.to_string(),
                    })?;

            for point in response.result {
                passages.push(passage_from_point(point, pool, &self.collection)?);
            }

            match response.next_page_offset {
                Some(next) => offset = Some(next),
                None => break,
            }
        }

        Ok(passages)
    }
}

impl PassageStore for QdrantPassageStore {
    async fn fetch_pool(&self, key: &ChapterKey, pool: PoolTag) -> Result<Vec<Passage>, StoreError> {
        let passages = self.scroll_pool(key, pool).await?;

        debug!(
            chapter = %key,
            pool = %pool,
            fetched = passages.len(),
            embedded = passages.iter().filter(|p| p.is_embedded()).count(),
            "Fetched passage pool"
        );

        Ok(passages)
    }
}

/// Payload filter selecting one chapter's pool.
pub fn pool_filter(key: &ChapterKey, pool: PoolTag) -> Filter {
    Filter::must([
        Condition::matches(fields::CLASS_ID, key.class_id.clone()),
        Condition::matches(fields::SUBJECT_ID, key.subject_id.clone()),
        Condition::matches(fields::CHAPTER_ID, key.chapter_id.clone()),
        Condition::matches(fields::POOL, pool.store_label().to_string()),
    ])
}

/// Converts a scrolled point into a passage. Missing `text` becomes `""`.
pub fn passage_from_point(
    point: RetrievedPoint,
    pool: PoolTag,
    collection: &str,
) -> Result<Passage, StoreError> {
    let id = match point.id.and_then(|pid| pid.point_id_options) {
        Some(PointIdOptions::Num(n)) => n.to_string(),
        Some(PointIdOptions::Uuid(uuid)) => uuid,
        None => {
            return Err(StoreError::MalformedRecord {
                collection: collection.to_string(),
                reason: "point has no id".to_string(),
            });
        }
    };

    let payload = point.payload;

    let text = payload
        .get(fields::TEXT)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .unwrap_or_default();

    let source = payload
        .get(fields::SOURCE)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string());

    #[allow(deprecated)]
    let embedding = point
        .vectors
        .and_then(|v| v.vectors_options)
        .and_then(|options| match options {
            VectorsOptions::Vector(vector) => Some(vector.data),
            _ => None,
        })
        .filter(|data| !data.is_empty());

    Ok(Passage {
        id,
        text,
        embedding,
        pool,
        source,
    })
}
