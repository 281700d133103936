//! Test fixtures for integration tests.

use quizrag::retrieval::{Passage, PoolTag};
use quizrag::store::{ChapterKey, InMemoryPassageStore};

pub const CLASS_ID: &str = "class 8";
pub const SUBJECT_ID: &str = "science";
pub const CHAPTER_ID: &str = "chapter4";

/// Query vector the `at_score` embeddings are measured against.
pub const QUERY_VECTOR: [f32; 2] = [1.0, 0.0];

pub fn chapter_key() -> ChapterKey {
    ChapterKey::new(CLASS_ID, SUBJECT_ID, CHAPTER_ID)
}

/// Unit vector whose cosine with [`QUERY_VECTOR`] is `score`.
pub fn at_score(score: f32) -> Vec<f32> {
    vec![score, (1.0 - score * score).max(0.0).sqrt()]
}

pub struct PassageBuilder {
    id: String,
    text: Option<String>,
    pool: PoolTag,
    embedding: Option<Vec<f32>>,
    source: Option<String>,
}

impl PassageBuilder {
    pub fn primary(id: &str) -> Self {
        Self::new(id, PoolTag::Primary)
    }

    pub fn supplementary(id: &str) -> Self {
        Self::new(id, PoolTag::Supplementary)
    }

    fn new(id: &str, pool: PoolTag) -> Self {
        Self {
            id: id.to_string(),
            text: None,
            pool,
            embedding: None,
            source: None,
        }
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = Some(text.to_string());
        self
    }

    pub fn embedding(mut self, embedding: Vec<f32>) -> Self {
        self.embedding = Some(embedding);
        self
    }

    pub fn scored(self, score: f32) -> Self {
        self.embedding(at_score(score))
    }

    pub fn source(mut self, source: &str) -> Self {
        self.source = Some(source.to_string());
        self
    }

    pub fn build(self) -> Passage {
        let text = self
            .text
            .unwrap_or_else(|| format!("passage {} text", self.id));
        Passage {
            id: self.id,
            text,
            embedding: self.embedding,
            pool: self.pool,
            source: self.source,
        }
    }
}

/// `prefix0, prefix1, ...` passages scored as given, in input order.
pub fn scored_pool(pool: PoolTag, prefix: &str, scores: &[f32]) -> Vec<Passage> {
    scores
        .iter()
        .enumerate()
        .map(|(i, &score)| {
            PassageBuilder::new(&format!("{prefix}{i}"), pool)
                .scored(score)
                .build()
        })
        .collect()
}

pub fn store_with(passages: impl IntoIterator<Item = Passage>) -> InMemoryPassageStore {
    let store = InMemoryPassageStore::new();
    store.extend(&chapter_key(), passages);
    store
}

/// A small chapter on metals and non-metals, embedded for [`QUERY_VECTOR`].
pub fn metals_chapter() -> Vec<Passage> {
    vec![
        PassageBuilder::primary("pyq-2019-3")
            .text("Which of the following metals is stored in kerosene? (a) Sodium (b) Iron")
            .scored(0.82)
            .source("pyq2019")
            .build(),
        PassageBuilder::primary("pyq-2021-7")
            .text("Name the non-metal that is a good conductor of electricity.")
            .scored(0.91)
            .source("pyq2021")
            .build(),
        PassageBuilder::primary("pyq-2022-1")
            .text("Give one use of aluminium foil.")
            .source("pyq2022")
            .build(),
        PassageBuilder::supplementary("ch4-p12")
            .text("Metals are lustrous, malleable and ductile, and good conductors of heat.")
            .scored(0.77)
            .build(),
        PassageBuilder::supplementary("ch4-p30")
            .text("Non-metals such as sulphur are brittle and non-lustrous.")
            .scored(0.35)
            .build(),
    ]
}
