use serde::{Deserialize, Serialize};

/// Which candidate pool a passage was drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoolTag {
    /// Exam-style passages (past-paper questions).
    Primary,
    /// General chapter content.
    Supplementary,
}

impl PoolTag {
    /// Label used in stored records (`"pyq"` / `"chapter"`).
    pub fn store_label(self) -> &'static str {
        match self {
            PoolTag::Primary => "pyq",
            PoolTag::Supplementary => "chapter",
        }
    }

    pub fn from_store_label(label: &str) -> Option<Self> {
        match label {
            "pyq" => Some(PoolTag::Primary),
            "chapter" => Some(PoolTag::Supplementary),
            _ => None,
        }
    }
}

impl std::fmt::Display for PoolTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.store_label())
    }
}

/// A candidate text passage with its precomputed embedding.
///
/// `embedding: None` means ingestion never produced a vector; such passages are kept
/// in the pool but can never be retrieved. An empty vector is treated the same way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Passage {
    pub id: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub embedding: Option<Vec<f32>>,
    pub pool: PoolTag,
    /// Provenance label (e.g. the past paper a question came from).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl Passage {
    pub fn new(id: impl Into<String>, text: impl Into<String>, pool: PoolTag) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            embedding: None,
            pool,
            source: None,
        }
    }

    pub fn with_embedding(mut self, embedding: Vec<f32>) -> Self {
        self.embedding = Some(embedding);
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Returns `true` if the passage can take part in ranking.
    pub fn is_embedded(&self) -> bool {
        self.embedding.as_deref().is_some_and(|e| !e.is_empty())
    }
}

/// A passage paired with its cosine similarity to the query. Lives for one call.
///
/// `pool` is the pool the passage was selected from, which can differ from
/// `passage.pool` when a caller mixes tags within a slice.
#[derive(Debug, Clone, Copy)]
pub struct ScoredPassage<'a> {
    pub passage: &'a Passage,
    pub score: f32,
    pub pool: PoolTag,
}

/// Ordered passages selected for the generation step.
///
/// Primary-pool selections always precede supplementary ones. Passages are borrowed
/// from the caller's pools; use [`into_owned`](RetrievalResult::into_owned) to detach.
#[derive(Debug, Clone, Default)]
pub struct RetrievalResult<'a> {
    entries: Vec<ScoredPassage<'a>>,
}

impl<'a> RetrievalResult<'a> {
    pub(crate) fn from_entries(entries: Vec<ScoredPassage<'a>>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Selected passages in hand-off order.
    pub fn passages(&self) -> impl Iterator<Item = &'a Passage> + '_ {
        self.entries.iter().map(|entry| entry.passage)
    }

    /// Selected passages with their scores, in hand-off order.
    pub fn scored(&self) -> &[ScoredPassage<'a>] {
        &self.entries
    }

    pub fn ids(&self) -> Vec<&'a str> {
        self.entries.iter().map(|e| e.passage.id.as_str()).collect()
    }

    /// Number of entries that came from the primary pool.
    pub fn primary_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.pool == PoolTag::Primary)
            .count()
    }

    pub fn into_owned(self) -> Vec<Passage> {
        self.entries.into_iter().map(|e| e.passage.clone()).collect()
    }

    /// Renders the context block handed to the generation step.
    ///
    /// Each passage becomes `SOURCE: <id>:\n<text>` with the text cut to `snippet_chars`
    /// characters; blocks are separated by `\n\n---\n\n`.
    pub fn render_context(&self, snippet_chars: usize) -> String {
        render_context(
            self.passages().map(|p| (p.id.as_str(), p.text.as_str())),
            snippet_chars,
        )
    }
}

pub(crate) fn render_context<'p>(
    passages: impl Iterator<Item = (&'p str, &'p str)>,
    snippet_chars: usize,
) -> String {
    passages
        .map(|(id, text)| {
            let snippet: String = text.chars().take(snippet_chars).collect();
            format!("SOURCE: {id}:\n{snippet}")
        })
        .collect::<Vec<_>>()
        .join("\n\n---\n\n")
}
