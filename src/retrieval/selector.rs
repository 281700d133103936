use tracing::{debug, warn};

use super::error::RetrievalError;
use super::passage::{Passage, ScoredPassage};
use super::similarity::cosine_similarity;

/// Ranks `passages` against an already-embedded query and keeps the best `k`.
///
/// Passages without an embedding (or with an empty one) are skipped entirely. Scores are sorted descending
/// with a stable sort, so equal scores keep their input order. A passage whose
/// vector length disagrees with the query fails the whole call.
pub fn select_top_k<'a>(
    query: &[f32],
    passages: &'a [Passage],
    k: usize,
) -> Result<Vec<ScoredPassage<'a>>, RetrievalError> {
    if k == 0 || passages.is_empty() {
        return Ok(Vec::new());
    }

    let mut skipped = 0usize;
    let mut scored = Vec::with_capacity(passages.len());

    for passage in passages {
        let Some(embedding) = passage.embedding.as_deref().filter(|e| !e.is_empty()) else {
            skipped += 1;
            continue;
        };

        let score = cosine_similarity(query, embedding).inspect_err(|_| {
            warn!(
                passage_id = %passage.id,
                query_dim = query.len(),
                passage_dim = embedding.len(),
                "Passage embedding dimension does not match query"
            );
        })?;

        scored.push(ScoredPassage {
            passage,
            score,
            pool: passage.pool,
        });
    }

    if skipped > 0 {
        debug!(skipped, "Skipped passages without embeddings");
    }

    scored.sort_by(|a, b| rank_key(b.score).total_cmp(&rank_key(a.score)));
    scored.truncate(k);

    Ok(scored)
}

/// Sort key: NaN ranks last and `-0.0` ties with `0.0`.
#[inline]
fn rank_key(score: f32) -> f32 {
    if score.is_nan() {
        f32::NEG_INFINITY
    } else {
        score + 0.0
    }
}

/// Returns `true` if at least one passage could be scored.
pub(crate) fn has_candidates(passages: &[Passage]) -> bool {
    passages.iter().any(Passage::is_embedded)
}
