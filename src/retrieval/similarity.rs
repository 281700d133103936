use super::error::RetrievalError;

/// Cosine similarity of two vectors, in `[-1, 1]`.
///
/// Returns `Ok(0.0)` when either vector is empty or has zero magnitude, so a useless
/// vector ranks below any genuinely similar one instead of failing the call.
/// Non-empty vectors of different lengths are a model mix-up upstream and fail with
/// [`RetrievalError::DimensionMismatch`].
#[inline]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32, RetrievalError> {
    if a.is_empty() || b.is_empty() {
        return Ok(0.0);
    }

    if a.len() != b.len() {
        return Err(RetrievalError::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }

    let (dot, norm_a_sq, norm_b_sq) = a
        .iter()
        .zip(b)
        .fold((0.0f32, 0.0f32, 0.0f32), |(dot, na, nb), (&av, &bv)| {
            (dot + av * bv, na + av * av, nb + bv * bv)
        });

    let norm_a = norm_a_sq.sqrt();
    let norm_b = norm_b_sq.sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        Ok(0.0)
    } else {
        Ok(dot / (norm_a * norm_b))
    }
}
