use std::path::Path;

use tokenizers::{PaddingParams, Tokenizer, TruncationParams};

use super::error::EmbeddingError;

/// Loads `tokenizer.json` with truncation at `max_len` and padding disabled.
///
/// Texts longer than `max_len` word pieces are cut rather than rejected; the embedding
/// then reflects only the leading part of the text.
pub fn load_tokenizer_with_truncation(
    tokenizer_path: &Path,
    max_len: usize,
) -> Result<Tokenizer, EmbeddingError> {
    let mut tokenizer =
        Tokenizer::from_file(tokenizer_path).map_err(|e| EmbeddingError::ModelUnavailable {
            reason: format!(
                "failed to load tokenizer from {}: {}",
                tokenizer_path.display(),
                e
            ),
        })?;

    let truncation = TruncationParams {
        max_length: max_len,
        ..Default::default()
    };

    tokenizer
        .with_truncation(Some(truncation))
        .map_err(|e| EmbeddingError::InvalidConfig {
            reason: format!("failed to configure truncation: {}", e),
        })?;

    // Padding tokens from tokenizer.json would leak into the mean pool.
    tokenizer.with_padding(None::<PaddingParams>);

    Ok(tokenizer)
}
