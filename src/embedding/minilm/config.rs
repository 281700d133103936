use std::path::PathBuf;

use crate::embedding::error::EmbeddingError;

/// Default MiniLM embedding dimension.
pub const MINILM_EMBEDDING_DIM: usize = crate::constants::DEFAULT_EMBEDDING_DIM;

/// Default MiniLM max sequence length (word pieces).
pub const MINILM_MAX_SEQ_LEN: usize = crate::constants::DEFAULT_MAX_SEQ_LEN;

pub(crate) const CONFIG_FILE: &str = "config.json";
pub(crate) const TOKENIZER_FILE: &str = "tokenizer.json";
pub(crate) const WEIGHTS_FILE: &str = "model.safetensors";

#[derive(Debug, Clone)]
/// Configuration for [`MiniLmEmbedder`](super::MiniLmEmbedder).
pub struct MiniLmConfig {
    /// Local directory holding `config.json`, `tokenizer.json` and `model.safetensors`.
    /// When `None`, the files are fetched from the Hugging Face hub.
    pub model_dir: Option<PathBuf>,
    /// Hub model id used when `model_dir` is `None`.
    pub model_id: String,
    /// Max word pieces per text.
    pub max_seq_len: usize,
    /// Output dimension in stub mode; a loaded model reports its own hidden size.
    pub embedding_dim: usize,
    /// If true, run in deterministic stub mode (no model files required).
    pub testing_stub: bool,
}

impl Default for MiniLmConfig {
    fn default() -> Self {
        Self {
            model_dir: None,
            model_id: crate::constants::DEFAULT_MODEL_ID.to_string(),
            max_seq_len: MINILM_MAX_SEQ_LEN,
            embedding_dim: MINILM_EMBEDDING_DIM,
            testing_stub: false,
        }
    }
}

/// Resolved on-disk locations of the three model files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelFiles {
    pub config: PathBuf,
    pub tokenizer: PathBuf,
    pub weights: PathBuf,
}

impl MiniLmConfig {
    /// Creates a config for a local model directory.
    pub fn new<P: Into<PathBuf>>(model_dir: P) -> Self {
        Self {
            model_dir: Some(model_dir.into()),
            ..Default::default()
        }
    }

    /// Creates a config that downloads `model_id` from the hub on first load.
    pub fn from_hub(model_id: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
            ..Default::default()
        }
    }

    /// Creates a stub config (no model files; produces deterministic embeddings).
    pub fn stub() -> Self {
        Self {
            testing_stub: true,
            ..Default::default()
        }
    }

    pub fn with_max_seq_len(mut self, max_seq_len: usize) -> Self {
        self.max_seq_len = max_seq_len;
        self
    }

    pub fn with_embedding_dim(mut self, embedding_dim: usize) -> Self {
        self.embedding_dim = embedding_dim;
        self
    }

    /// Validates basic invariants without touching the network.
    pub fn validate(&self) -> Result<(), EmbeddingError> {
        if self.max_seq_len == 0 {
            return Err(EmbeddingError::InvalidConfig {
                reason: "max_seq_len must be greater than zero".to_string(),
            });
        }

        if self.testing_stub {
            if self.embedding_dim == 0 {
                return Err(EmbeddingError::InvalidConfig {
                    reason: "embedding_dim must be greater than zero".to_string(),
                });
            }
            return Ok(());
        }

        match &self.model_dir {
            Some(dir) if !dir.is_dir() => Err(EmbeddingError::ModelNotFound { path: dir.clone() }),
            Some(_) => Ok(()),
            None if self.model_id.trim().is_empty() => Err(EmbeddingError::InvalidConfig {
                reason: "model_id is required when no model_dir is configured".to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Returns the model files, downloading them from the hub if no local directory is set.
    pub fn resolve_files(&self) -> Result<ModelFiles, EmbeddingError> {
        if let Some(dir) = &self.model_dir {
            let files = ModelFiles {
                config: dir.join(CONFIG_FILE),
                tokenizer: dir.join(TOKENIZER_FILE),
                weights: dir.join(WEIGHTS_FILE),
            };
            for path in [&files.config, &files.tokenizer, &files.weights] {
                if !path.is_file() {
                    return Err(EmbeddingError::ModelNotFound { path: path.clone() });
                }
            }
            return Ok(files);
        }

        let api = hf_hub::api::sync::Api::new().map_err(|e| EmbeddingError::ModelUnavailable {
            reason: format!("failed to create hub client: {}", e),
        })?;
        let repo = api.model(self.model_id.clone());

        let fetch = |file: &str| {
            repo.get(file)
                .map_err(|e| EmbeddingError::ModelUnavailable {
                    reason: format!("failed to fetch {} from {}: {}", file, self.model_id, e),
                })
        };

        Ok(ModelFiles {
            config: fetch(CONFIG_FILE)?,
            tokenizer: fetch(TOKENIZER_FILE)?,
            weights: fetch(WEIGHTS_FILE)?,
        })
    }
}
