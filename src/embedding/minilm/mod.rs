//! MiniLM sentence embedder (BERT encoder + mean pooling).
//!
//! Produces the same kind of vector the ingestion side stored alongside each passage:
//! attention-masked mean of the final hidden states, L2-normalised. Use
//! [`MiniLmConfig::stub`] for tests/examples without model files.

/// MiniLM configuration.
pub mod config;

#[cfg(test)]
mod tests;

pub use config::{MINILM_EMBEDDING_DIM, MINILM_MAX_SEQ_LEN, MiniLmConfig, ModelFiles};

use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertModel, Config as BertConfig, DTYPE};
use tokenizers::Tokenizer;
use tracing::{debug, info, warn};

use crate::constants::validate_embedding_dim;
use crate::embedding::Embedder;
use crate::embedding::device::select_device;
use crate::embedding::error::EmbeddingError;
use crate::embedding::utils::load_tokenizer_with_truncation;

enum EmbedderBackend {
    Model {
        model: BertModel,
        tokenizer: Tokenizer,
        device: Device,
        hidden_size: usize,
    },
    Stub,
}

/// Sentence embedder backed by a BERT-family checkpoint (supports stub mode).
///
/// Inference takes `&self`; the encoder holds no per-call state, so one instance can
/// serve concurrent callers.
pub struct MiniLmEmbedder {
    backend: EmbedderBackend,
    config: MiniLmConfig,
}

impl std::fmt::Debug for MiniLmEmbedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MiniLmEmbedder")
            .field(
                "backend",
                &match &self.backend {
                    EmbedderBackend::Model { device, .. } => format!("Model({:?})", device),
                    EmbedderBackend::Stub => "Stub".to_string(),
                },
            )
            .field("embedding_dim", &self.embedding_dim())
            .field("max_seq_len", &self.config.max_seq_len)
            .finish()
    }
}

impl MiniLmEmbedder {
    /// Loads the embedder. This is the slow step: it may download weights and
    /// always materialises the full encoder on the selected device.
    pub fn load(config: MiniLmConfig) -> Result<Self, EmbeddingError> {
        config.validate()?;

        if config.testing_stub {
            warn!("MiniLM embedder running in STUB mode (testing only)");
            return Ok(Self {
                backend: EmbedderBackend::Stub,
                config,
            });
        }

        let files = config.resolve_files()?;
        let device = select_device();
        debug!(?device, "Selected compute device for MiniLM");

        info!(
            model_id = %config.model_id,
            config_path = %files.config.display(),
            "Loading sentence-embedding model"
        );

        let (model, hidden_size) = Self::load_model(&files, &device)?;
        let tokenizer = load_tokenizer_with_truncation(&files.tokenizer, config.max_seq_len)?;

        if let Err(e) = validate_embedding_dim(hidden_size, config.embedding_dim) {
            warn!(error = %e, "Model hidden size differs from configured embedding_dim; using model size");
        }

        info!(
            hidden_size,
            max_seq_len = config.max_seq_len,
            "Sentence-embedding model loaded"
        );

        Ok(Self {
            backend: EmbedderBackend::Model {
                model,
                tokenizer,
                device,
                hidden_size,
            },
            config,
        })
    }

    fn load_model(files: &ModelFiles, device: &Device) -> Result<(BertModel, usize), EmbeddingError> {
        let raw = std::fs::read_to_string(&files.config)?;
        let bert_config: BertConfig =
            serde_json::from_str(&raw).map_err(|e| EmbeddingError::ModelUnavailable {
                reason: format!("failed to parse {}: {}", files.config.display(), e),
            })?;

        // SAFETY: the weights file is opened read-only and is not modified while mapped.
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(std::slice::from_ref(&files.weights), DTYPE, device)
        }
        .map_err(|e| EmbeddingError::ModelUnavailable {
            reason: format!("failed to map weights {}: {}", files.weights.display(), e),
        })?;

        let model = BertModel::load(vb, &bert_config).map_err(|e| {
            EmbeddingError::ModelUnavailable {
                reason: format!("failed to build BERT encoder: {}", e),
            }
        })?;

        Ok((model, bert_config.hidden_size))
    }

    fn embed_with_model(
        &self,
        text: &str,
        model: &BertModel,
        tokenizer: &Tokenizer,
        device: &Device,
        hidden_size: usize,
    ) -> Result<Vec<f32>, EmbeddingError> {
        let encoding =
            tokenizer
                .encode(text, true)
                .map_err(|e| EmbeddingError::TokenizationFailed {
                    reason: e.to_string(),
                })?;

        let ids = encoding.get_ids();
        if ids.is_empty() {
            return Ok(vec![0.0; hidden_size]);
        }

        debug!(
            text_len = text.len(),
            token_count = ids.len(),
            "Generating embedding"
        );

        // [1, seq_len]
        let input_ids = Tensor::new(ids, device)?.unsqueeze(0)?;
        let token_type_ids = input_ids.zeros_like()?;
        let attention_mask = Tensor::new(encoding.get_attention_mask(), device)?.unsqueeze(0)?;

        // [1, seq_len, hidden]
        let hidden = model.forward(&input_ids, &token_type_ids, Some(&attention_mask))?;

        let mask = attention_mask.to_dtype(DType::F32)?.unsqueeze(2)?;
        let summed = hidden.broadcast_mul(&mask)?.sum(1)?;
        let counts = mask.sum(1)?.clamp(1e-9f64, f64::MAX)?;
        let pooled = summed.broadcast_div(&counts)?.squeeze(0)?.to_vec1::<f32>()?;

        Ok(normalize_l2(pooled))
    }

    /// Hash-seeded unit vector; stable across runs and builds for a given text.
    fn embed_stub(&self, text: &str) -> Vec<f32> {
        // FNV-1a
        let mut state = text.bytes().fold(0xcbf29ce484222325u64, |hash, byte| {
            (hash ^ byte as u64).wrapping_mul(0x100000001b3)
        });

        let embedding = (0..self.config.embedding_dim)
            .map(|_| {
                state = state
                    .wrapping_mul(6364136223846793005)
                    .wrapping_add(1442695040888963407);
                ((state >> 40) as f32 / (1u64 << 24) as f32) * 2.0 - 1.0
            })
            .collect();

        normalize_l2(embedding)
    }

    /// Returns `true` if running in stub mode.
    pub fn is_stub(&self) -> bool {
        matches!(self.backend, EmbedderBackend::Stub)
    }

    /// Returns the embedder configuration.
    pub fn config(&self) -> &MiniLmConfig {
        &self.config
    }
}

impl Embedder for MiniLmEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        match &self.backend {
            EmbedderBackend::Model {
                model,
                tokenizer,
                device,
                hidden_size,
            } => self.embed_with_model(text, model, tokenizer, device, *hidden_size),
            EmbedderBackend::Stub => Ok(self.embed_stub(text)),
        }
    }

    fn embedding_dim(&self) -> usize {
        match &self.backend {
            EmbedderBackend::Model { hidden_size, .. } => *hidden_size,
            EmbedderBackend::Stub => self.config.embedding_dim,
        }
    }
}

fn normalize_l2(mut embedding: Vec<f32>) -> Vec<f32> {
    let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm > 0.0 {
        for x in &mut embedding {
            *x /= norm;
        }
    }

    embedding
}
