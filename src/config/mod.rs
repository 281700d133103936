//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `QUIZRAG_*` environment variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::path::PathBuf;

use crate::constants::{
    DEFAULT_MODEL_ID, DEFAULT_OVERALL_CAP, DEFAULT_PRIMARY_QUOTA, DEFAULT_SUPPLEMENTARY_QUOTA,
};
use crate::embedding::MiniLmConfig;
use crate::retrieval::RetrievalConfig;
use crate::store::DEFAULT_COLLECTION_NAME;

/// Runtime configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `QUIZRAG_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Local model directory (config.json, tokenizer.json, model.safetensors).
    /// When unset the model is fetched from the hub by [`model_id`](Self::model_id).
    pub model_path: Option<PathBuf>,

    /// Hub model id. Default: `sentence-transformers/all-MiniLM-L6-v2`.
    pub model_id: String,

    /// Run the deterministic stub embedder instead of a model. Default: `false`.
    pub embedder_stub: bool,

    /// Qdrant endpoint URL. Default: `http://localhost:6334`.
    pub qdrant_url: String,

    /// Collection holding passage points. Default: `quiz_passages`.
    pub collection: String,

    /// Primary (exam-style) passages per context. Default: `5`.
    pub primary_quota: usize,

    /// Supplementary (chapter) passages per context. Default: `3`.
    pub supplementary_quota: usize,

    /// Upper bound on passages per context. Default: `8`.
    pub overall_cap: usize,
}

/// Default Qdrant URL used when `QUIZRAG_QDRANT_URL` is not set.
pub const DEFAULT_QDRANT_URL: &str = "http://localhost:6334";

impl Default for Config {
    fn default() -> Self {
        Self {
            model_path: None,
            model_id: DEFAULT_MODEL_ID.to_string(),
            embedder_stub: false,
            qdrant_url: DEFAULT_QDRANT_URL.to_string(),
            collection: DEFAULT_COLLECTION_NAME.to_string(),
            primary_quota: DEFAULT_PRIMARY_QUOTA,
            supplementary_quota: DEFAULT_SUPPLEMENTARY_QUOTA,
            overall_cap: DEFAULT_OVERALL_CAP,
        }
    }
}

impl Config {
    const ENV_MODEL_PATH: &'static str = "QUIZRAG_MODEL_PATH";
    const ENV_MODEL_ID: &'static str = "QUIZRAG_MODEL_ID";
    const ENV_EMBEDDER_STUB: &'static str = "QUIZRAG_EMBEDDER_STUB";
    const ENV_QDRANT_URL: &'static str = "QUIZRAG_QDRANT_URL";
    const ENV_COLLECTION: &'static str = "QUIZRAG_COLLECTION";
    const ENV_PRIMARY_QUOTA: &'static str = "QUIZRAG_PRIMARY_QUOTA";
    const ENV_SUPPLEMENTARY_QUOTA: &'static str = "QUIZRAG_SUPPLEMENTARY_QUOTA";
    const ENV_OVERALL_CAP: &'static str = "QUIZRAG_OVERALL_CAP";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let model_path = Self::parse_optional_path_from_env(Self::ENV_MODEL_PATH);
        let model_id = Self::parse_string_from_env(Self::ENV_MODEL_ID, defaults.model_id);
        let embedder_stub =
            Self::parse_flag_from_env(Self::ENV_EMBEDDER_STUB, defaults.embedder_stub)?;
        let qdrant_url = Self::parse_string_from_env(Self::ENV_QDRANT_URL, defaults.qdrant_url);
        let collection = Self::parse_string_from_env(Self::ENV_COLLECTION, defaults.collection);
        let primary_quota =
            Self::parse_count_from_env(Self::ENV_PRIMARY_QUOTA, defaults.primary_quota)?;
        let supplementary_quota = Self::parse_count_from_env(
            Self::ENV_SUPPLEMENTARY_QUOTA,
            defaults.supplementary_quota,
        )?;
        let overall_cap = Self::parse_count_from_env(Self::ENV_OVERALL_CAP, defaults.overall_cap)?;

        Ok(Self {
            model_path,
            model_id,
            embedder_stub,
            qdrant_url,
            collection,
            primary_quota,
            supplementary_quota,
            overall_cap,
        })
    }

    /// Validates paths and basic invariants (does not touch the network).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ref path) = self.model_path {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_dir() {
                return Err(ConfigError::NotADirectory { path: path.clone() });
            }
        }

        if self.model_path.is_none() && !self.embedder_stub && self.model_id.trim().is_empty() {
            return Err(ConfigError::EmptyValue {
                name: Self::ENV_MODEL_ID,
            });
        }
        if self.qdrant_url.trim().is_empty() {
            return Err(ConfigError::EmptyValue {
                name: Self::ENV_QDRANT_URL,
            });
        }
        if self.collection.trim().is_empty() {
            return Err(ConfigError::EmptyValue {
                name: Self::ENV_COLLECTION,
            });
        }

        Ok(())
    }

    /// Quotas and cap for context assembly.
    pub fn retrieval(&self) -> RetrievalConfig {
        RetrievalConfig::new(self.primary_quota, self.supplementary_quota, self.overall_cap)
    }

    /// Embedder settings: stub, local directory, or hub download, in that order.
    pub fn embedder(&self) -> MiniLmConfig {
        if self.embedder_stub {
            MiniLmConfig::stub()
        } else if let Some(ref dir) = self.model_path {
            MiniLmConfig::new(dir)
        } else {
            MiniLmConfig::from_hub(self.model_id.clone())
        }
    }

    fn parse_optional_path_from_env(var_name: &str) -> Option<PathBuf> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        env::var(var_name).unwrap_or(default)
    }

    fn parse_count_from_env(var_name: &'static str, default: usize) -> Result<usize, ConfigError> {
        match env::var(var_name) {
            Ok(value) => value
                .trim()
                .parse()
                .map_err(|e| ConfigError::InvalidCount {
                    name: var_name,
                    value,
                    source: e,
                }),
            Err(_) => Ok(default),
        }
    }

    fn parse_flag_from_env(var_name: &'static str, default: bool) -> Result<bool, ConfigError> {
        match env::var(var_name) {
            Ok(value) => match value.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => Ok(true),
                "0" | "false" | "no" | "" => Ok(false),
                _ => Err(ConfigError::InvalidFlag {
                    name: var_name,
                    value,
                }),
            },
            Err(_) => Ok(default),
        }
    }
}
