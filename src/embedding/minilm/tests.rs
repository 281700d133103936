use super::*;
use std::path::PathBuf;

mod config_tests {
    use super::*;

    #[test]
    fn test_minilm_config_default() {
        let config = MiniLmConfig::default();
        assert!(config.model_dir.is_none());
        assert_eq!(config.model_id, "sentence-transformers/all-MiniLM-L6-v2");
        assert_eq!(config.embedding_dim, MINILM_EMBEDDING_DIM);
        assert_eq!(config.max_seq_len, MINILM_MAX_SEQ_LEN);
        assert!(!config.testing_stub);
    }

    #[test]
    fn test_minilm_config_new_sets_dir() {
        let config = MiniLmConfig::new("/models/minilm");
        assert_eq!(config.model_dir, Some(PathBuf::from("/models/minilm")));
        assert!(!config.testing_stub);
    }

    #[test]
    fn test_minilm_config_from_hub() {
        let config = MiniLmConfig::from_hub("BAAI/bge-small-en-v1.5");
        assert!(config.model_dir.is_none());
        assert_eq!(config.model_id, "BAAI/bge-small-en-v1.5");
    }

    #[test]
    fn test_validate_stub_ok() {
        assert!(MiniLmConfig::stub().validate().is_ok());
    }

    #[test]
    fn test_validate_zero_seq_len() {
        let config = MiniLmConfig::stub().with_max_seq_len(0);
        assert!(matches!(
            config.validate(),
            Err(EmbeddingError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_validate_stub_zero_dim() {
        let config = MiniLmConfig::stub().with_embedding_dim(0);
        assert!(matches!(
            config.validate(),
            Err(EmbeddingError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_validate_missing_dir() {
        let config = MiniLmConfig::new("/definitely/not/a/model/dir");
        let err = config.validate().unwrap_err();
        assert!(matches!(err, EmbeddingError::ModelNotFound { .. }));
        assert!(err.is_model_unavailable());
    }

    #[test]
    fn test_validate_blank_model_id() {
        let config = MiniLmConfig::from_hub("  ");
        assert!(matches!(
            config.validate(),
            Err(EmbeddingError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_resolve_files_local_dir() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["config.json", "tokenizer.json", "model.safetensors"] {
            std::fs::write(dir.path().join(name), b"{}").unwrap();
        }

        let files = MiniLmConfig::new(dir.path()).resolve_files().unwrap();
        assert_eq!(files.config, dir.path().join("config.json"));
        assert_eq!(files.tokenizer, dir.path().join("tokenizer.json"));
        assert_eq!(files.weights, dir.path().join("model.safetensors"));
    }

    #[test]
    fn test_resolve_files_missing_weights() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.json"), b"{}").unwrap();
        std::fs::write(dir.path().join("tokenizer.json"), b"{}").unwrap();

        let err = MiniLmConfig::new(dir.path()).resolve_files().unwrap_err();
        match err {
            EmbeddingError::ModelNotFound { path } => {
                assert_eq!(path, dir.path().join("model.safetensors"))
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}

mod load_tests {
    use super::*;

    #[test]
    fn test_load_missing_dir_is_model_unavailable() {
        let err = MiniLmEmbedder::load(MiniLmConfig::new("/nope/minilm")).unwrap_err();
        assert!(err.is_model_unavailable());
    }

    #[test]
    fn test_load_corrupt_config_is_model_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.json"), b"not json").unwrap();
        std::fs::write(dir.path().join("tokenizer.json"), b"not json").unwrap();
        std::fs::write(dir.path().join("model.safetensors"), b"not weights").unwrap();

        let err = MiniLmEmbedder::load(MiniLmConfig::new(dir.path())).unwrap_err();
        assert!(
            matches!(err, EmbeddingError::ModelUnavailable { .. }),
            "got {err:?}"
        );
    }

    #[test]
    fn test_load_stub() {
        let embedder = MiniLmEmbedder::load(MiniLmConfig::stub()).unwrap();
        assert!(embedder.is_stub());
        assert_eq!(embedder.embedding_dim(), MINILM_EMBEDDING_DIM);
        assert!(format!("{:?}", embedder).contains("Stub"));
    }
}

mod stub_tests {
    use super::*;

    fn stub() -> MiniLmEmbedder {
        MiniLmEmbedder::load(MiniLmConfig::stub()).unwrap()
    }

    #[test]
    fn test_stub_dimension() {
        let embedding = stub().embed("photosynthesis in plants").unwrap();
        assert_eq!(embedding.len(), MINILM_EMBEDDING_DIM);
    }

    #[test]
    fn test_stub_custom_dimension() {
        let embedder =
            MiniLmEmbedder::load(MiniLmConfig::stub().with_embedding_dim(16)).unwrap();
        assert_eq!(embedder.embed("metals").unwrap().len(), 16);
        assert_eq!(embedder.embedding_dim(), 16);
    }

    #[test]
    fn test_stub_deterministic() {
        let a = stub().embed("properties of metals").unwrap();
        let b = stub().embed("properties of metals").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_stub_distinct_texts_differ() {
        let embedder = stub();
        let a = embedder.embed("properties of metals").unwrap();
        let b = embedder.embed("structure of the cell").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_stub_unit_norm() {
        let embedding = stub().embed("combustion and flame").unwrap();
        let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-4, "norm was {norm}");
    }

    #[test]
    fn test_stub_accepts_empty_and_long_text() {
        let embedder = stub();
        assert_eq!(embedder.embed("").unwrap().len(), MINILM_EMBEDDING_DIM);

        let long = "friction ".repeat(2_000);
        assert_eq!(embedder.embed(&long).unwrap().len(), MINILM_EMBEDDING_DIM);
    }

    #[test]
    fn test_normalize_zero_vector_stays_zero() {
        assert_eq!(normalize_l2(vec![0.0, 0.0]), vec![0.0, 0.0]);
    }
}
