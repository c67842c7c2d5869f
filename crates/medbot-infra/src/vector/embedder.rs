//! FastEmbed-based local embedding generator.
//!
//! Implements the `Embedder` trait from `medbot-core` using fastembed's
//! BGESmallENV15 model (384 dimensions) with ONNX runtime inference. The
//! model files are downloaded into the cache directory on first use.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};

use medbot_core::retrieval::embedder::Embedder;
use medbot_types::retrieval::RetrievalError;

use super::schema::EMBEDDING_DIMENSION;

const MODEL_NAME: &str = "BAAI/bge-small-en-v1.5";

/// Local BGESmallENV15 embedder.
pub struct FastEmbedder {
    model: Arc<Mutex<TextEmbedding>>,
}

impl FastEmbedder {
    /// Load the model, fetching it into `cache_dir` when not cached yet.
    pub fn new(cache_dir: PathBuf) -> Result<Self, RetrievalError> {
        let options = InitOptions::new(EmbeddingModel::BGESmallENV15)
            .with_cache_dir(cache_dir)
            .with_show_download_progress(false);
        let model = TextEmbedding::try_new(options)
            .map_err(|e| RetrievalError::Embedding(format!("failed to load {MODEL_NAME}: {e}")))?;
        Ok(Self {
            model: Arc::new(Mutex::new(model)),
        })
    }
}

impl Embedder for FastEmbedder {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, RetrievalError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        let model = Arc::clone(&self.model);
        let texts = texts.to_vec();

        // ONNX inference is CPU-bound
        tokio::task::spawn_blocking(move || {
            let mut model = model.lock().expect("embedding model lock poisoned");
            model.embed(texts, None)
        })
        .await
        .map_err(|e| RetrievalError::Embedding(e.to_string()))?
        .map_err(|e| RetrievalError::Embedding(e.to_string()))
    }

    fn model_name(&self) -> &str {
        MODEL_NAME
    }

    fn dimension(&self) -> usize {
        EMBEDDING_DIMENSION as usize
    }
}
