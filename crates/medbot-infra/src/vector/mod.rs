//! Vector index for reference documents.
//!
//! LanceDB stores the document chunks, fastembed computes embeddings
//! locally, and [`open_retriever`] wires both into a [`BoxRetriever`] for the
//! reply service.

pub mod chunk_store;
pub mod embedder;
pub mod lance;
pub mod retriever;
pub mod schema;

use std::path::{Path, PathBuf};

use medbot_core::retrieval::box_retriever::BoxRetriever;
use medbot_types::config::RetrievalConfig;
use medbot_types::retrieval::RetrievalError;

use self::chunk_store::LanceChunkStore;
use self::embedder::FastEmbedder;
use self::lance::LanceVectorStore;
use self::retriever::VectorRetriever;

/// Index location: `retrieval.index_dir`, else `{data_dir}/index`.
pub fn resolve_index_dir(config: &RetrievalConfig, data_dir: &Path) -> PathBuf {
    match &config.index_dir {
        Some(dir) => PathBuf::from(dir),
        None => data_dir.join("index"),
    }
}

/// Cache directory for downloaded embedding models.
pub fn model_cache_dir(data_dir: &Path) -> PathBuf {
    data_dir.join("models")
}

/// Open the chunk table of the configured index.
pub async fn open_chunk_store(
    config: &RetrievalConfig,
    data_dir: &Path,
) -> Result<LanceChunkStore, RetrievalError> {
    let dir = resolve_index_dir(config, data_dir);
    let store = LanceVectorStore::new(dir)
        .await
        .map_err(|e| RetrievalError::Store(e.to_string()))?;
    Ok(LanceChunkStore::new(store, config.table.clone()))
}

/// Retriever over the configured index.
///
/// `None` when retrieval is disabled or the index holds no chunks, in which
/// case the embedding model is never loaded.
pub async fn open_retriever(
    config: &RetrievalConfig,
    data_dir: &Path,
) -> Result<Option<BoxRetriever>, RetrievalError> {
    if !config.enabled {
        return Ok(None);
    }
    let store = open_chunk_store(config, data_dir).await?;
    let chunks = store.count().await?;
    if chunks == 0 {
        tracing::warn!(
            table = %config.table,
            "document index is empty, run `medbot index <dir>` to ground answers"
        );
        return Ok(None);
    }

    let embedder = FastEmbedder::new(model_cache_dir(data_dir))?;
    tracing::info!(chunks, table = %config.table, "document index ready");
    Ok(Some(BoxRetriever::new(VectorRetriever::new(embedder, store))))
}
