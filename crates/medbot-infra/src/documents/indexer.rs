//! Builds the document index from a directory of text files.
//!
//! Every `.txt` and `.md` file directly under the directory is chunked,
//! embedded in batches and written to the chunk table. An existing index is
//! replaced.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use medbot_core::retrieval::embedder::Embedder;
use medbot_types::retrieval::{DocumentChunk, RetrievalError};

use super::chunker::DocumentChunker;
use crate::vector::chunk_store::LanceChunkStore;
use crate::vector::schema::EMBEDDING_DIMENSION;

const EMBED_BATCH: usize = 64;

/// A readable reference document.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    pub name: String,
    pub text: String,
    pub markdown: bool,
}

/// Outcome of an indexing run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexReport {
    pub documents: usize,
    pub chunks: usize,
    /// Files skipped because of their extension.
    pub skipped: Vec<String>,
}

/// Read the `.txt` and `.md` files in `dir`, sorted by name.
pub async fn load_documents(dir: &Path) -> Result<(Vec<SourceDocument>, Vec<String>), RetrievalError> {
    let read_error = |path: &Path, e: std::io::Error| RetrievalError::Document {
        path: path.display().to_string(),
        message: e.to_string(),
    };

    let mut entries = tokio::fs::read_dir(dir).await.map_err(|e| read_error(dir, e))?;
    let mut paths: Vec<PathBuf> = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(|e| read_error(dir, e))? {
        let path = entry.path();
        if path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();

    let mut documents = Vec::new();
    let mut skipped = Vec::new();
    for path in paths {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let markdown = match path.extension().and_then(|e| e.to_str()) {
            Some("md") | Some("markdown") => true,
            Some("txt") => false,
            _ => {
                debug!(file = %name, "skipping unsupported file");
                skipped.push(name);
                continue;
            }
        };
        let text = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| read_error(&path, e))?;
        documents.push(SourceDocument { name, text, markdown });
    }
    Ok((documents, skipped))
}

/// Chunks, embeds and stores reference documents.
pub struct DocumentIndexer<'a, E> {
    embedder: &'a E,
    store: &'a LanceChunkStore,
    chunker: DocumentChunker,
}

impl<'a, E: Embedder> DocumentIndexer<'a, E> {
    pub fn new(embedder: &'a E, store: &'a LanceChunkStore, chunker: DocumentChunker) -> Self {
        Self {
            embedder,
            store,
            chunker,
        }
    }

    /// Replace the index with the documents found in `dir`.
    ///
    /// `on_chunks` is called with the running chunk count after every batch.
    pub async fn index_dir(
        &self,
        dir: &Path,
        mut on_chunks: impl FnMut(usize),
    ) -> Result<IndexReport, RetrievalError> {
        if self.embedder.dimension() != EMBEDDING_DIMENSION as usize {
            return Err(RetrievalError::Embedding(format!(
                "{} produces {} dimensions, the index stores {EMBEDDING_DIMENSION}",
                self.embedder.model_name(),
                self.embedder.dimension()
            )));
        }
        let (documents, skipped) = load_documents(dir).await?;
        if !skipped.is_empty() {
            warn!(files = ?skipped, "only .txt and .md files are indexed");
        }

        let mut chunks: Vec<DocumentChunk> = Vec::new();
        for document in &documents {
            let pieces = self.chunker.split(&document.name, &document.text, document.markdown)?;
            debug!(file = %document.name, chunks = pieces.len(), "document chunked");
            chunks.extend(pieces);
        }

        self.store.clear().await?;
        let mut stored = 0;
        for batch in chunks.chunks(EMBED_BATCH) {
            let texts: Vec<String> = batch.iter().map(|c| c.text.clone()).collect();
            let embeddings = self.embedder.embed(&texts).await?;
            self.store
                .add(batch, &embeddings, self.embedder.model_name())
                .await?;
            stored += batch.len();
            on_chunks(stored);
        }

        info!(
            documents = documents.len(),
            chunks = stored,
            table = self.store.table_name(),
            "document index built"
        );
        Ok(IndexReport {
            documents: documents.len(),
            chunks: stored,
            skipped,
        })
    }
}
