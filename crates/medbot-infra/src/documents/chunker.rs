//! Text chunker for reference documents.
//!
//! Uses the `text-splitter` crate. Markdown files go through
//! `MarkdownSplitter` for heading-aware splitting; all other text uses
//! `TextSplitter`.

use text_splitter::{ChunkConfig, MarkdownSplitter, TextSplitter};

use medbot_types::config::RetrievalConfig;
use medbot_types::retrieval::{DocumentChunk, RetrievalError};

/// Splits document text into chunks of bounded length.
#[derive(Debug, Clone, Copy)]
pub struct DocumentChunker {
    size: usize,
    overlap: usize,
}

impl DocumentChunker {
    /// Fails when `overlap` is not smaller than `size`.
    pub fn new(size: usize, overlap: usize) -> Result<Self, RetrievalError> {
        let chunker = Self { size, overlap };
        chunker.config()?;
        Ok(chunker)
    }

    fn config(&self) -> Result<ChunkConfig<text_splitter::Characters>, RetrievalError> {
        ChunkConfig::new(self.size)
            .with_overlap(self.overlap)
            .map_err(|e| RetrievalError::Chunking(e.to_string()))
    }

    /// Chunks of `text`, numbered from 0 and tagged with `source`.
    pub fn split(&self, source: &str, text: &str, markdown: bool) -> Result<Vec<DocumentChunk>, RetrievalError> {
        let config = self.config()?;
        let pieces: Vec<&str> = if markdown {
            MarkdownSplitter::new(config).chunks(text).collect()
        } else {
            TextSplitter::new(config).chunks(text).collect()
        };

        Ok(pieces
            .into_iter()
            .map(str::trim)
            .filter(|piece| !piece.is_empty())
            .enumerate()
            .map(|(index, piece)| DocumentChunk {
                source: source.to_string(),
                index,
                text: piece.to_string(),
            })
            .collect())
    }
}

impl TryFrom<&RetrievalConfig> for DocumentChunker {
    type Error = RetrievalError;

    fn try_from(config: &RetrievalConfig) -> Result<Self, Self::Error> {
        Self::new(config.chunk_size, config.chunk_overlap)
    }
}
