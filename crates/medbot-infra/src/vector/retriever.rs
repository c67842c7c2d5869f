//! Retriever over the document chunk table.

use medbot_core::retrieval::embedder::Embedder;
use medbot_core::retrieval::retriever::Retriever;
use medbot_types::retrieval::{RetrievalError, RetrievedChunk};

use super::chunk_store::LanceChunkStore;

/// Embeds the query and searches the chunk store.
pub struct VectorRetriever<E> {
    embedder: E,
    store: LanceChunkStore,
}

impl<E: Embedder> VectorRetriever<E> {
    pub fn new(embedder: E, store: LanceChunkStore) -> Self {
        Self { embedder, store }
    }
}

impl<E: Embedder> Retriever for VectorRetriever<E> {
    async fn retrieve(&self, query: &str, limit: usize) -> Result<Vec<RetrievedChunk>, RetrievalError> {
        if query.trim().is_empty() || limit == 0 {
            return Ok(Vec::new());
        }
        let embedding = self
            .embedder
            .embed(&[query.to_string()])
            .await?
            .pop()
            .ok_or_else(|| RetrievalError::Embedding("no embedding returned".to_string()))?;

        let chunks = self.store.search(&embedding, limit).await?;
        tracing::debug!(
            table = self.store.table_name(),
            found = chunks.len(),
            "document chunks retrieved"
        );
        Ok(chunks)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::vector::chunk_store::tests::axis_embedding;
    use crate::vector::lance::LanceVectorStore;
    use medbot_types::retrieval::DocumentChunk;

    /// Maps each text to the axis of its first keyword hit.
    pub(crate) struct KeywordEmbedder;

    const KEYWORDS: [&str; 4] = ["fever", "rash", "sleep", "cough"];

    impl Embedder for KeywordEmbedder {
        async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, RetrievalError> {
            Ok(texts
                .iter()
                .map(|text| {
                    let text = text.to_lowercase();
                    let axis = KEYWORDS
                        .iter()
                        .position(|k| text.contains(k))
                        .unwrap_or(KEYWORDS.len());
                    axis_embedding(axis * 10, 0.0)
                })
                .collect())
        }

        fn model_name(&self) -> &str {
            "keyword"
        }

        fn dimension(&self) -> usize {
            384
        }
    }

    #[tokio::test]
    async fn test_retrieve_returns_closest_chunks() {
        let tmp = tempfile::tempdir().unwrap();
        let store = LanceChunkStore::new(
            LanceVectorStore::new(tmp.path().to_path_buf()).await.unwrap(),
            "medicalbot",
        );
        let chunks: Vec<DocumentChunk> = ["A fever above 39C needs care.", "Itchy rash: use cream.", "Sleep eight hours."]
            .iter()
            .enumerate()
            .map(|(index, text)| DocumentChunk {
                source: "guide.md".to_string(),
                index,
                text: text.to_string(),
            })
            .collect();
        let embeddings = KeywordEmbedder.embed(&chunks.iter().map(|c| c.text.clone()).collect::<Vec<_>>()).await.unwrap();
        store.add(&chunks, &embeddings, "keyword").await.unwrap();

        let retriever = VectorRetriever::new(KeywordEmbedder, store);
        let found = retriever.retrieve("User: I have a rash\nBot:", 1).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].text, "Itchy rash: use cream.");

        assert!(retriever.retrieve("   ", 3).await.unwrap().is_empty());
    }
}
