//! Document chunk table on LanceDB.
//!
//! Stores each chunk with its embedding and answers cosine nearest-neighbour
//! queries.

use std::sync::Arc;

use arrow_array::{
    Array, FixedSizeListArray, Float32Array, Int32Array, RecordBatch, RecordBatchIterator,
    StringArray,
};
use arrow_schema::{DataType, Field};
use futures_util::TryStreamExt;
use lancedb::query::{ExecutableQuery, QueryBase};

use medbot_types::retrieval::{DocumentChunk, RetrievalError, RetrievedChunk};

use super::lance::LanceVectorStore;
use super::schema::{EMBEDDING_DIMENSION, document_chunks_schema};

/// Chunks of the reference documents, one table per index.
pub struct LanceChunkStore {
    store: LanceVectorStore,
    table_name: String,
}

fn store_error(context: &str, e: impl std::fmt::Display) -> RetrievalError {
    RetrievalError::Store(format!("{context}: {e}"))
}

fn string_column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a StringArray, RetrievalError> {
    batch
        .column_by_name(name)
        .and_then(|c| c.as_any().downcast_ref::<StringArray>())
        .ok_or_else(|| RetrievalError::Store(format!("result has no {name} column")))
}

impl LanceChunkStore {
    pub fn new(store: LanceVectorStore, table_name: impl Into<String>) -> Self {
        Self {
            store,
            table_name: table_name.into(),
        }
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    async fn table(&self) -> Result<lancedb::Table, RetrievalError> {
        self.store
            .ensure_table(&self.table_name, Arc::new(document_chunks_schema()))
            .await
            .map_err(|e| store_error("Failed to ensure chunk table", e))
    }

    /// Append chunks with their embeddings, matched by position.
    pub async fn add(
        &self,
        chunks: &[DocumentChunk],
        embeddings: &[Vec<f32>],
        model: &str,
    ) -> Result<(), RetrievalError> {
        if chunks.is_empty() {
            return Ok(());
        }
        let batch = Self::build_record_batch(chunks, embeddings, model)?;
        let schema = batch.schema();
        let reader = RecordBatchIterator::new(vec![Ok(batch)], schema);

        self.table()
            .await?
            .add(reader)
            .execute()
            .await
            .map_err(|e| store_error("Failed to add chunks", e))?;
        Ok(())
    }

    /// Up to `limit` chunks closest to `query_embedding` by cosine distance.
    pub async fn search(
        &self,
        query_embedding: &[f32],
        limit: usize,
    ) -> Result<Vec<RetrievedChunk>, RetrievalError> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let table = self.table().await?;

        let results = table
            .vector_search(query_embedding)
            .map_err(|e| store_error("Vector search setup failed", e))?
            .distance_type(lancedb::DistanceType::Cosine)
            .limit(limit)
            .execute()
            .await
            .map_err(|e| store_error("Vector search failed", e))?;

        let batches: Vec<RecordBatch> = results
            .try_collect()
            .await
            .map_err(|e| store_error("Failed to collect results", e))?;

        let mut found = Vec::new();
        for batch in &batches {
            found.extend(Self::record_batch_to_chunks(batch)?);
        }
        found.sort_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        found.truncate(limit);
        Ok(found)
    }

    /// Number of stored chunks; 0 when the table does not exist yet.
    pub async fn count(&self) -> Result<usize, RetrievalError> {
        let table = self
            .store
            .open_table(&self.table_name)
            .await
            .map_err(|e| store_error("Failed to open chunk table", e))?;
        match table {
            Some(table) => table
                .count_rows(None)
                .await
                .map_err(|e| store_error("Failed to count chunks", e)),
            None => Ok(0),
        }
    }

    /// Drop every stored chunk.
    pub async fn clear(&self) -> Result<(), RetrievalError> {
        self.store
            .drop_table(&self.table_name)
            .await
            .map_err(|e| store_error("Failed to drop chunk table", e))
    }

    fn build_record_batch(
        chunks: &[DocumentChunk],
        embeddings: &[Vec<f32>],
        model: &str,
    ) -> Result<RecordBatch, RetrievalError> {
        if chunks.len() != embeddings.len() {
            return Err(RetrievalError::Embedding(format!(
                "{} chunks but {} embeddings",
                chunks.len(),
                embeddings.len()
            )));
        }
        if let Some(bad) = embeddings
            .iter()
            .find(|e| e.len() != EMBEDDING_DIMENSION as usize)
        {
            return Err(RetrievalError::Embedding(format!(
                "expected {EMBEDDING_DIMENSION} dimensions, got {}",
                bad.len()
            )));
        }

        let chunk_ids = StringArray::from(
            chunks
                .iter()
                .map(|c| format!("{}#{}", c.source, c.index))
                .collect::<Vec<_>>(),
        );
        let sources = StringArray::from(chunks.iter().map(|c| c.source.clone()).collect::<Vec<_>>());
        let indices = Int32Array::from(chunks.iter().map(|c| c.index as i32).collect::<Vec<_>>());
        let texts = StringArray::from(chunks.iter().map(|c| c.text.clone()).collect::<Vec<_>>());
        let models = StringArray::from(vec![model.to_string(); chunks.len()]);

        let values = Float32Array::from(embeddings.concat());
        let field = Arc::new(Field::new("item", DataType::Float32, true));
        let vectors = FixedSizeListArray::try_new(field, EMBEDDING_DIMENSION, Arc::new(values), None)
            .map_err(|e| store_error("Failed to build vector column", e))?;

        RecordBatch::try_new(
            Arc::new(document_chunks_schema()),
            vec![
                Arc::new(chunk_ids),
                Arc::new(sources),
                Arc::new(indices),
                Arc::new(texts),
                Arc::new(models),
                Arc::new(vectors),
            ],
        )
        .map_err(|e| store_error("Failed to build record batch", e))
    }

    fn record_batch_to_chunks(batch: &RecordBatch) -> Result<Vec<RetrievedChunk>, RetrievalError> {
        if batch.num_rows() == 0 {
            return Ok(Vec::new());
        }

        let sources = string_column(batch, "source")?;
        let texts = string_column(batch, "chunk_text")?;
        // Added by LanceDB vector search
        let distances = batch
            .column_by_name("_distance")
            .and_then(|c| c.as_any().downcast_ref::<Float32Array>());

        Ok((0..batch.num_rows())
            .map(|i| RetrievedChunk {
                source: sources.value(i).to_string(),
                text: texts.value(i).to_string(),
                distance: distances
                    .filter(|d| !d.is_null(i))
                    .map_or(0.0, |d| d.value(i)),
            })
            .collect())
    }
}
