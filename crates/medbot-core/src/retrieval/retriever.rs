//! Retriever trait definition.

use medbot_types::retrieval::{RetrievalError, RetrievedChunk};

/// Looks up the document chunks most similar to a query.
pub trait Retriever: Send + Sync {
    /// Up to `limit` chunks, closest first.
    fn retrieve(
        &self,
        query: &str,
        limit: usize,
    ) -> impl std::future::Future<Output = Result<Vec<RetrievedChunk>, RetrievalError>> + Send;
}
