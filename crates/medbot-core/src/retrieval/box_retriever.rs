//! BoxRetriever -- object-safe dynamic dispatch wrapper for Retriever.
//!
//! Same blanket-impl pattern as `BoxLlmProvider`.

use std::future::Future;
use std::pin::Pin;

use medbot_types::retrieval::{RetrievalError, RetrievedChunk};

use super::retriever::Retriever;

/// Object-safe version of [`Retriever`] with boxed futures.
pub trait RetrieverDyn: Send + Sync {
    fn retrieve_boxed<'a>(
        &'a self,
        query: &'a str,
        limit: usize,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<RetrievedChunk>, RetrievalError>> + Send + 'a>>;
}

impl<T: Retriever> RetrieverDyn for T {
    fn retrieve_boxed<'a>(
        &'a self,
        query: &'a str,
        limit: usize,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<RetrievedChunk>, RetrievalError>> + Send + 'a>> {
        Box::pin(self.retrieve(query, limit))
    }
}

/// Type-erased retriever.
pub struct BoxRetriever {
    inner: Box<dyn RetrieverDyn + Send + Sync>,
}

impl BoxRetriever {
    pub fn new<T: Retriever + 'static>(retriever: T) -> Self {
        Self {
            inner: Box::new(retriever),
        }
    }

    pub async fn retrieve(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<RetrievedChunk>, RetrievalError> {
        self.inner.retrieve_boxed(query, limit).await
    }
}
