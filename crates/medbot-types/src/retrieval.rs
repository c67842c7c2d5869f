//! Document retrieval types.
//!
//! Reference documents are split into chunks, embedded and stored in a
//! local vector index. At answer time the chunks closest to the
//! conversation are looked up and handed to the model as context.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One indexed piece of a reference document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentChunk {
    /// File name the chunk was cut from.
    pub source: String,
    /// Position of the chunk within its source, starting at 0.
    pub index: usize,
    pub text: String,
}

/// A chunk returned by a similarity search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievedChunk {
    pub source: String,
    pub text: String,
    /// Cosine distance to the query (0 is identical).
    pub distance: f32,
}

/// Errors from building or querying the document index.
#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("embedding failed: {0}")]
    Embedding(String),

    #[error("vector store error: {0}")]
    Store(String),

    #[error("cannot read document {path}: {message}")]
    Document { path: String, message: String },

    #[error("invalid chunking settings: {0}")]
    Chunking(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retrieval_error_display() {
        let err = RetrievalError::Document {
            path: "Data/cold.md".to_string(),
            message: "permission denied".to_string(),
        };
        assert_eq!(err.to_string(), "cannot read document Data/cold.md: permission denied");

        let err = RetrievalError::Store("table missing".to_string());
        assert_eq!(err.to_string(), "vector store error: table missing");
    }
}
