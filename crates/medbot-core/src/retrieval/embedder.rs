//! Embedder trait for text-to-vector conversion.

use medbot_types::retrieval::RetrievalError;

/// Converts text into embedding vectors.
///
/// Implementations live in medbot-infra (e.g., `FastEmbedder`).
pub trait Embedder: Send + Sync {
    /// Embed one or more texts, returning one vector per input in order.
    fn embed(
        &self,
        texts: &[String],
    ) -> impl std::future::Future<Output = Result<Vec<Vec<f32>>, RetrievalError>> + Send;

    /// Model name recorded alongside stored vectors.
    fn model_name(&self) -> &str;

    /// Length of every returned vector.
    fn dimension(&self) -> usize;
}
