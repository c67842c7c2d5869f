//! Document retrieval abstractions.
//!
//! - `Embedder`: turns text into vectors (implemented in medbot-infra)
//! - `Retriever`: RPITIT trait returning the chunks closest to a query
//! - `BoxRetriever`: object-safe wrapper for dynamic dispatch
//! - [`context::fill_context`]: places retrieved text into the system prompt

pub mod box_retriever;
pub mod context;
pub mod embedder;
pub mod retriever;
