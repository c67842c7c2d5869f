//! Reference documents: loading, chunking and indexing.

pub mod chunker;
pub mod indexer;
