//! Business logic and port traits for MedBot chat.
//!
//! This crate holds the reply formatter, the conversation log abstraction
//! with its message appender, the conversation controller, and the traits
//! the infrastructure layer implements (`ChatBackend`, `LlmProvider`,
//! `Embedder`, `Retriever`). It depends only on `medbot-types` -- never on
//! `medbot-infra` or any HTTP crate.

pub mod chat;
pub mod format;
pub mod llm;
pub mod log;
pub mod retrieval;
