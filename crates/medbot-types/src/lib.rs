//! Shared domain types for MedBot chat.
//!
//! Message senders, the `/get` wire bodies, LLM request shapes, document
//! chunks, configuration sections, and the error enums used across the
//! workspace.
//!
//! Zero infrastructure dependencies -- only serde and thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod llm;
pub mod retrieval;
