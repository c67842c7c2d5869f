//! Infrastructure layer for MedBot chat.
//!
//! Implements the traits defined in `medbot-core`: the reqwest-backed
//! [`backend::HttpChatBackend`], the OpenAI-compatible LLM provider, and the
//! LanceDB/fastembed document retriever. Also loads `config.toml` and reads
//! API keys from the environment.

pub mod backend;
pub mod config;
pub mod documents;
pub mod llm;
pub mod secret;
pub mod vector;
