//! HTTP layer for the chat backend.
//!
//! A single reply endpoint (`POST /get`) plus a health check, with an
//! optional static chat page served for every other path.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
