use std::time::Duration;

use thiserror::Error;

/// Errors from a single reply request to the chat backend.
///
/// Every variant is local to one send: the controller turns any of them into
/// the fallback bot message and the conversation stays usable.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("backend returned HTTP {status}")]
    Status { status: u16 },

    #[error("malformed reply: {0}")]
    Decode(String),

    #[error("no reply within {0:?}")]
    Timeout(Duration),
}

/// Errors from loading the TOML configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {message}")]
    Read { path: String, message: String },

    #[error("failed to parse {path}: {message}")]
    Parse { path: String, message: String },
}
