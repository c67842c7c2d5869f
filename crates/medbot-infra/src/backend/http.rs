//! HttpChatBackend -- [`ChatBackend`] over a JSON `POST` to the reply endpoint.
//!
//! Sends `{"msg": ...}` and reads `{"response": ...}`. The server reports its
//! own failures in the same shape (with a 4xx/5xx status), and those texts
//! are passed through as replies so the user sees them. Only a body that is
//! not a reply at all counts as an error.

use reqwest::StatusCode;
use tracing::{debug, warn};

use medbot_core::chat::backend::ChatBackend;
use medbot_types::chat::{ChatReply, ChatRequest};
use medbot_types::error::ChatError;

/// Reply endpoint client.
#[derive(Debug, Clone)]
pub struct HttpChatBackend {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpChatBackend {
    /// Create a backend posting to `endpoint` (e.g. `http://127.0.0.1:8080/get`).
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), endpoint)
    }

    /// Use a preconfigured client (proxies, custom TLS).
    pub fn with_client(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl ChatBackend for HttpChatBackend {
    async fn send(&self, msg: &str) -> Result<String, ChatError> {
        let body = ChatRequest {
            msg: msg.to_string(),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| ChatError::Transport(e.to_string()))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ChatError::Transport(format!("failed to read body: {e}")))?;
        debug!(status = status.as_u16(), bytes = bytes.len(), "reply received");

        decode_reply(status, &bytes)
    }
}

fn decode_reply(status: StatusCode, body: &[u8]) -> Result<String, ChatError> {
    match serde_json::from_slice::<ChatReply>(body) {
        Ok(reply) => {
            if !status.is_success() {
                warn!(status = status.as_u16(), "backend reported an error");
            }
            Ok(reply.response)
        }
        Err(_) if !status.is_success() => Err(ChatError::Status {
            status: status.as_u16(),
        }),
        Err(e) => Err(ChatError::Decode(e.to_string())),
    }
}
