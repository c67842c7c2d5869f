//! ChatBackend trait definition.

use medbot_types::error::ChatError;

/// Something that answers a user message with reply text.
///
/// Implementations live in medbot-infra (e.g., `HttpChatBackend`).
pub trait ChatBackend: Send + Sync {
    /// Send one user message and wait for the raw reply text.
    fn send(
        &self,
        msg: &str,
    ) -> impl std::future::Future<Output = Result<String, ChatError>> + Send;
}
