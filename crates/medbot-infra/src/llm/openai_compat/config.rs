//! Configuration for the OpenAI-compatible provider.
//!
//! Any service that speaks the OpenAI chat completions protocol is reached
//! through an [`OpenAiCompatConfig`] with its base URL and model.

use secrecy::SecretString;

/// Configuration for an OpenAI-compatible LLM provider.
///
/// Used to construct an [`super::OpenAiCompatibleProvider`].
pub struct OpenAiCompatConfig {
    /// Human-readable provider name (e.g., "together", "openai").
    pub provider_name: String,
    /// Base URL for the API (e.g., "https://api.together.xyz/v1").
    pub base_url: String,
    pub api_key: SecretString,
    pub model: String,
}
