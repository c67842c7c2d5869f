//! Configuration types for MedBot chat.
//!
//! `MedbotConfig` represents the top-level `config.toml`. Every section and
//! field has a default, so an empty file (or no file) is a valid config.

use serde::{Deserialize, Serialize};

/// Greeting shown as the first bot message of every conversation.
pub const DEFAULT_GREETING: &str =
    "Hi, I am MedBot 👩‍⚕️ — your medical assistant. How can I help you today?";

/// Bot message shown when a reply request fails.
pub const DEFAULT_FALLBACK_MESSAGE: &str =
    "Sorry, something went wrong. Please try again later.";

/// Avatar glyph rendered next to every bot bubble.
pub const DEFAULT_AVATAR: &str = "👩‍⚕️";

const DEFAULT_SYSTEM_PROMPT: &str = concat!(
    "You are MedBot, a helpful and concise assistant that answers medical questions clearly and directly.",
    "Use the retrieved context to answer the user's question. If the exact answer is not found, make your best educated guess",
    "based on common medical knowledge. Do not mention missing context or apologize. Avoid disclaimers. Keep responses short and helpful.",
    "If the answer contains multiple steps, recommendations, or types of information, present it in a clean, organized format:\n",
    "- Use numbered or bullet-point lists where appropriate.\n",
    "- Bold important terms or headings using Markdown (like **Recovery**, **Side Effects**).\n",
    "- Use short paragraphs if listing isn't suitable.\n",
    "Keep the response short, clear, and easy to scan.\n",
    "\n\n",
    "{context}",
);

/// Placeholder in the system prompt replaced by the retrieved document text.
pub const CONTEXT_PLACEHOLDER: &str = "{context}";

/// Top-level configuration.
///
/// Loaded from `~/.medbot/config.toml` unless a path is given explicitly.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MedbotConfig {
    pub client: ClientConfig,
    pub server: ServerConfig,
    pub llm: LlmConfig,
    pub answer: AnswerConfig,
    pub retrieval: RetrievalConfig,
}

/// Conversation client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Full URL of the reply endpoint.
    pub endpoint: String,
    /// Upper bound for one reply request, in seconds.
    pub request_timeout_secs: u64,
    pub greeting: String,
    pub fallback_message: String,
    pub avatar: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:8080/get".to_string(),
            request_timeout_secs: 60,
            greeting: DEFAULT_GREETING.to_string(),
            fallback_message: DEFAULT_FALLBACK_MESSAGE.to_string(),
            avatar: DEFAULT_AVATAR.to_string(),
        }
    }
}

/// Chat backend server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Number of most recent history lines sent to the model.
    pub history_limit: usize,
    /// Directory holding a static chat page, served for unknown paths.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web_dir: Option<String>,
    /// Conversations untouched for this long are dropped.
    pub session_idle_secs: u64,
    /// Upper bound on conversations held in memory at once.
    pub max_sessions: usize,
    /// How often idle conversations are swept, in seconds.
    pub session_sweep_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            history_limit: 10,
            web_dir: None,
            session_idle_secs: 1800,
            max_sessions: 10_000,
            session_sweep_secs: 60,
        }
    }
}

/// OpenAI-compatible model settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub provider_name: String,
    pub base_url: String,
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    pub system_prompt: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider_name: "together".to_string(),
            base_url: "https://api.together.xyz/v1".to_string(),
            model: "mistralai/Mixtral-8x7B-Instruct-v0.1".to_string(),
            temperature: 0.5,
            max_tokens: 512,
            api_key_env: "TOGETHER_API_KEY".to_string(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        }
    }
}

/// Post-processing applied to every model answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnswerConfig {
    /// Phrases removed verbatim from answers before they are returned.
    pub unwanted_phrases: Vec<String>,
}

impl Default for AnswerConfig {
    fn default() -> Self {
        Self {
            unwanted_phrases: [
                "Acne is not mentioned in the provided context",
                "Based on the provided context",
                "The text provided discusses",
                "The provided context discusses treatments for contact dermatitis, not acne.",
                "Based on the context provided, it is not possible to make a definitive diagnosis about your condition.",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

/// Document index used to ground answers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Look up context for every answer when an index exists.
    pub enabled: bool,
    /// Index location; `{data_dir}/index` when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index_dir: Option<String>,
    /// Table holding the document chunks.
    pub table: String,
    /// Number of chunks placed in the system prompt.
    pub top_k: usize,
    /// Maximum chunk length in characters.
    pub chunk_size: usize,
    /// Characters shared by neighbouring chunks.
    pub chunk_overlap: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            index_dir: None,
            table: "medicalbot".to_string(),
            top_k: 3,
            chunk_size: 500,
            chunk_overlap: 20,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default_values() {
        let config = MedbotConfig::default();
        assert_eq!(config.client.endpoint, "http://127.0.0.1:8080/get");
        assert_eq!(config.client.request_timeout_secs, 60);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.history_limit, 10);
        assert_eq!(config.llm.max_tokens, 512);
        assert_eq!(config.answer.unwanted_phrases.len(), 5);
        assert_eq!(config.server.max_sessions, 10_000);
        assert_eq!(config.retrieval.top_k, 3);
        assert_eq!(config.retrieval.table, "medicalbot");
        assert!(config.llm.system_prompt.ends_with(CONTEXT_PLACEHOLDER));
    }

    #[test]
    fn test_config_deserialize_empty_uses_defaults() {
        let config: MedbotConfig = toml::from_str("").unwrap();
        assert_eq!(config.client.greeting, DEFAULT_GREETING);
        assert_eq!(config.client.fallback_message, DEFAULT_FALLBACK_MESSAGE);
        assert_eq!(config.llm.api_key_env, "TOGETHER_API_KEY");
        assert!(config.server.web_dir.is_none());
    }

    #[test]
    fn test_config_deserialize_partial_sections() {
        let toml_str = r#"
[client]
endpoint = "http://medbot.local/get"
request_timeout_secs = 5

[server]
port = 9000
web_dir = "static"

[answer]
unwanted_phrases = ["As an AI"]

[retrieval]
enabled = false
top_k = 5
"#;
        let config: MedbotConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.client.endpoint, "http://medbot.local/get");
        assert_eq!(config.client.request_timeout_secs, 5);
        // Untouched fields in a present section keep their defaults
        assert_eq!(config.client.avatar, DEFAULT_AVATAR);
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.web_dir.as_deref(), Some("static"));
        assert_eq!(config.answer.unwanted_phrases, vec!["As an AI".to_string()]);
        assert_eq!(config.llm.model, "mistralai/Mixtral-8x7B-Instruct-v0.1");
        assert!(!config.retrieval.enabled);
        assert_eq!(config.retrieval.top_k, 5);
        assert_eq!(config.retrieval.chunk_size, 500);
        assert_eq!(config.server.session_idle_secs, 1800);
    }
}
