//! LLM provider implementations.
//!
//! Contains the OpenAI-compatible implementation of the [`LlmProvider`]
//! trait defined in `medbot-core`, and a factory ([`create_provider`]) that
//! builds it from [`LlmConfig`].
//!
//! [`LlmProvider`]: medbot_core::llm::provider::LlmProvider

pub mod openai_compat;

use secrecy::SecretString;

use medbot_core::llm::box_provider::BoxLlmProvider;
use medbot_types::config::LlmConfig;
use medbot_types::llm::LlmError;

use self::openai_compat::OpenAiCompatibleProvider;
use self::openai_compat::config::OpenAiCompatConfig;

/// Create a [`BoxLlmProvider`] from the `[llm]` config section.
///
/// # Errors
///
/// Returns [`LlmError::AuthenticationFailed`] when no API key was found.
pub fn create_provider(
    config: &LlmConfig,
    api_key: Option<SecretString>,
) -> Result<BoxLlmProvider, LlmError> {
    let api_key = api_key.ok_or(LlmError::AuthenticationFailed)?;
    let provider = OpenAiCompatibleProvider::new(OpenAiCompatConfig {
        provider_name: config.provider_name.clone(),
        base_url: config.base_url.clone(),
        api_key,
        model: config.model.clone(),
    });
    Ok(BoxLlmProvider::new(provider))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_provider_uses_configured_name() {
        let config = LlmConfig::default();
        let provider = create_provider(&config, Some(SecretString::from("tg-key"))).unwrap();
        assert_eq!(provider.name(), "together");
    }

    #[test]
    fn test_create_provider_missing_key() {
        let result = create_provider(&LlmConfig::default(), None);
        match result {
            Err(LlmError::AuthenticationFailed) => {}
            Err(other) => panic!("Expected AuthenticationFailed, got: {other}"),
            Ok(_) => panic!("Expected error but got Ok"),
        }
    }
}
