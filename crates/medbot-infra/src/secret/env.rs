//! Environment variable secret provider.
//!
//! Read-only: keys are looked up by variable name and handed out wrapped in
//! [`SecretString`], so they never show up in Debug output or logs.

use secrecy::SecretString;

/// Reads secrets from environment variables.
#[derive(Debug, Default)]
pub struct EnvSecretProvider;

impl EnvSecretProvider {
    pub fn new() -> Self {
        Self
    }

    /// Look up `key` as an environment variable name.
    ///
    /// Unset, empty, and non-Unicode values all count as missing.
    pub fn get(&self, key: &str) -> Option<SecretString> {
        match std::env::var(key) {
            Ok(val) if !val.trim().is_empty() => Some(SecretString::from(val)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn test_env_provider_get_existing() {
        // SAFETY: the variable name is unique to this test.
        unsafe { std::env::set_var("MEDBOT_TEST_SECRET_1", "test-value-123") };

        let provider = EnvSecretProvider::new();
        let secret = provider.get("MEDBOT_TEST_SECRET_1").unwrap();
        assert_eq!(secret.expose_secret(), "test-value-123");

        // SAFETY: the var was just set above.
        unsafe { std::env::remove_var("MEDBOT_TEST_SECRET_1") };
    }

    #[test]
    fn test_env_provider_get_missing() {
        let provider = EnvSecretProvider::new();
        assert!(provider.get("NONEXISTENT_VAR_XYZ_123").is_none());
    }

    #[test]
    fn test_env_provider_blank_is_missing() {
        // SAFETY: the variable name is unique to this test.
        unsafe { std::env::set_var("MEDBOT_TEST_SECRET_BLANK", "  ") };
        assert!(EnvSecretProvider::new().get("MEDBOT_TEST_SECRET_BLANK").is_none());
        // SAFETY: the var was just set above.
        unsafe { std::env::remove_var("MEDBOT_TEST_SECRET_BLANK") };
    }
}
