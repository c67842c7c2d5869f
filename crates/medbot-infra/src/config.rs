//! Configuration loader for MedBot.
//!
//! Reads `config.toml` from the data directory (`~/.medbot/` by default)
//! or from an explicit path, and deserializes it into [`MedbotConfig`].

use std::path::{Path, PathBuf};

use medbot_types::config::MedbotConfig;
use medbot_types::error::ConfigError;

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `MEDBOT_DATA_DIR` environment variable
/// 2. `~/.medbot`
/// 3. `.medbot` in the current directory
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("MEDBOT_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".medbot");
    }

    PathBuf::from(".medbot")
}

/// Load configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`MedbotConfig::default()`].
/// - If the file exists but cannot be read or parsed, logs a warning and
///   returns the default.
pub async fn load_config(data_dir: &Path) -> MedbotConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return MedbotConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return MedbotConfig::default();
        }
    };

    match toml::from_str::<MedbotConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            MedbotConfig::default()
        }
    }
}

/// Load configuration from a path the user named explicitly.
///
/// Unlike [`load_config`], a missing or malformed file is an error.
pub async fn load_config_file(path: &Path) -> Result<MedbotConfig, ConfigError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|err| ConfigError::Read {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;

    toml::from_str(&content).map_err(|err| ConfigError::Parse {
        path: path.display().to_string(),
        message: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).await;
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.client.request_timeout_secs, 60);
    }

    #[tokio::test]
    async fn load_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(
            tmp.path().join("config.toml"),
            r#"
[server]
port = 5005
history_limit = 4

[llm]
model = "meta-llama/Llama-3-8b-chat-hf"
"#,
        )
        .await
        .unwrap();

        let config = load_config(tmp.path()).await;
        assert_eq!(config.server.port, 5005);
        assert_eq!(config.server.history_limit, 4);
        assert_eq!(config.llm.model, "meta-llama/Llama-3-8b-chat-hf");
        assert_eq!(config.llm.base_url, "https://api.together.xyz/v1");
    }

    #[tokio::test]
    async fn load_config_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(tmp.path().join("config.toml"), "this is not { valid toml !!!")
            .await
            .unwrap();

        let config = load_config(tmp.path()).await;
        assert_eq!(config.server.port, 8080);
    }

    #[tokio::test]
    async fn load_config_file_reports_missing_and_malformed() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("medbot.toml");

        let err = load_config_file(&path).await.unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));

        tokio::fs::write(&path, "[client\nendpoint = 1").await.unwrap();
        let err = load_config_file(&path).await.unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));

        tokio::fs::write(&path, "[client]\nendpoint = \"http://x/get\"").await.unwrap();
        let config = load_config_file(&path).await.unwrap();
        assert_eq!(config.client.endpoint, "http://x/get");
    }
}
