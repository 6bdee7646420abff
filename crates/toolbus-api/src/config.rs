//! Server configuration loading.
//!
//! Reads an optional TOML config file and deserializes it into
//! [`ServerConfig`]. Falls back to defaults when the file is missing or
//! malformed -- the server always starts.

use std::path::Path;

use toolbus_types::config::ServerConfig;

/// Load the server configuration from a TOML file.
///
/// - If the file does not exist, returns [`ServerConfig::default()`]
///   (`0.0.0.0:8000`).
/// - If the file exists but cannot be read or parsed, logs a warning and
///   returns the default.
pub async fn load_config(path: &Path) -> ServerConfig {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return ServerConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", path.display());
            return ServerConfig::default();
        }
    };

    match toml::from_str::<ServerConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                path.display()
            );
            ServerConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(&tmp.path().join("toolbus.toml")).await;
        assert_eq!(config.listen_addr(), "0.0.0.0:8000");
    }

    #[tokio::test]
    async fn load_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("toolbus.toml");
        tokio::fs::write(
            &config_path,
            r#"
host = "127.0.0.1"
port = 9000
"#,
        )
        .await
        .unwrap();

        let config = load_config(&config_path).await;
        assert_eq!(config.listen_addr(), "127.0.0.1:9000");
    }

    #[tokio::test]
    async fn load_config_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("toolbus.toml");
        tokio::fs::write(&config_path, "this is not { valid toml !!!")
            .await
            .unwrap();

        let config = load_config(&config_path).await;
        assert_eq!(config.listen_addr(), "0.0.0.0:8000");
    }
}
