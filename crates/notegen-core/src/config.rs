//! Configuration - endpoints and API key
//!
//! Layered the usual way: optional TOML file under the platform config
//! directory, overridden by `NOTEGEN_*` environment variables.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Endpoints and credentials for the generation and extraction services
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Streaming text-generation endpoint (`POST {text, mode}`)
    #[serde(default)]
    pub generate_url: String,
    /// Non-streaming OCR endpoint (`POST {fileBase64, mimeType, fileType}`)
    #[serde(default)]
    pub extract_url: String,
    /// Bearer token added to outgoing requests when present
    #[serde(default)]
    pub api_key: Option<String>,
}

impl Config {
    /// Load the config file (if any) and apply environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Some(path) if path.exists() => {
                let raw = std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read {}", path.display()))?;
                toml::from_str(&raw)
                    .with_context(|| format!("invalid config at {}", path.display()))?
            }
            _ => Self::default(),
        };

        if let Ok(url) = std::env::var("NOTEGEN_GENERATE_URL") {
            config.generate_url = url;
        }
        if let Ok(url) = std::env::var("NOTEGEN_EXTRACT_URL") {
            config.extract_url = url;
        }
        if let Ok(key) = std::env::var("NOTEGEN_API_KEY") {
            config.api_key = Some(key);
        }

        Ok(config)
    }

    /// `<config dir>/notegen/config.toml`
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("notegen").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_toml() {
        let config: Config = toml::from_str(
            r#"
            generate_url = "https://example.test/generate"
            extract_url = "https://example.test/extract"
            api_key = "secret"
            "#,
        )
        .unwrap();
        assert_eq!(config.generate_url, "https://example.test/generate");
        assert_eq!(config.api_key.as_deref(), Some("secret"));
    }

    #[test]
    fn test_missing_fields_default() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.generate_url.is_empty());
        assert!(config.api_key.is_none());
    }
}
