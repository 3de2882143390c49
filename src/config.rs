//! Configuration management.
//!
//! Supports configuration from:
//! - TOML config files
//! - Environment variables
//! - CLI arguments (see the binary)

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::gemini::DEFAULT_GEMINI_MODEL;

/// Main configuration struct
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerSection,

    /// Cross-origin access settings
    #[serde(default)]
    pub cors: CorsSection,

    /// Remote counting provider settings
    #[serde(default)]
    pub gemini: GeminiSection,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| Error::Config(format!("Failed to read config file: {e}")))?;

        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config: {e}")))
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(host) = std::env::var("TOKENMETER_HOST") {
            config.server.host = host;
        }
        if let Ok(port) = std::env::var("TOKENMETER_PORT") {
            if let Ok(port) = port.parse() {
                config.server.port = port;
            }
        }
        if let Ok(origins) = std::env::var("TOKENMETER_CORS_ORIGINS") {
            config.cors.origins = origins
                .split(',')
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect();
        }
        if let Ok(model) = std::env::var("TOKENMETER_GEMINI_MODEL") {
            config.gemini.model = model;
        }

        config
    }
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    /// Host to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

impl ServerSection {
    /// Get the full listen address
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Cross-origin access settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsSection {
    /// Origins allowed to call the API
    pub origins: Vec<String>,
}

impl Default for CorsSection {
    fn default() -> Self {
        Self {
            origins: default_origins(),
        }
    }
}

/// The browser origins served by default
pub fn default_origins() -> Vec<String> {
    vec![
        "http://localhost:5173".to_string(),
        "http://127.0.0.1:5173".to_string(),
        "https://token-counter.vercel.app".to_string(),
    ]
}

/// Remote counting provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiSection {
    /// Model whose tokenizer the provider counts against
    pub model: String,
}

impl Default for GeminiSection {
    fn default() -> Self {
        Self {
            model: DEFAULT_GEMINI_MODEL.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.cors.origins.len(), 3);
        assert_eq!(config.gemini.model, DEFAULT_GEMINI_MODEL);
    }

    #[test]
    fn test_listen_addr() {
        let section = ServerSection::default();
        assert_eq!(section.listen_addr(), "127.0.0.1:8000");
    }

    #[test]
    fn test_config_from_toml() {
        let toml = r#"
            [server]
            host = "0.0.0.0"
            port = 9090

            [cors]
            origins = ["https://example.com"]

            [gemini]
            model = "gemini-2.0-flash"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.cors.origins, vec!["https://example.com"]);
        assert_eq!(config.gemini.model, "gemini-2.0-flash");
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str("[server]\nport = 3001\n").unwrap();
        assert_eq!(config.server.port, 3001);
        assert_eq!(config.cors.origins, default_origins());
    }
}
