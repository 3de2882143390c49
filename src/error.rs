//! Error types for the token counting service.

use thiserror::Error;

/// Token counting errors.
#[derive(Error, Debug)]
pub enum Error {
    /// Remote provider credential missing from the environment.
    #[error("Gemini counting requires the {var} environment variable")]
    MissingApiKey {
        /// Name of the missing environment variable.
        var: &'static str,
    },

    /// Model selector not recognized on a path that rejects unknowns.
    #[error("Unknown model: {0}")]
    UnknownModel(String),

    /// Tokenizer loading or encoding failed.
    #[error("Tokenizer error: {0}")]
    Tokenizer(String),

    /// Remote counting provider returned a failure.
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Network communication error.
    #[error("Network error: {0}")]
    Network(String),

    /// Configuration error.
    #[error("Config error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for counting operations
pub type Result<T> = std::result::Result<T, Error>;

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Network(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<tokenizers::Error> for Error {
    fn from(err: tokenizers::Error) -> Self {
        Error::Tokenizer(err.to_string())
    }
}
