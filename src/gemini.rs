//! Remote token counting via the Google Generative Language API.
//!
//! Gemini's tokenizer is not published, so counts come from the provider's
//! `countTokens` endpoint. The API key is read from the environment at
//! request time; its absence fails only this counting path.

use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use crate::error::{Error, Result};

/// Environment variable holding the Gemini API key
pub const GEMINI_API_KEY_VAR: &str = "GEMINI_API_KEY";

/// Default model whose tokenizer the provider counts against
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-pro-latest";

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// `countTokens` response payload
#[derive(Debug, Deserialize)]
struct CountTokensResponse {
    #[serde(rename = "totalTokens")]
    total_tokens: usize,
}

/// Client for the provider's token counting endpoint
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    base_url: String,
    model: String,
}

impl GeminiClient {
    /// Create a new client against the public API
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::Network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
        })
    }

    /// Override the API base URL (used by tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the counting model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Read the API key from the environment
    fn api_key() -> Result<String> {
        std::env::var(GEMINI_API_KEY_VAR).map_err(|_| Error::MissingApiKey {
            var: GEMINI_API_KEY_VAR,
        })
    }

    /// Count tokens in text via the remote endpoint
    ///
    /// A single outbound call; no retries.
    pub async fn count_tokens(&self, text: &str) -> Result<usize> {
        let api_key = Self::api_key()?;

        let url = format!(
            "{}/v1beta/models/{}:countTokens",
            self.base_url, self.model
        );
        let body = json!({
            "contents": [{
                "role": "user",
                "parts": [{"text": text}],
            }],
        });

        let response = self
            .client
            .post(&url)
            .query(&[("key", api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(Error::Upstream(format!(
                "countTokens returned {status}: {detail}"
            )));
        }

        let parsed: CountTokensResponse = response
            .json()
            .await
            .map_err(|e| Error::Upstream(format!("Invalid countTokens response: {e}")))?;

        Ok(parsed.total_tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_parsing() {
        let parsed: CountTokensResponse =
            serde_json::from_str(r#"{"totalTokens": 42}"#).unwrap();
        assert_eq!(parsed.total_tokens, 42);
    }

    #[test]
    fn test_builder_overrides() {
        let client = GeminiClient::new()
            .unwrap()
            .with_base_url("http://127.0.0.1:9")
            .with_model("gemini-test");

        assert_eq!(client.base_url, "http://127.0.0.1:9");
        assert_eq!(client.model, "gemini-test");
    }

    #[tokio::test]
    async fn test_missing_key_is_reported() {
        std::env::remove_var(GEMINI_API_KEY_VAR);

        let client = GeminiClient::new().unwrap();
        let err = client.count_tokens("hello").await.unwrap_err();

        assert!(matches!(err, Error::MissingApiKey { .. }));
        assert!(err.to_string().contains(GEMINI_API_KEY_VAR));
    }
}
