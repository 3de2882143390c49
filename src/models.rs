//! Chat message types and model selector parsing.
//!
//! The service accepts a free-form model selector string and maps it to one
//! of the supported counting strategies. Unrecognized selectors map to
//! [`ModelKind::Other`]; what happens then depends on the endpoint (the
//! single-text path falls back to the GPT-2 vocabulary, the chat path
//! rejects the request).

use serde::{Deserialize, Serialize};

/// Chat message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System prompt
    System,
    /// End-user turn
    User,
    /// Model reply turn
    Assistant,
}

impl Role {
    /// Get the wire-format name of this role
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// A single chat message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Speaker role
    pub role: Role,
    /// Message text
    pub content: String,
}

impl ChatMessage {
    /// Create a new chat message
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// Counting strategy selected by the request's `model` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ModelKind {
    /// OpenAI GPT family (cl100k_base vocabulary)
    #[default]
    OpenAi,
    /// Claude family (shares the cl100k_base vocabulary)
    Claude,
    /// Google Gemini (counted by the remote provider API)
    Gemini,
    /// Llama family (pretrained open-vocabulary tokenizer)
    Llama,
    /// Anything else
    Other,
}

impl ModelKind {
    /// Parse a model selector string (case-insensitive)
    ///
    /// # Examples
    /// ```
    /// use tokenmeter::models::ModelKind;
    ///
    /// assert_eq!(ModelKind::parse("openai"), ModelKind::OpenAi);
    /// assert_eq!(ModelKind::parse("Claude"), ModelKind::Claude);
    /// assert_eq!(ModelKind::parse("gpt-9-ultra"), ModelKind::Other);
    /// ```
    pub fn parse(selector: &str) -> Self {
        match selector.to_lowercase().as_str() {
            "openai" => ModelKind::OpenAi,
            "claude" => ModelKind::Claude,
            "gemini" => ModelKind::Gemini,
            "llama" => ModelKind::Llama,
            _ => ModelKind::Other,
        }
    }

    /// Get the selector name as string
    pub fn name(&self) -> &'static str {
        match self {
            ModelKind::OpenAi => "openai",
            ModelKind::Claude => "claude",
            ModelKind::Gemini => "gemini",
            ModelKind::Llama => "llama",
            ModelKind::Other => "other",
        }
    }
}
