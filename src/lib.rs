//! # Tokenmeter - LLM Token Counting Service
//!
//! HTTP service that counts how many tokens a piece of text or a chat
//! conversation would consume under several LLM tokenization schemes.
//!
//! ## Counting strategies
//!
//! | Selector | Strategy                                              |
//! |----------|-------------------------------------------------------|
//! | `openai` | cl100k_base vocabulary (tiktoken)                     |
//! | `claude` | cl100k_base vocabulary (shared with OpenAI)           |
//! | `gemini` | remote `countTokens` API (needs `GEMINI_API_KEY`)     |
//! | `llama`  | pretrained Hugging Face tokenizer, cached per process |
//! | other    | r50k_base (GPT-2) fallback on `/count`; rejected on `/chat-count` |
//!
//! ## Chat overhead accounting
//!
//! Chat counts add each provider's fixed framing costs on top of the raw
//! content encodings: OpenAI wraps every message in 4 tokens and primes the
//! assistant reply with 2 more; Claude wraps every message in 6; Llama
//! spends 1 beginning-of-sequence token per conversation and 2 instruction
//! wrapper tokens per message. Gemini conversations are flattened and
//! counted remotely.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use tokenmeter::engine::CountEngine;
//!
//! let engine = CountEngine::new()?;
//! let tokens = engine.count_text("openai", "Hello, world!", None).await?;
//! println!("{tokens} tokens");
//! ```
//!
//! ## Modules
//!
//! - [`engine`]: counting dispatch and chat overhead accounting
//! - [`tokenizer`]: local vocabulary encoders and the pretrained cache
//! - [`gemini`]: remote provider counting adapter
//! - [`server`]: HTTP API server (Axum-based)
//! - [`models`]: message types and model selector parsing
//! - [`config`]: configuration management
//! - [`error`]: error types and result alias

pub mod config;
pub mod engine;
pub mod error;
pub mod gemini;
pub mod models;
pub mod server;
pub mod tokenizer;

// Re-exports for convenience
pub use config::Config;
pub use engine::CountEngine;
pub use error::{Error, Result};
pub use gemini::GeminiClient;
pub use models::{ChatMessage, ModelKind, Role};
pub use server::{AppState, ServerConfig};
pub use tokenizer::{count_cl100k, count_r50k, HubTokenizers};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
