//! Vocabulary encoders used for local token counting.
//!
//! Two kinds of tokenizers live here:
//!
//! - [`bpe`]: fixed tiktoken vocabularies (cl100k_base for the OpenAI and
//!   Claude families, r50k_base as the fallback), lazy-loaded once per
//!   process.
//! - [`hub`]: pretrained Hugging Face tokenizers loaded by identifier and
//!   memoized for the process lifetime.

pub mod bpe;
pub mod hub;

pub use bpe::{count_cl100k, count_r50k};
pub use hub::{HubTokenizers, DEFAULT_HUB_TOKENIZER};
