//! Fixed-vocabulary BPE token counting.
//!
//! Uses tiktoken-rs with lazy-loaded encoders. The cl100k_base vocabulary
//! is shared by the OpenAI GPT-3.5/4 and Claude families; r50k_base (the
//! GPT-2 merge table) serves as the fallback for unrecognized models.

use std::sync::OnceLock;
use tiktoken_rs::{cl100k_base, r50k_base, CoreBPE};

// Lazy-loaded encoder instances (thread-safe singletons)
static CL100K: OnceLock<CoreBPE> = OnceLock::new();
static R50K: OnceLock<CoreBPE> = OnceLock::new();

/// Get the cl100k_base encoder (lazy-loaded)
fn get_cl100k() -> &'static CoreBPE {
    CL100K.get_or_init(|| cl100k_base().expect("Failed to load cl100k_base encoder"))
}

/// Get the r50k_base fallback encoder (lazy-loaded)
fn get_r50k() -> &'static CoreBPE {
    R50K.get_or_init(|| r50k_base().expect("Failed to load r50k_base encoder"))
}

/// Count tokens under the cl100k_base vocabulary
///
/// Special tokens are not expanded; the count matches a plain encode of the
/// text, so empty text counts zero.
///
/// # Example
/// ```
/// use tokenmeter::tokenizer::count_cl100k;
///
/// let tokens = count_cl100k("Hello, world!");
/// assert!(tokens > 0);
/// assert!(tokens < 10);
/// ```
pub fn count_cl100k(text: &str) -> usize {
    get_cl100k().encode_ordinary(text).len()
}

/// Count tokens under the r50k_base (GPT-2) fallback vocabulary
pub fn count_r50k(text: &str) -> usize {
    get_r50k().encode_ordinary(text).len()
}
