//! Pretrained tokenizer cache.
//!
//! Open-vocabulary tokenizers are fetched from the Hugging Face hub by
//! identifier on first use and memoized for the process lifetime. The
//! cache is never evicted; repeated population of the same key is harmless.

use std::collections::HashMap;
use std::sync::Arc;

use tokenizers::Tokenizer;
use tokio::sync::RwLock;

use crate::error::{Error, Result};

/// Tokenizer used for the Llama family when no identifier is given
pub const DEFAULT_HUB_TOKENIZER: &str = "hf-internal-testing/llama-tokenizer";

/// Process-wide memo table of loaded pretrained tokenizers
#[derive(Clone, Default)]
pub struct HubTokenizers {
    /// Loaded tokenizers by hub identifier
    loaded: Arc<RwLock<HashMap<String, Arc<Tokenizer>>>>,
}

impl HubTokenizers {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a tokenizer by hub identifier, loading it on first use
    pub async fn get_or_load(&self, id: &str) -> Result<Arc<Tokenizer>> {
        if let Some(tokenizer) = self.loaded.read().await.get(id) {
            return Ok(tokenizer.clone());
        }

        tracing::info!("Loading pretrained tokenizer {id}");

        // from_pretrained does blocking network and file I/O
        let fetch_id = id.to_string();
        let tokenizer = tokio::task::spawn_blocking(move || {
            Tokenizer::from_pretrained(&fetch_id, None)
        })
        .await
        .map_err(|e| Error::Tokenizer(format!("Tokenizer load task failed: {e}")))?
        .map_err(|e| Error::Tokenizer(format!("Failed to load tokenizer '{id}': {e}")))?;

        let tokenizer = Arc::new(tokenizer);

        // Two concurrent misses may both load; last insert wins and both
        // instances encode identically.
        self.loaded
            .write()
            .await
            .insert(id.to_string(), tokenizer.clone());

        Ok(tokenizer)
    }

    /// Count tokens in text using the tokenizer for `id`
    ///
    /// Encodes with special tokens, so the count includes the tokenizer's
    /// beginning-of-sequence marker where one is configured.
    pub async fn count(&self, id: &str, text: &str) -> Result<usize> {
        let tokenizer = self.get_or_load(id).await?;
        let encoding = tokenizer
            .encode(text, true)
            .map_err(|e| Error::Tokenizer(e.to_string()))?;
        Ok(encoding.len())
    }

    /// Whether a tokenizer for `id` is already loaded
    pub async fn is_loaded(&self, id: &str) -> bool {
        self.loaded.read().await.contains_key(id)
    }

    /// Number of loaded tokenizers
    pub async fn len(&self) -> usize {
        self.loaded.read().await.len()
    }

    /// Whether the cache is empty
    pub async fn is_empty(&self) -> bool {
        self.loaded.read().await.is_empty()
    }
}
