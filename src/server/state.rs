//! Server state.

use std::time::{Duration, Instant};

use super::config::ServerConfig;
use crate::engine::CountEngine;
use crate::error::Result;
use crate::gemini::GeminiClient;

/// Application state shared across handlers
pub struct AppState {
    /// Server configuration
    pub config: ServerConfig,
    /// Counting engine (tokenizer cache + remote client)
    pub engine: CountEngine,
    /// Server start time
    pub start_time: Instant,
}

impl AppState {
    /// Create new application state
    pub fn new(config: ServerConfig) -> Result<Self> {
        let gemini = GeminiClient::new()?.with_model(config.gemini_model.clone());
        let engine = CountEngine::new()?.with_gemini(gemini);

        Ok(Self {
            config,
            engine,
            start_time: Instant::now(),
        })
    }

    /// Get server uptime
    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }
}
