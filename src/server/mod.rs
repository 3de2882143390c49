//! Token counting HTTP server.
//!
//! Provides the HTTP API:
//! - `POST /count` - count tokens in a single piece of text
//! - `POST /chat-count` - count tokens in a chat conversation, including
//!   per-provider framing overhead
//! - `GET /health` - liveness check
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tokenmeter::server::{create_router, AppState, ServerConfig};
//!
//! let config = ServerConfig::default().with_port(8000);
//! let state = Arc::new(AppState::new(config.clone())?);
//! let app = create_router(state);
//! let listener = tokio::net::TcpListener::bind(config.addr).await?;
//! axum::serve(listener, app).await?;
//! ```

mod config;
mod handlers;
mod state;

pub use config::ServerConfig;
pub use handlers::{create_router, health_check};
pub use state::AppState;
