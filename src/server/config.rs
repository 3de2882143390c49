//! Server configuration.

use std::net::SocketAddr;

use crate::config::default_origins;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address
    pub addr: SocketAddr,
    /// Origins allowed cross-origin access
    pub allowed_origins: Vec<String>,
    /// Model whose tokenizer the remote provider counts against
    pub gemini_model: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:8000".parse().unwrap(),
            allowed_origins: default_origins(),
            gemini_model: crate::gemini::DEFAULT_GEMINI_MODEL.to_string(),
        }
    }
}

impl ServerConfig {
    /// Create with custom port
    pub fn with_port(mut self, port: u16) -> Self {
        self.addr = SocketAddr::from((self.addr.ip(), port));
        self
    }

    /// Bind to all interfaces
    pub fn bind_all(mut self) -> Self {
        let port = self.addr.port();
        self.addr = format!("0.0.0.0:{port}").parse().unwrap();
        self
    }

    /// Set address directly
    pub fn with_addr(mut self, addr: SocketAddr) -> Self {
        self.addr = addr;
        self
    }

    /// Replace the origin allow-list
    pub fn with_origins(mut self, origins: Vec<String>) -> Self {
        self.allowed_origins = origins;
        self
    }

    /// Set the remote counting model
    pub fn with_gemini_model(mut self, model: impl Into<String>) -> Self {
        self.gemini_model = model.into();
        self
    }
}
