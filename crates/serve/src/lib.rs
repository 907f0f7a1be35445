//! City Explorer Serve Library
//!
//! HTTP surface for City Explorer: location lookup backed by the read-through
//! cache, plus restaurant and trail listings passed through from providers.

use city_explorer_core::config::socket_address;
use city_explorer_core::{ExplorerConfig, Result};
use std::net::SocketAddr;

pub mod api;
pub mod error;
pub mod handlers;
pub mod server;

pub use api::create_routes;
pub use error::{ApiError, ErrorResponse, NotFoundResponse};
pub use handlers::AppState;
pub use server::{create_app, ExplorerServer, ServerBuilder};

/// Server version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_enabled: bool,
    pub max_request_size: usize,
}

impl ServerConfig {
    /// Socket address the server binds to
    pub fn bind_address(&self) -> Result<SocketAddr> {
        socket_address(&self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            cors_enabled: true,
            max_request_size: 1024 * 1024, // 1MB
        }
    }
}

impl From<&ExplorerConfig> for ServerConfig {
    fn from(config: &ExplorerConfig) -> Self {
        Self {
            host: config.host.clone(),
            port: config.port,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert!(config.cors_enabled);
    }

    #[test]
    fn test_bind_address_ipv6() {
        let config = ServerConfig {
            host: "::".to_string(),
            ..ServerConfig::default()
        };
        assert_eq!(config.bind_address().unwrap().to_string(), "[::]:3000");
    }
}
