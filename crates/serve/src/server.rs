//! Server module for City Explorer serve crate

use crate::api::create_routes;
use crate::handlers::AppState;
use crate::ServerConfig;
use axum::{
    http::{
        header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
        Method,
    },
    Router,
};
use city_explorer_core::{ExplorerError, LocationStore, Result};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

/// City Explorer HTTP server
pub struct ExplorerServer {
    config: ServerConfig,
    app: Router,
    store: Arc<dyn LocationStore>,
}

impl ExplorerServer {
    /// Create a new server instance around prepared application state
    pub fn new(config: ServerConfig, state: AppState) -> Self {
        let store = state.store().clone();
        let app = create_app(&config, state);

        Self { config, app, store }
    }

    /// Start the server
    ///
    /// Serves until Ctrl+C, then closes the location store.
    pub async fn start(self) -> Result<()> {
        let addr = self.config.bind_address()?;

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ExplorerError::network(format!("Failed to bind to {}: {}", addr, e)))?;

        tracing::info!("Listening on {}", addr);

        let served = axum::serve(listener, self.app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| ExplorerError::network(format!("Server error: {}", e)));

        self.store.close().await;
        served
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(e) => tracing::error!("Failed to listen for shutdown signal: {}", e),
    }
}

/// Create the Axum application with middleware
pub fn create_app(config: &ServerConfig, state: AppState) -> Router {
    let mut app = create_routes().with_state(state);

    // Add middleware layers
    app = app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(RequestBodyLimitLayer::new(config.max_request_size)),
    );

    // Add CORS if enabled
    if config.cors_enabled {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::OPTIONS])
            .allow_headers([ACCEPT, AUTHORIZATION, CONTENT_TYPE]);

        app = app.layer(cors);
    }

    app
}

/// Server builder for configuration
pub struct ServerBuilder {
    config: ServerConfig,
}

impl ServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self {
            config: ServerConfig::default(),
        }
    }

    /// Start from an existing configuration
    pub fn with_config(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Set the host address
    pub fn host<S: Into<String>>(mut self, host: S) -> Self {
        self.config.host = host.into();
        self
    }

    /// Set the port
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Enable or disable CORS
    pub fn cors(mut self, enabled: bool) -> Self {
        self.config.cors_enabled = enabled;
        self
    }

    /// Set maximum request size
    pub fn max_request_size(mut self, size: usize) -> Self {
        self.config.max_request_size = size;
        self
    }

    /// Build the server around prepared application state
    pub fn build(self, state: AppState) -> ExplorerServer {
        ExplorerServer::new(self.config, state)
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
