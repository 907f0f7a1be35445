//! Error handling for City Explorer core library

use std::fmt;
use thiserror::Error;

/// Result type alias for City Explorer operations
pub type Result<T> = std::result::Result<T, ExplorerError>;

/// Main error type for City Explorer operations
#[derive(Error, Debug)]
pub enum ExplorerError {
    /// HTTP client errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Database driver errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration errors
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Configuration loading errors
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// URL parsing errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Upstream data provider errors
    #[error("Provider error ({provider}): {message}")]
    Provider { provider: String, message: String },

    /// Location store errors
    #[error("Store error: {message}")]
    Store { message: String },

    /// Invalid configuration values
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Network connectivity errors
    #[error("Network error: {message}")]
    Network { message: String },

    /// Validation errors
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Resource not found errors
    #[error("Resource not found: {resource}")]
    NotFound { resource: String },
}

impl ExplorerError {
    /// Create a provider error
    pub fn provider<P: Into<String>, S: Into<String>>(provider: P, message: S) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Create a store error
    pub fn store<S: Into<String>>(message: S) -> Self {
        Self::Store {
            message: message.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a network error
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found<S: Into<String>>(resource: S) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Get error category for logging and response mapping
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Http(_) | Self::Network { .. } => ErrorCategory::Network,
            Self::Json(_) => ErrorCategory::Serialization,
            Self::Database(_) | Self::Migration(_) | Self::Store { .. } => ErrorCategory::Store,
            Self::Config(_) | Self::InvalidConfig { .. } | Self::Url(_) => {
                ErrorCategory::Configuration
            }
            Self::Provider { .. } => ErrorCategory::Provider,
            Self::Validation { .. } => ErrorCategory::Validation,
            Self::NotFound { .. } => ErrorCategory::NotFound,
        }
    }
}

/// Error categories for logging and response mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Network,
    Serialization,
    Store,
    Configuration,
    Provider,
    Validation,
    NotFound,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network => write!(f, "network"),
            Self::Serialization => write!(f, "serialization"),
            Self::Store => write!(f, "store"),
            Self::Configuration => write!(f, "configuration"),
            Self::Provider => write!(f, "provider"),
            Self::Validation => write!(f, "validation"),
            Self::NotFound => write!(f, "not_found"),
        }
    }
}
