//! Logging infrastructure for City Explorer
//!
//! Centralized `tracing` subscriber setup. The binary calls
//! [`init_logger`] once at startup.

use city_explorer_core::{ExplorerConfig, ExplorerError, Result};
use std::str::FromStr;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Logger configuration
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Whether to use JSON format
    pub json_format: bool,
    /// Whether to include timestamps
    pub with_timestamps: bool,
    /// Whether to include file/line information
    pub with_file_info: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
            with_timestamps: true,
            with_file_info: false,
        }
    }
}

impl From<&ExplorerConfig> for LoggerConfig {
    fn from(config: &ExplorerConfig) -> Self {
        Self {
            level: config.log_level.clone(),
            json_format: config.log_json,
            ..Self::default()
        }
    }
}

/// Initialize the global logger with the given configuration
pub fn init_logger(config: LoggerConfig) -> Result<()> {
    let level = LogLevel::parse(&config.level)?;

    let env_filter = EnvFilter::from_default_env()
        .add_directive(level.into())
        .add_directive(quiet("hyper")?)
        .add_directive(quiet("reqwest")?)
        .add_directive(quiet("sqlx")?);

    let fmt_layer = if config.json_format {
        fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_file(config.with_file_info)
            .with_line_number(config.with_file_info)
            .boxed()
    } else {
        let layer = fmt::layer()
            .with_target(true)
            .with_file(config.with_file_info)
            .with_line_number(config.with_file_info);

        if config.with_timestamps {
            layer.boxed()
        } else {
            layer.without_time().boxed()
        }
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| ExplorerError::config(format!("Failed to initialize logger: {}", e)))?;

    tracing::info!("Logger initialized with level: {}", config.level);
    Ok(())
}

fn quiet(target: &str) -> Result<tracing_subscriber::filter::Directive> {
    format!("{}=warn", target)
        .parse()
        .map_err(|e| ExplorerError::config(format!("Invalid log directive for {}: {}", target, e)))
}

/// Log level utilities
pub struct LogLevel;

impl LogLevel {
    /// Parse log level from string
    pub fn parse(level: &str) -> Result<Level> {
        Level::from_str(level).map_err(|e| {
            ExplorerError::validation(format!("Invalid log level '{}': {}", level, e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logger_config_default() {
        let config = LoggerConfig::default();
        assert_eq!(config.level, "info");
        assert!(!config.json_format);
        assert!(config.with_timestamps);
        assert!(!config.with_file_info);
    }

    #[test]
    fn test_log_level_parse() {
        assert!(LogLevel::parse("info").is_ok());
        assert!(LogLevel::parse("debug").is_ok());
        assert!(LogLevel::parse("invalid").is_err());
    }

    #[test]
    fn test_quiet_directive() {
        assert!(quiet("hyper").is_ok());
    }

    #[test]
    fn test_init_rejects_bad_level() {
        let config = LoggerConfig {
            level: "loud".to_string(),
            ..LoggerConfig::default()
        };
        assert!(init_logger(config).is_err());
    }
}
