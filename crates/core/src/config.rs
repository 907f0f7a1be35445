//! Configuration types for City Explorer core library
//!
//! All settings come from the process environment. Keys are matched
//! case-insensitively, so `DATABASE_URL` populates `database_url`.

use crate::{ExplorerError, Result};
use config::{Config, Environment};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use url::Url;

/// Default LocationIQ search endpoint
pub const DEFAULT_LOCATION_API_URL: &str = "https://us1.locationiq.com/v1/search.php";

/// Default Yelp business search endpoint
pub const DEFAULT_YELP_API_URL: &str = "https://api.yelp.com/v3/businesses/search";

/// Default Hiking Project trail search endpoint
pub const DEFAULT_TRAIL_API_URL: &str = "https://www.hikingproject.com/data/get-trails";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplorerConfig {
    /// Address the server binds to
    #[serde(default = "default_host")]
    pub host: String,
    /// Listening port
    pub port: u16,
    /// PostgreSQL connection string
    pub database_url: String,
    /// LocationIQ API key
    pub location_key: String,
    /// Yelp Fusion API key
    pub yelp_key: String,
    /// Hiking Project API key
    pub trail_key: String,
    /// Geocoding endpoint override
    #[serde(default = "default_location_api_url")]
    pub location_api_url: String,
    /// Business search endpoint override
    #[serde(default = "default_yelp_api_url")]
    pub yelp_api_url: String,
    /// Trail search endpoint override
    #[serde(default = "default_trail_api_url")]
    pub trail_api_url: String,
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Emit logs as JSON
    #[serde(default)]
    pub log_json: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_location_api_url() -> String {
    DEFAULT_LOCATION_API_URL.to_string()
}

fn default_yelp_api_url() -> String {
    DEFAULT_YELP_API_URL.to_string()
}

fn default_trail_api_url() -> String {
    DEFAULT_TRAIL_API_URL.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl ExplorerConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_environment(Environment::default())
    }

    /// Load configuration from an explicit environment source
    ///
    /// Tests hand in `Environment::default().source(Some(map))` so they never
    /// touch the real process environment.
    pub fn from_environment(environment: Environment) -> Result<Self> {
        let settings = Config::builder()
            .add_source(environment.try_parsing(true))
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.port == 0 {
            return Err(ExplorerError::config("PORT cannot be 0"));
        }

        if self.database_url.trim().is_empty() {
            return Err(ExplorerError::config("DATABASE_URL cannot be empty"));
        }

        for (name, key) in [
            ("LOCATION_KEY", &self.location_key),
            ("YELP_KEY", &self.yelp_key),
            ("TRAIL_KEY", &self.trail_key),
        ] {
            if key.trim().is_empty() {
                return Err(ExplorerError::config(format!("{} cannot be empty", name)));
            }
        }

        for url in [
            &self.location_api_url,
            &self.yelp_api_url,
            &self.trail_api_url,
        ] {
            Url::parse(url)?;
        }

        self.bind_address()?;

        Ok(())
    }

    /// Socket address the server binds to
    pub fn bind_address(&self) -> Result<SocketAddr> {
        socket_address(&self.host, self.port)
    }
}

/// Build a socket address from an IPv4 or IPv6 host literal and a port
///
/// IPv6 hosts may be given bare (`::`) or bracketed (`[::1]`).
pub fn socket_address(host: &str, port: u16) -> Result<SocketAddr> {
    let literal = host.trim();
    let literal = literal
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .unwrap_or(literal);

    let ip: IpAddr = literal.parse().map_err(|e| {
        ExplorerError::config(format!("HOST must be an IP address, got '{}': {}", host, e))
    })?;

    Ok(SocketAddr::from((ip, port)))
}
