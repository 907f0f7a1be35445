//! City Explorer Infrastructure Library
//!
//! HTTP clients for the geocoding, restaurant and trail providers, plus
//! logging setup.

use city_explorer_core::{ExplorerConfig, Result};

pub mod geocoding;
pub mod logger;
pub mod trails;
pub mod yelp;

pub use geocoding::{LocationIqClient, LocationIqConfig};
pub use logger::{init_logger, LogLevel, LoggerConfig};
pub use trails::{HikingProjectClient, HikingProjectConfig};
pub use yelp::{YelpClient, YelpConfig};

/// Infrastructure version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build the HTTP client shared by all provider clients
///
/// Transport defaults apply; no request timeout is set.
pub fn build_http_client() -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(format!("city-explorer/{}", VERSION))
        .build()?;
    Ok(client)
}

/// The three provider clients, configured from the environment
#[derive(Debug, Clone)]
pub struct ProviderClients {
    pub geocoder: LocationIqClient,
    pub restaurants: YelpClient,
    pub trails: HikingProjectClient,
}

impl ProviderClients {
    /// Create all provider clients over one shared HTTP client
    pub fn from_config(config: &ExplorerConfig) -> Result<Self> {
        let client = build_http_client()?;

        tracing::info!("Geocoding provider: {}", config.location_api_url);
        tracing::info!("Restaurant provider: {}", config.yelp_api_url);
        tracing::info!("Trail provider: {}", config.trail_api_url);

        Ok(Self {
            geocoder: LocationIqClient::new(
                LocationIqConfig {
                    base_url: config.location_api_url.clone(),
                    api_key: config.location_key.clone(),
                },
                client.clone(),
            ),
            restaurants: YelpClient::new(
                YelpConfig {
                    base_url: config.yelp_api_url.clone(),
                    api_key: config.yelp_key.clone(),
                },
                client.clone(),
            ),
            trails: HikingProjectClient::new(
                HikingProjectConfig {
                    base_url: config.trail_api_url.clone(),
                    api_key: config.trail_key.clone(),
                },
                client,
            ),
        })
    }
}
