//! LocationIQ geocoding client

use async_trait::async_trait;
use city_explorer_core::types::GeocodeResult;
use city_explorer_core::{ExplorerError, Geocoder, Result};
use reqwest::StatusCode;
use std::fmt;

const PROVIDER: &str = "locationiq";

/// LocationIQ client configuration
#[derive(Clone)]
pub struct LocationIqConfig {
    pub base_url: String,
    pub api_key: String,
}

impl fmt::Debug for LocationIqConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocationIqConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Client for the LocationIQ forward geocoding API
#[derive(Debug, Clone)]
pub struct LocationIqClient {
    config: LocationIqConfig,
    client: reqwest::Client,
}

impl LocationIqClient {
    /// Create a new client sharing the given HTTP client
    pub fn new(config: LocationIqConfig, client: reqwest::Client) -> Self {
        Self { config, client }
    }
}

#[async_trait]
impl Geocoder for LocationIqClient {
    async fn search(&self, query: &str) -> Result<Vec<GeocodeResult>> {
        tracing::debug!("Geocoding '{}'", query);

        let response = self
            .client
            .get(&self.config.base_url)
            .query(&[
                ("key", self.config.api_key.as_str()),
                ("q", query),
                ("format", "json"),
            ])
            .send()
            .await
            // The query string carries the API key.
            .map_err(reqwest::Error::without_url)?;

        // LocationIQ answers 404 "Unable to geocode" when nothing matches.
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }

        if !response.status().is_success() {
            return Err(ExplorerError::provider(
                PROVIDER,
                format!("API returned error: {}", response.status()),
            ));
        }

        response.json::<Vec<GeocodeResult>>().await.map_err(|e| {
            ExplorerError::provider(PROVIDER, format!("Failed to parse response: {}", e))
        })
    }
}
