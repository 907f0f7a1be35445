//! Hiking Project trail search client

use async_trait::async_trait;
use city_explorer_core::types::{HikingTrail, HikingTrailsResponse};
use city_explorer_core::{ExplorerError, Result, TrailSource};
use std::fmt;

const PROVIDER: &str = "hikingproject";

/// Hiking Project client configuration
#[derive(Clone)]
pub struct HikingProjectConfig {
    pub base_url: String,
    pub api_key: String,
}

impl fmt::Debug for HikingProjectConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HikingProjectConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Client for the Hiking Project `get-trails` endpoint
#[derive(Debug, Clone)]
pub struct HikingProjectClient {
    config: HikingProjectConfig,
    client: reqwest::Client,
}

impl HikingProjectClient {
    pub fn new(config: HikingProjectConfig, client: reqwest::Client) -> Self {
        Self { config, client }
    }
}

#[async_trait]
impl TrailSource for HikingProjectClient {
    async fn search_trails(
        &self,
        latitude: f64,
        longitude: f64,
        max_distance: u32,
    ) -> Result<Vec<HikingTrail>> {
        tracing::debug!(
            "Searching trails within {} of ({}, {})",
            max_distance,
            latitude,
            longitude
        );

        let response = self
            .client
            .get(&self.config.base_url)
            .query(&[
                ("lat", latitude.to_string()),
                ("lon", longitude.to_string()),
                ("maxDistance", max_distance.to_string()),
                ("key", self.config.api_key.clone()),
            ])
            .send()
            .await
            // The query string carries the API key.
            .map_err(reqwest::Error::without_url)?;

        if !response.status().is_success() {
            return Err(ExplorerError::provider(
                PROVIDER,
                format!("API returned error: {}", response.status()),
            ));
        }

        let body: HikingTrailsResponse = response.json().await.map_err(|e| {
            ExplorerError::provider(PROVIDER, format!("Failed to parse response: {}", e))
        })?;

        Ok(body.trails)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn client_for(server: &mockito::ServerGuard) -> HikingProjectClient {
        HikingProjectClient::new(
            HikingProjectConfig {
                base_url: format!("{}/data/get-trails", server.url()),
                api_key: "200000000-test".to_string(),
            },
            reqwest::Client::new(),
        )
    }

    #[tokio::test]
    async fn test_search_sends_radius_and_key() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/data/get-trails")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("lat".into(), "1".into()),
                Matcher::UrlEncoded("lon".into(), "2".into()),
                Matcher::UrlEncoded("maxDistance".into(), "60".into()),
                Matcher::UrlEncoded("key".into(), "200000000-test".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"trails":[{
                    "id": 7011192,
                    "name": "Rattlesnake Ledge",
                    "location": "North Bend, Washington",
                    "length": 4.3,
                    "stars": 4.4,
                    "starVotes": 82,
                    "summary": "A short climb to a viewpoint.",
                    "url": "https://www.hikingproject.com/trail/7011192",
                    "conditionStatus": "All Clear",
                    "conditionDate": "2020-05-01 14:30:00"
                }],"success":1}"#,
            )
            .create_async()
            .await;

        let trails = client_for(&server).search_trails(1.0, 2.0, 60).await.unwrap();

        mock.assert_async().await;
        assert_eq!(trails.len(), 1);
        assert_eq!(trails[0].name, "Rattlesnake Ledge");
        assert_eq!(trails[0].star_votes, 82);
        assert_eq!(trails[0].condition_date, "2020-05-01 14:30:00");
    }

    #[tokio::test]
    async fn test_error_status_is_provider_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/data/get-trails")
            .match_query(Matcher::Any)
            .with_status(503)
            .create_async()
            .await;

        let err = client_for(&server)
            .search_trails(1.0, 2.0, 60)
            .await
            .unwrap_err();
        assert!(matches!(err, ExplorerError::Provider { .. }));
    }
}
