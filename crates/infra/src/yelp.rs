//! Yelp Fusion business search client

use async_trait::async_trait;
use city_explorer_core::types::{PageRequest, YelpBusiness, YelpSearchResponse};
use city_explorer_core::{ExplorerError, RestaurantSource, Result};
use std::fmt;

const PROVIDER: &str = "yelp";

/// Yelp client configuration
#[derive(Clone)]
pub struct YelpConfig {
    pub base_url: String,
    pub api_key: String,
}

impl fmt::Debug for YelpConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("YelpConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Client for the Yelp business search endpoint
#[derive(Debug, Clone)]
pub struct YelpClient {
    config: YelpConfig,
    client: reqwest::Client,
}

impl YelpClient {
    pub fn new(config: YelpConfig, client: reqwest::Client) -> Self {
        Self { config, client }
    }
}

#[async_trait]
impl RestaurantSource for YelpClient {
    async fn search_restaurants(
        &self,
        latitude: f64,
        longitude: f64,
        page: PageRequest,
    ) -> Result<Vec<YelpBusiness>> {
        tracing::debug!(
            "Searching restaurants near ({}, {}), limit={}, offset={}",
            latitude,
            longitude,
            page.limit(),
            page.offset()
        );

        let response = self
            .client
            .get(&self.config.base_url)
            .bearer_auth(&self.config.api_key)
            .query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("limit", page.limit().to_string()),
                ("offset", page.offset().to_string()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ExplorerError::provider(
                PROVIDER,
                format!("API returned error: {}", response.status()),
            ));
        }

        let body: YelpSearchResponse = response.json().await.map_err(|e| {
            ExplorerError::provider(PROVIDER, format!("Failed to parse response: {}", e))
        })?;

        Ok(body.businesses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn client_for(server: &mockito::ServerGuard) -> YelpClient {
        YelpClient::new(
            YelpConfig {
                base_url: format!("{}/v3/businesses/search", server.url()),
                api_key: "yelp-secret".to_string(),
            },
            reqwest::Client::new(),
        )
    }

    #[tokio::test]
    async fn test_search_sends_page_window_and_bearer_token() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v3/businesses/search")
            .match_header("authorization", "Bearer yelp-secret")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("latitude".into(), "47.6".into()),
                Matcher::UrlEncoded("longitude".into(), "-122.3".into()),
                Matcher::UrlEncoded("limit".into(), "5".into()),
                Matcher::UrlEncoded("offset".into(), "6".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"total": 2, "businesses": [
                    {"id":"a","url":"https://yelp.com/biz/a","name":"Pike Place Chowder","rating":4.5,"price":"$$","image_url":"https://img/a.jpg"},
                    {"id":"b","url":"https://yelp.com/biz/b","name":"Piroshky Piroshky","rating":4.0,"image_url":"https://img/b.jpg"}
                ]}"#,
            )
            .create_async()
            .await;

        let page = PageRequest::new(2).unwrap();
        let businesses = client_for(&server)
            .search_restaurants(47.6, -122.3, page)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(businesses.len(), 2);
        assert_eq!(businesses[0].name, "Pike Place Chowder");
        assert_eq!(businesses[0].price.as_deref(), Some("$$"));
        assert!(businesses[1].price.is_none());
    }

    #[tokio::test]
    async fn test_missing_businesses_field_is_empty() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/v3/businesses/search")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"total": 0}"#)
            .create_async()
            .await;

        let businesses = client_for(&server)
            .search_restaurants(0.0, 0.0, PageRequest::default())
            .await
            .unwrap();
        assert!(businesses.is_empty());
    }

    #[tokio::test]
    async fn test_error_status_is_provider_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/v3/businesses/search")
            .match_query(Matcher::Any)
            .with_status(500)
            .create_async()
            .await;

        let err = client_for(&server)
            .search_restaurants(1.0, 2.0, PageRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ExplorerError::Provider { .. }));
        assert!(err.to_string().contains("500"));
    }
}
