//! API module for City Explorer serve crate

use crate::handlers::{
    handle_health_check, handle_location, handle_not_found, handle_restaurants, handle_root,
    handle_trails, AppState,
};
use axum::{routing::get, Router};

/// API routes configuration
///
/// Unmatched paths, and unsupported methods on known paths, fall through to
/// a JSON 404.
pub fn create_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handle_root).fallback(handle_not_found))
        .route("/health", get(handle_health_check).fallback(handle_not_found))
        .route("/location", get(handle_location).fallback(handle_not_found))
        .route("/yelp", get(handle_restaurants).fallback(handle_not_found))
        .route("/trails", get(handle_trails).fallback(handle_not_found))
        .fallback(handle_not_found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::{HealthCheckResponse, BANNER};
    use async_trait::async_trait;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use city_explorer_core::types::{GeocodeResult, HikingTrail, PageRequest, YelpBusiness};
    use city_explorer_core::{
        Geocoder, MemoryLocationStore, Result, RestaurantSource, TrailSource,
    };
    use std::sync::Arc;

    struct NoProviders;

    #[async_trait]
    impl Geocoder for NoProviders {
        async fn search(&self, _query: &str) -> Result<Vec<GeocodeResult>> {
            Ok(Vec::new())
        }
    }

    #[async_trait]
    impl RestaurantSource for NoProviders {
        async fn search_restaurants(
            &self,
            _latitude: f64,
            _longitude: f64,
            _page: PageRequest,
        ) -> Result<Vec<YelpBusiness>> {
            Ok(Vec::new())
        }
    }

    #[async_trait]
    impl TrailSource for NoProviders {
        async fn search_trails(
            &self,
            _latitude: f64,
            _longitude: f64,
            _max_distance: u32,
        ) -> Result<Vec<HikingTrail>> {
            Ok(Vec::new())
        }
    }

    fn test_server() -> TestServer {
        let providers = Arc::new(NoProviders);
        let state = AppState::new(
            Arc::new(MemoryLocationStore::new()),
            providers.clone(),
            providers.clone(),
            providers,
        );
        TestServer::new(create_routes().with_state(state)).unwrap()
    }

    #[tokio::test]
    async fn test_root_banner() {
        let server = test_server();

        let response = server.get("/").await;
        assert_eq!(response.status_code(), StatusCode::OK);
        assert_eq!(response.text(), BANNER);
    }

    #[tokio::test]
    async fn test_health_check() {
        let server = test_server();

        let response = server.get("/health").await;
        assert_eq!(response.status_code(), StatusCode::OK);

        let health: HealthCheckResponse = response.json();
        assert_eq!(health.status, "healthy");
        assert!(health.services.database);
    }

    #[tokio::test]
    async fn test_unmatched_route_is_not_found() {
        let server = test_server();

        let response = server.get("/weather").await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.json::<serde_json::Value>(),
            serde_json::json!({ "notFound": true })
        );
    }

    #[tokio::test]
    async fn test_unsupported_method_is_not_found() {
        let server = test_server();

        let response = server.post("/location").add_query_param("city", "Seattle").await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(response.json::<serde_json::Value>()["notFound"], true);
    }

    #[tokio::test]
    async fn test_empty_listings() {
        let server = test_server();

        let response = server
            .get("/trails")
            .add_query_param("latitude", "1")
            .add_query_param("longitude", "2")
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);
        assert_eq!(response.json::<serde_json::Value>(), serde_json::json!([]));
    }
}
