//! HTTP handlers for City Explorer serve crate

use crate::error::{ApiError, NotFoundResponse};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use city_explorer_core::types::TRAIL_SEARCH_RADIUS;
use city_explorer_core::{
    ExplorerConfig, ExplorerError, Geocoder, LocationCache, LocationStore, PageRequest,
    PgLocationStore, Restaurant, RestaurantSource, Result, Trail, TrailSource,
};
use city_explorer_infra::ProviderClients;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Plain text banner served at `/`
pub const BANNER: &str = "City Explorer App";

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub locations: LocationCache,
    pub restaurants: Arc<dyn RestaurantSource>,
    pub trails: Arc<dyn TrailSource>,
}

impl AppState {
    /// Create application state from already constructed components
    pub fn new(
        store: Arc<dyn LocationStore>,
        geocoder: Arc<dyn Geocoder>,
        restaurants: Arc<dyn RestaurantSource>,
        trails: Arc<dyn TrailSource>,
    ) -> Self {
        Self {
            locations: LocationCache::new(store, geocoder),
            restaurants,
            trails,
        }
    }

    /// Connect the location store and build the provider clients
    ///
    /// Fails if the database is unreachable or its schema cannot be migrated.
    pub async fn connect(config: &ExplorerConfig) -> Result<Self> {
        let store = PgLocationStore::connect(&config.database_url).await?;
        let clients = ProviderClients::from_config(config)?;

        Ok(Self::new(
            Arc::new(store),
            Arc::new(clients.geocoder),
            Arc::new(clients.restaurants),
            Arc::new(clients.trails),
        ))
    }

    /// The location store
    pub fn store(&self) -> &Arc<dyn LocationStore> {
        self.locations.store()
    }
}

/// Root banner
pub async fn handle_root() -> impl IntoResponse {
    (StatusCode::OK, BANNER)
}

/// Handler for `/location?city=`
pub async fn handle_location(
    State(state): State<AppState>,
    Query(params): Query<LocationQuery>,
) -> std::result::Result<impl IntoResponse, ApiError> {
    let city = params
        .city
        .ok_or_else(|| ExplorerError::validation("missing required query parameter 'city'"))?;

    tracing::info!("Location request: city='{}'", city);

    let location = state.locations.get(&city).await?;
    Ok(Json(location))
}

/// Handler for `/yelp?latitude=&longitude=&page=`
pub async fn handle_restaurants(
    State(state): State<AppState>,
    Query(params): Query<RestaurantQuery>,
) -> std::result::Result<impl IntoResponse, ApiError> {
    let latitude = parse_coordinate("latitude", params.latitude.as_deref())?;
    let longitude = parse_coordinate("longitude", params.longitude.as_deref())?;
    let page = PageRequest::parse(params.page.as_deref())?;

    tracing::info!(
        "Restaurant request: latitude={}, longitude={}, page={}",
        latitude,
        longitude,
        page.page()
    );

    let restaurants: Vec<Restaurant> = state
        .restaurants
        .search_restaurants(latitude, longitude, page)
        .await?
        .into_iter()
        .map(Restaurant::from)
        .collect();

    Ok(Json(restaurants))
}

/// Handler for `/trails?latitude=&longitude=`
pub async fn handle_trails(
    State(state): State<AppState>,
    Query(params): Query<TrailQuery>,
) -> std::result::Result<impl IntoResponse, ApiError> {
    let latitude = parse_coordinate("latitude", params.latitude.as_deref())?;
    let longitude = parse_coordinate("longitude", params.longitude.as_deref())?;

    tracing::info!(
        "Trail request: latitude={}, longitude={}",
        latitude,
        longitude
    );

    let trails: Vec<Trail> = state
        .trails
        .search_trails(latitude, longitude, TRAIL_SEARCH_RADIUS)
        .await?
        .into_iter()
        .map(Trail::from)
        .collect();

    Ok(Json(trails))
}

/// Handler for server health check
pub async fn handle_health_check(State(state): State<AppState>) -> impl IntoResponse {
    let database = state.store().health_check().await;
    let status = if database { "healthy" } else { "degraded" };

    Json(HealthCheckResponse {
        status: status.to_string(),
        version: crate::VERSION.to_string(),
        timestamp: chrono::Utc::now(),
        services: ServiceStatus { database },
    })
}

/// Fallback for unmatched routes
pub async fn handle_not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(NotFoundResponse::new(None)))
}

fn parse_coordinate(name: &str, raw: Option<&str>) -> Result<f64> {
    let raw = raw
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| {
            ExplorerError::validation(format!("missing required query parameter '{}'", name))
        })?;

    raw.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| {
            ExplorerError::validation(format!("{} must be a number, got '{}'", name, raw))
        })
}

// Request types

#[derive(Debug, Deserialize)]
pub struct LocationQuery {
    pub city: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RestaurantQuery {
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub page: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TrailQuery {
    pub latitude: Option<String>,
    pub longitude: Option<String>,
}

// Response types

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub services: ServiceStatus,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ServiceStatus {
    pub database: bool,
}
