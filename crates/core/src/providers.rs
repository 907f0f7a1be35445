//! Data provider seams
//!
//! Each trait is implemented by an HTTP client in `city-explorer-infra` and
//! returns the provider's decoded payload. Mapping into response records is
//! left to the caller.

use crate::types::{GeocodeResult, HikingTrail, PageRequest, YelpBusiness};
use crate::Result;
use async_trait::async_trait;

/// Forward geocoding of free-form place names.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Search for `query`, returning matches in provider order.
    ///
    /// An empty list is a valid answer and means nothing matched.
    async fn search(&self, query: &str) -> Result<Vec<GeocodeResult>>;
}

/// Business listings near a coordinate.
#[async_trait]
pub trait RestaurantSource: Send + Sync {
    async fn search_restaurants(
        &self,
        latitude: f64,
        longitude: f64,
        page: PageRequest,
    ) -> Result<Vec<YelpBusiness>>;
}

/// Hiking trails near a coordinate.
#[async_trait]
pub trait TrailSource: Send + Sync {
    /// Search within `max_distance` of the coordinate.
    async fn search_trails(
        &self,
        latitude: f64,
        longitude: f64,
        max_distance: u32,
    ) -> Result<Vec<HikingTrail>>;
}
