//! Read-through cache for geocoded locations

use super::store::LocationStore;
use crate::providers::Geocoder;
use crate::types::Location;
use crate::{ExplorerError, Result};
use std::sync::Arc;
use tracing::{debug, info};

/// Resolves city names to locations, geocoding and storing on a miss
///
/// Stored records never expire.
#[derive(Clone)]
pub struct LocationCache {
    store: Arc<dyn LocationStore>,
    geocoder: Arc<dyn Geocoder>,
}

impl LocationCache {
    pub fn new(store: Arc<dyn LocationStore>, geocoder: Arc<dyn Geocoder>) -> Self {
        Self { store, geocoder }
    }

    /// Look up `city`, populating the store from the geocoder on a miss
    ///
    /// The key is matched exactly, without case folding or trimming.
    ///
    /// # Errors
    ///
    /// - `ExplorerError::NotFound` if the geocoder has no match for `city`
    /// - provider and store errors are propagated unchanged
    pub async fn get(&self, city: &str) -> Result<Location> {
        if let Some(location) = self.store.find(city).await? {
            debug!("Location cache hit for '{}'", city);
            return Ok(location);
        }

        debug!("Location cache miss for '{}'", city);
        let results = self.geocoder.search(city).await?;
        let first = results
            .first()
            .ok_or_else(|| ExplorerError::not_found(format!("location for '{}'", city)))?;

        let location = Location::from_geocode(city, first)?;
        let stored = self.store.insert(&location).await?;
        info!(
            "Cached location '{}' as '{}'",
            stored.search_query, stored.formatted_query
        );

        Ok(stored)
    }

    /// The backing store
    pub fn store(&self) -> &Arc<dyn LocationStore> {
        &self.store
    }
}
