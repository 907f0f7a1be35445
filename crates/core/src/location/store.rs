//! Persistent storage for cached locations
//!
//! `PgLocationStore` keeps records in the `locations` table. Lookups match
//! `search_query` exactly; records are never updated or deleted. Coordinates
//! are read back as `DOUBLE PRECISION` so tables with `NUMERIC` columns work.

use crate::types::Location;
use crate::{ExplorerError, Result};
use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Storage backend for the location cache
#[async_trait]
pub trait LocationStore: Send + Sync {
    /// Find the record stored under `search_query`
    async fn find(&self, search_query: &str) -> Result<Option<Location>>;

    /// Persist a record and return the stored copy
    ///
    /// If a record with the same `search_query` already exists it is kept and
    /// returned unchanged.
    async fn insert(&self, location: &Location) -> Result<Location>;

    /// Whether the backend is reachable
    async fn health_check(&self) -> bool {
        true
    }

    /// Release any held resources
    async fn close(&self) {}
}

/// PostgreSQL-backed location store
#[derive(Clone)]
pub struct PgLocationStore {
    pool: PgPool,
}

impl PgLocationStore {
    /// Create a store from an existing pool
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use sqlx::PgPool;
    /// use city_explorer_core::location::PgLocationStore;
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let pool = PgPool::connect("postgresql://localhost/city_explorer").await?;
    /// let store = PgLocationStore::new(pool);
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect to the database and apply pending migrations
    ///
    /// # Errors
    ///
    /// Returns `ExplorerError::Database` if the connection fails and
    /// `ExplorerError::Migration` if the schema cannot be brought up to date.
    pub async fn connect(database_url: &str) -> Result<Self> {
        info!("Connecting to location store");

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;

        let store = Self::new(pool);
        store.migrate().await?;
        Ok(store)
    }

    /// Apply the embedded schema migrations
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        debug!("Location store migrations applied");
        Ok(())
    }

    /// Underlying connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn location_from_row(row: &PgRow) -> Result<Location> {
    Ok(Location {
        search_query: row
            .try_get("search_query")
            .map_err(|e| ExplorerError::store(format!("Failed to get search_query: {}", e)))?,
        formatted_query: row
            .try_get("formatted_query")
            .map_err(|e| ExplorerError::store(format!("Failed to get formatted_query: {}", e)))?,
        latitude: row
            .try_get("latitude")
            .map_err(|e| ExplorerError::store(format!("Failed to get latitude: {}", e)))?,
        longitude: row
            .try_get("longitude")
            .map_err(|e| ExplorerError::store(format!("Failed to get longitude: {}", e)))?,
    })
}

#[async_trait]
impl LocationStore for PgLocationStore {
    async fn find(&self, search_query: &str) -> Result<Option<Location>> {
        let query = r#"
            SELECT search_query, formatted_query,
                   latitude::DOUBLE PRECISION AS latitude,
                   longitude::DOUBLE PRECISION AS longitude
            FROM locations
            WHERE search_query = $1
            LIMIT 1
        "#;

        let row = sqlx::query(query)
            .bind(search_query)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| ExplorerError::store(format!("Failed to query location: {}", e)))?;

        row.as_ref().map(location_from_row).transpose()
    }

    async fn insert(&self, location: &Location) -> Result<Location> {
        let query = r#"
            INSERT INTO locations (search_query, formatted_query, latitude, longitude)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (search_query) DO NOTHING
            RETURNING search_query, formatted_query,
                      latitude::DOUBLE PRECISION AS latitude,
                      longitude::DOUBLE PRECISION AS longitude
        "#;

        let row = sqlx::query(query)
            .bind(&location.search_query)
            .bind(&location.formatted_query)
            .bind(location.latitude)
            .bind(location.longitude)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| ExplorerError::store(format!("Failed to insert location: {}", e)))?;

        match row {
            Some(row) => location_from_row(&row),
            None => {
                // Lost a race with a concurrent insert for the same key.
                debug!(
                    "Location '{}' already stored, returning existing row",
                    location.search_query
                );
                self.find(&location.search_query).await?.ok_or_else(|| {
                    ExplorerError::store(format!(
                        "Location '{}' vanished after conflicting insert",
                        location.search_query
                    ))
                })
            }
        }
    }

    async fn health_check(&self) -> bool {
        match sqlx::query("SELECT 1").execute(&self.pool).await {
            Ok(_) => true,
            Err(e) => {
                warn!("Location store health check failed: {}", e);
                false
            }
        }
    }

    async fn close(&self) {
        info!("Closing location store");
        self.pool.close().await;
    }
}

/// In-process location store
///
/// Useful for local development and tests; contents are lost on restart.
#[derive(Debug, Default)]
pub struct MemoryLocationStore {
    locations: RwLock<HashMap<String, Location>>,
}

impl MemoryLocationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.locations.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.locations.read().await.is_empty()
    }
}

#[async_trait]
impl LocationStore for MemoryLocationStore {
    async fn find(&self, search_query: &str) -> Result<Option<Location>> {
        Ok(self.locations.read().await.get(search_query).cloned())
    }

    async fn insert(&self, location: &Location) -> Result<Location> {
        let mut locations = self.locations.write().await;
        let stored = locations
            .entry(location.search_query.clone())
            .or_insert_with(|| location.clone());
        Ok(stored.clone())
    }
}
