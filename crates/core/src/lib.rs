//! City Explorer Core Library
//!
//! Domain types, configuration, errors and the read-through location cache
//! shared by the provider clients and the HTTP server.

pub mod config;
pub mod error;
pub mod location;
pub mod providers;
pub mod types;

// Re-export commonly used types
pub use config::ExplorerConfig;
pub use error::{ErrorCategory, ExplorerError, Result};
pub use location::{LocationCache, LocationStore, MemoryLocationStore, PgLocationStore};
pub use providers::{Geocoder, RestaurantSource, TrailSource};
pub use types::{Location, PageRequest, Restaurant, Trail};
