//! Location lookup and caching

pub mod cache;
pub mod store;

pub use cache::LocationCache;
pub use store::{LocationStore, MemoryLocationStore, PgLocationStore};
