//! Type-safe key-value storage for RocketShoes.
//!
//! Mirrors the browser `localStorage` model: string keys mapped to string
//! values, with JSON (de)serialization layered on top by [`Cache`].
//!
//! # Example
//!
//! ```rust,ignore
//! use rocketshoes_cache::{cache_key, Cache};
//!
//! let cache = Cache::open(".rocketshoes/storage.json");
//! let key = cache_key!("@RocketShoes", "cart");
//!
//! // Store a value
//! cache.set(&key, &cart)?;
//!
//! // Retrieve a value
//! let cart: Option<Cart> = cache.get(&key)?;
//!
//! // Delete a value
//! cache.delete(&key)?;
//! ```

mod error;
mod kv;
mod store;

pub use error::CacheError;
pub use kv::Cache;
pub use store::{FileStore, KeyValueStore, MemoryStore};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, KeyValueStore, MemoryStore};
}
