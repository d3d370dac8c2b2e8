//! Type-safe key-value snapshot storage for shoecart.
//!
//! The cart persists itself as one JSON document under one key. This crate
//! provides the storage seam ([`KeyValueStore`]), two backends, and a typed
//! wrapper with automatic JSON serialization.
//!
//! # Example
//!
//! ```rust
//! use shoecart_cache::{Cache, MemoryStore};
//!
//! let cache = Cache::new(MemoryStore::new());
//!
//! cache.set("@RocketShoes:cart", &vec![1, 2, 3]).unwrap();
//! let items: Option<Vec<u32>> = cache.get("@RocketShoes:cart").unwrap();
//! assert_eq!(items, Some(vec![1, 2, 3]));
//! ```

mod error;
mod file;
mod kv;
mod memory;

pub use error::CacheError;
pub use file::FileStore;
pub use kv::{Cache, KeyValueStore};
pub use memory::MemoryStore;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, KeyValueStore, MemoryStore};
}
