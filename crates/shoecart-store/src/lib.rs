//! Shopping cart state for shoecart.
//!
//! [`CartStore`] owns the shopper's cart. It validates every change against
//! the product catalog and stock service, persists the result as a JSON
//! snapshot, and reports outcomes through a [`Notifier`].
//!
//! # Example
//!
//! ```rust,ignore
//! use shoecart_store::prelude::*;
//!
//! let store = CartStore::open(catalog, FileStore::open(".shoecart")?, TracingNotifier, StoreConfig::default())?;
//!
//! store.add_product(ProductId::new(1)).await?;
//! store.add_product(ProductId::new(1)).await?; // "Product updated", amount 2
//! store.submit_order()?;                       // "Order placed! Thank you!"
//! ```

mod config;
mod error;
pub mod messages;
mod notify;
mod store;

pub use config::{StoreConfig, DEFAULT_STORAGE_KEY};
pub use error::CartError;
pub use notify::{MemoryNotifier, Notification, Notifier, Severity, TracingNotifier};
pub use store::CartStore;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{CartError, CartStore, Notifier, Severity, StoreConfig, TracingNotifier};
    pub use shoecart_cache::{FileStore, MemoryStore};
    pub use shoecart_commerce::prelude::*;
    pub use shoecart_data::{CatalogApi, HttpCatalog, StaticCatalog};
}
