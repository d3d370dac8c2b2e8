//! Product and stock lookups for shoecart.
//!
//! This crate provides:
//! - [`CatalogApi`] - the fetch-by-id seam the cart store depends on
//! - [`HttpCatalog`] - REST client for `/products/:id` and `/stock/:id`
//! - [`StaticCatalog`] - in-process catalog loaded from a JSON document
//!
//! # Example
//!
//! ```rust,ignore
//! use shoecart_data::{CatalogApi, HttpCatalog, FetchPolicy};
//!
//! let catalog = HttpCatalog::new("http://localhost:3333", FetchPolicy::default())?;
//!
//! if let Some(stock) = catalog.fetch_stock(ProductId::new(1)).await? {
//!     println!("{} left", stock.amount);
//! }
//! ```

mod catalog;
mod client;
mod error;
mod fixture;

pub use catalog::CatalogApi;
pub use client::{FetchPolicy, HttpCatalog};
pub use error::FetchError;
pub use fixture::StaticCatalog;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{CatalogApi, FetchError, FetchPolicy, HttpCatalog, StaticCatalog};
}
