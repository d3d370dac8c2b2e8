//! Catalog lookup trait.

use std::sync::Arc;

use async_trait::async_trait;
use shoecart_commerce::{catalog::Product, catalog::StockRecord, ProductId};

use crate::FetchError;

/// Read-only product and stock lookups.
///
/// `Ok(None)` means the service answered and has no such record. `Err` means
/// the lookup itself failed.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Look up a product's details.
    async fn fetch_product(&self, id: ProductId) -> Result<Option<Product>, FetchError>;

    /// Look up a product's available stock.
    async fn fetch_stock(&self, id: ProductId) -> Result<Option<StockRecord>, FetchError>;

    /// List every product in the catalog.
    async fn list_products(&self) -> Result<Vec<Product>, FetchError>;
}

#[async_trait]
impl<C: CatalogApi + ?Sized> CatalogApi for Arc<C> {
    async fn fetch_product(&self, id: ProductId) -> Result<Option<Product>, FetchError> {
        (**self).fetch_product(id).await
    }

    async fn fetch_stock(&self, id: ProductId) -> Result<Option<StockRecord>, FetchError> {
        (**self).fetch_stock(id).await
    }

    async fn list_products(&self) -> Result<Vec<Product>, FetchError> {
        (**self).list_products().await
    }
}
