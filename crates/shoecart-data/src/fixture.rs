//! In-process catalog backed by a JSON document.

use std::collections::BTreeMap;
use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;
use shoecart_commerce::{catalog::Product, catalog::StockRecord, ProductId};

use crate::{CatalogApi, FetchError};

/// Catalog document in the same layout the mock storefront API serves:
///
/// ```json
/// { "products": [{ "id": 1, "title": "...", "price": 179.9, "image": "..." }],
///   "stock":    [{ "id": 1, "amount": 3 }] }
/// ```
#[derive(Debug, Deserialize)]
struct CatalogDocument {
    #[serde(default)]
    products: Vec<Product>,
    #[serde(default)]
    stock: Vec<StockRecord>,
}

/// Catalog answered from memory.
///
/// Used by the CLI's offline mode and by tests.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    products: BTreeMap<ProductId, Product>,
    stock: BTreeMap<ProductId, StockRecord>,
}

impl StaticCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a catalog document.
    pub fn from_json(json: &str) -> Result<Self, FetchError> {
        let doc: CatalogDocument = serde_json::from_str(json)?;
        let mut catalog = Self::new();
        for product in doc.products {
            catalog = catalog.with_product(product);
        }
        for record in doc.stock {
            catalog = catalog.with_stock(record);
        }
        Ok(catalog)
    }

    /// Load a catalog document from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FetchError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| FetchError::Load(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }

    /// Add or replace a product.
    pub fn with_product(mut self, product: Product) -> Self {
        self.products.insert(product.id, product);
        self
    }

    /// Add or replace a stock record.
    pub fn with_stock(mut self, record: StockRecord) -> Self {
        self.stock.insert(record.id, record);
        self
    }
}

#[async_trait]
impl CatalogApi for StaticCatalog {
    async fn fetch_product(&self, id: ProductId) -> Result<Option<Product>, FetchError> {
        Ok(self.products.get(&id).cloned())
    }

    async fn fetch_stock(&self, id: ProductId) -> Result<Option<StockRecord>, FetchError> {
        Ok(self.stock.get(&id).copied())
    }

    async fn list_products(&self) -> Result<Vec<Product>, FetchError> {
        Ok(self.products.values().cloned().collect())
    }
}
