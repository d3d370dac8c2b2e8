//! Product type.

use crate::ids::ProductId;
use crate::money::{self, Money};
use serde::{Deserialize, Serialize};

/// A product as returned by the product service.
///
/// `title`, `price` and `image` are the fields the storefront renders. Any
/// other field the service sends is kept in `extra` and written back out
/// unchanged, so a cart line always carries the full product record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Display name.
    pub title: String,
    /// Unit price.
    #[serde(with = "money::decimal")]
    pub price: Money,
    /// Image URL.
    pub image: String,
    /// Fields not modelled above.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Product {
    /// Create a product with no extra fields.
    pub fn new(
        id: ProductId,
        title: impl Into<String>,
        price: Money,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            price,
            image: image.into(),
            extra: serde_json::Map::new(),
        }
    }
}
