//! Cart domain types for shoecart.
//!
//! This crate holds the value types the cart store works with:
//!
//! - **Catalog**: products as returned by the product service, stock records
//! - **Cart**: the ordered line-item collection and its invariants
//! - **Money**: integer minor-unit prices with decimal wire format
//!
//! Everything here is pure data plus validated transitions. Fetching,
//! persistence and notifications live in the sibling crates.
//!
//! # Example
//!
//! ```rust
//! use shoecart_commerce::prelude::*;
//!
//! let product = Product::new(ProductId::new(1), "Tênis de Caminhada", Money::from_decimal(179.9, Currency::BRL), "shoe.jpg");
//! let cart = Cart::new().with_item(LineItem::new(product, 2).unwrap());
//!
//! assert_eq!(cart.item_count(), 2);
//! assert_eq!(cart.subtotal().unwrap().display(), "R$359.80");
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;

pub use cart::{Cart, LineItem};
pub use catalog::{Product, StockRecord};
pub use error::CommerceError;
pub use ids::ProductId;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::ProductId;
    pub use crate::money::{Currency, Money};

    pub use crate::cart::{Cart, LineItem};
    pub use crate::catalog::{Product, StockRecord};
}
