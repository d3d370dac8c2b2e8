//! Catalog module.
//!
//! Contains the product and stock shapes served by the catalog service.

mod inventory;
mod product;

pub use inventory::StockRecord;
pub use product::Product;
