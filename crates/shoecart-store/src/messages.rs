//! User-facing notification texts.

pub const PRODUCT_ADDED: &str = "Product added to cart";
pub const PRODUCT_UPDATED: &str = "Product updated";
/// Shared by add and update.
pub const STOCK_EXCEEDED: &str = "Requested quantity is out of stock";
pub const ORDER_PLACED: &str = "Order placed! Thank you!";

pub const ADD_FAILED: &str = "Failed to add product";
pub const REMOVE_FAILED: &str = "Failed to remove product";
pub const UPDATE_FAILED: &str = "Failed to update product amount";
pub const SUBMIT_FAILED: &str = "Failed to place order";
pub const CLEAR_FAILED: &str = "Failed to clear cart";
