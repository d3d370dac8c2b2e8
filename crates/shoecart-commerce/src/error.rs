//! Commerce error types.

use crate::ids::ProductId;
use thiserror::Error;

/// Errors raised by cart and catalog validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommerceError {
    /// Item not in cart.
    #[error("Item not in cart: {0}")]
    ItemNotInCart(ProductId),

    /// The same product appears twice in one cart.
    #[error("Duplicate line item for product {0}")]
    DuplicateItem(ProductId),

    /// Line item amounts start at 1.
    #[error("Invalid amount: {0}")]
    InvalidAmount(u32),

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,
}
