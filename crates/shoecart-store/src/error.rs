//! Cart store error types.

use shoecart_cache::CacheError;
use shoecart_commerce::{CommerceError, ProductId};
use shoecart_data::FetchError;
use thiserror::Error;

use crate::notify::Severity;

/// Why a cart operation did not change the cart.
///
/// Every variant leaves the in-memory cart and the persisted snapshot
/// exactly as they were before the call.
#[derive(Error, Debug)]
pub enum CartError {
    /// The product service has no such product.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// The cart has no line for this product.
    #[error("Product not in cart: {0}")]
    ProductNotInCart(ProductId),

    /// Amounts start at 1.
    #[error("Invalid amount: {0}")]
    InvalidAmount(u32),

    /// Stock is missing or lower than the requested amount.
    #[error("Insufficient stock for {product_id}: requested {requested}, available {available}")]
    StockInsufficient {
        product_id: ProductId,
        requested: u32,
        available: u32,
    },

    /// Another operation committed since this one read the cart.
    #[error("Cart modified concurrently: expected version {expected}, found {found}")]
    ConcurrentModification { expected: u64, found: u64 },

    /// Domain validation failed.
    #[error(transparent)]
    Commerce(#[from] CommerceError),

    /// Product or stock lookup failed.
    #[error("Lookup failed: {0}")]
    Fetch(#[from] FetchError),

    /// Reading or writing the snapshot failed.
    #[error("Storage failed: {0}")]
    Storage(#[from] CacheError),
}

impl CartError {
    /// Severity this error is reported with.
    ///
    /// A stock shortfall is a guarded rejection, reported as a warning.
    /// Everything else is a failure.
    pub fn severity(&self) -> Severity {
        match self {
            CartError::StockInsufficient { .. } => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_shortfall_is_warning() {
        let err = CartError::StockInsufficient {
            product_id: ProductId::new(1),
            requested: 3,
            available: 2,
        };
        assert_eq!(err.severity(), Severity::Warning);
        assert_eq!(
            err.to_string(),
            "Insufficient stock for 1: requested 3, available 2"
        );
    }

    #[test]
    fn test_other_errors_are_errors() {
        assert_eq!(CartError::InvalidAmount(0).severity(), Severity::Error);
        assert_eq!(
            CartError::Fetch(FetchError::Timeout("slow".into())).severity(),
            Severity::Error
        );
    }
}
