//! CLI command implementations.

pub mod cart;
pub mod products;

use clap::Args;
use shoecart_commerce::ProductId;
use shoecart_store::CartError;

/// Arguments for commands acting on one product.
#[derive(Args)]
pub struct ProductArgs {
    /// Product ID.
    pub product_id: ProductId,
}

/// Arguments for the update command.
#[derive(Args)]
pub struct AmountArgs {
    /// Product ID.
    pub product_id: ProductId,

    /// New amount (at least 1).
    pub amount: u32,
}

/// A cart operation failure the store has already shown through its
/// notifier.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct Notified(#[from] pub CartError);

/// Whether `err` was already shown to the user and only needs an exit
/// status.
pub fn already_notified(err: &anyhow::Error) -> bool {
    err.downcast_ref::<Notified>().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context as _;

    #[test]
    fn test_operation_failure_is_notified() {
        let err = anyhow::Error::from(Notified(CartError::ProductNotInCart(ProductId::new(9))));
        assert!(already_notified(&err));
        assert_eq!(format!("{:#}", err), "Product not in cart: 9");
    }

    #[test]
    fn test_load_failure_is_not_notified() {
        let result: Result<(), CartError> = Err(CartError::InvalidAmount(0));
        let err = result.context("Failed to load cart").unwrap_err();
        assert!(!already_notified(&err));
    }
}
