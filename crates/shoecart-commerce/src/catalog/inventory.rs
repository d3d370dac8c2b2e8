//! Stock records.

use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// Available quantity for a product, as reported by the stock service.
///
/// Read-only from the cart's point of view: the cart checks against it but
/// never reserves or writes back.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct StockRecord {
    /// Product this record describes.
    pub id: ProductId,
    /// Units available.
    pub amount: u32,
}

impl StockRecord {
    pub fn new(id: ProductId, amount: u32) -> Self {
        Self { id, amount }
    }

    /// Check if a specific quantity is available.
    pub fn can_fulfill(&self, requested: u32) -> bool {
        self.amount >= requested
    }
}
