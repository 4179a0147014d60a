//! Stock records.

use crate::error::CommerceError;
use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// Available quantity for a product, as served by `/stock/{id}`.
///
/// The API may answer with only `{amount}`; callers fill `id` from the
/// requested path in that case.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Stock {
    /// Product the record belongs to.
    #[serde(default)]
    pub id: ProductId,
    /// Reported quantity. Zero or negative means unavailable.
    pub amount: i64,
}

impl Stock {
    /// Create a stock record.
    pub fn new(id: ProductId, amount: i64) -> Self {
        Self { id, amount }
    }

    /// Available quantity, with negative reports clamped to zero.
    pub fn available(&self) -> i64 {
        self.amount.max(0)
    }

    /// Check if out of stock.
    pub fn is_out_of_stock(&self) -> bool {
        self.available() == 0
    }

    /// Check if a specific quantity can be held.
    pub fn can_fulfill(&self, quantity: i64) -> bool {
        quantity <= self.available()
    }

    /// Require that `requested` units can be held in a cart.
    pub fn ensure_available(&self, requested: i64) -> Result<(), CommerceError> {
        if self.is_out_of_stock() || !self.can_fulfill(requested) {
            return Err(CommerceError::InsufficientStock {
                product_id: self.id,
                requested,
                available: self.available(),
            });
        }
        Ok(())
    }
}
