//! Cart operation errors.

use rocketshoes_cache::CacheError;
use rocketshoes_commerce::CommerceError;
use rocketshoes_data::FetchError;
use thiserror::Error;

use crate::messages;

/// The user-facing cart operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Remove,
    UpdateAmount,
}

impl Operation {
    /// Generic failure message for this operation.
    pub fn failure_message(&self) -> &'static str {
        match self {
            Operation::Add => messages::ADD_FAILED,
            Operation::Remove => messages::REMOVE_FAILED,
            Operation::UpdateAmount => messages::UPDATE_FAILED,
        }
    }

    /// Name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Add => "add_product",
            Operation::Remove => "remove_product",
            Operation::UpdateAmount => "update_product_amount",
        }
    }
}

/// Errors raised by cart operations.
#[derive(Error, Debug)]
pub enum CartError {
    /// The cart transition was rejected.
    #[error(transparent)]
    Commerce(#[from] CommerceError),

    /// The catalog API could not be reached or answered badly.
    #[error("Catalog request failed: {0}")]
    Fetch(#[from] FetchError),

    /// The cart could not be persisted.
    #[error("Storage failed: {0}")]
    Storage(#[from] CacheError),
}

impl CartError {
    /// Whether the failure is a stock limit rather than a fault.
    pub fn is_stock_exceeded(&self) -> bool {
        matches!(self, CartError::Commerce(e) if e.is_stock_exceeded())
    }

    /// The message shown to the shopper when `operation` fails with this error.
    pub fn user_message(&self, operation: Operation) -> &'static str {
        if self.is_stock_exceeded() && operation != Operation::Remove {
            messages::STOCK_EXCEEDED
        } else {
            operation.failure_message()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rocketshoes_commerce::ProductId;

    fn stock_error() -> CartError {
        CommerceError::InsufficientStock {
            product_id: ProductId::new(1),
            requested: 2,
            available: 1,
        }
        .into()
    }

    #[test]
    fn test_stock_errors_use_stock_message() {
        assert_eq!(stock_error().user_message(Operation::Add), messages::STOCK_EXCEEDED);
        assert_eq!(
            stock_error().user_message(Operation::UpdateAmount),
            messages::STOCK_EXCEEDED
        );
    }

    #[test]
    fn test_other_errors_use_operation_message() {
        let err: CartError = FetchError::Timeout(std::time::Duration::from_secs(1)).into();
        assert_eq!(err.user_message(Operation::Add), messages::ADD_FAILED);

        let err: CartError = CommerceError::ItemNotInCart(ProductId::new(9)).into();
        assert_eq!(err.user_message(Operation::Remove), messages::REMOVE_FAILED);
        assert_eq!(err.user_message(Operation::UpdateAmount), messages::UPDATE_FAILED);
    }
}
