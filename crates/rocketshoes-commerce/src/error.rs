//! Commerce error types.

use crate::ids::ProductId;
use thiserror::Error;

/// Errors that can occur in cart and catalog operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommerceError {
    /// Item not in cart.
    #[error("Item not in cart: {0}")]
    ItemNotInCart(ProductId),

    /// Item already in cart.
    #[error("Item already in cart: {0}")]
    ItemAlreadyInCart(ProductId),

    /// Requested amount exceeds the available stock.
    #[error("Insufficient stock for {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: ProductId,
        requested: i64,
        available: i64,
    },

    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in cart calculation")]
    Overflow,
}

impl CommerceError {
    /// Whether this error means the stock cannot cover the request.
    pub fn is_stock_exceeded(&self) -> bool {
        matches!(self, CommerceError::InsufficientStock { .. })
    }
}
