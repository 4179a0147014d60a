//! Catalog and cart domain types for RocketShoes.
//!
//! This crate has no I/O. It provides:
//!
//! - **Catalog**: products as returned by the catalog API, stock records
//! - **Cart**: cart items and the cart itself, with pure state transitions
//! - **Money**: integer-cents amounts for totals and display
//!
//! # Example
//!
//! ```rust,ignore
//! use rocketshoes_commerce::prelude::*;
//!
//! let product = Product::new(ProductId::new(1), "Tênis de Caminhada", 179.9, "tenis1.jpg");
//! let cart = Cart::new().with_product(product)?;
//! let stock = Stock::new(ProductId::new(1), 3);
//! stock.ensure_available(2)?;
//! let cart = cart.with_amount(ProductId::new(1), 2)?;
//!
//! println!("Total: {}", cart.total(Currency::BRL)?.display());
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;

pub use cart::{Cart, CartItem};
pub use catalog::{Product, Stock};
pub use error::CommerceError;
pub use ids::ProductId;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::ProductId;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{Product, Stock};

    // Cart
    pub use crate::cart::{Cart, CartItem};
}
