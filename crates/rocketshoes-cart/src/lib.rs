//! Shopping cart state for the RocketShoes storefront.
//!
//! [`CartStore`] keeps the shopper's cart, checks every quantity change
//! against the catalog's stock, and persists the cart under
//! `@RocketShoes:cart` so it survives restarts. Failures never propagate
//! out of the fire-and-forget operations; they reach the shopper through a
//! [`Notifier`] instead.
//!
//! # Example
//!
//! ```rust,ignore
//! use rocketshoes_cart::prelude::*;
//!
//! let client = FetchClient::new().with_base_url("http://localhost:3333");
//! let store = CartStore::builder(Arc::new(HttpCatalog::new(client)), Cache::open("storage.json"))
//!     .build();
//!
//! store.add_product(ProductId::new(1)).await;
//! store.update_product_amount(UpdateProductAmount::new(ProductId::new(1), 3)).await;
//! store.remove_product(ProductId::new(1)).await;
//! ```

mod catalog;
mod error;
pub mod messages;
mod notify;
mod store;

pub use catalog::{CatalogApi, HttpCatalog};
pub use error::{CartError, Operation};
pub use notify::{CollectingNotifier, Notifier, TracingNotifier};
pub use store::{storage_key, CartStore, CartStoreBuilder, UpdateProductAmount, STORAGE_NAMESPACE};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        CartError, CartStore, CatalogApi, HttpCatalog, Notifier, TracingNotifier,
        UpdateProductAmount,
    };
    pub use rocketshoes_cache::Cache;
    pub use rocketshoes_commerce::prelude::*;
    pub use rocketshoes_data::FetchClient;
    pub use std::sync::Arc;
}
