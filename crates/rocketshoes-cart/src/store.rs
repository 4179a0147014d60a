//! The shared cart container.
//!
//! [`CartStore`] owns the current [`Cart`] snapshot and is the only way to
//! change it. Every mutation runs under one async lock from the first
//! catalog request to the final swap, so concurrent calls apply in order
//! and never overwrite each other. The new snapshot is written to storage
//! before it becomes visible; a failed write leaves the cart as it was.

use std::sync::Arc;

use rocketshoes_cache::{cache_key, Cache};
use rocketshoes_commerce::{Cart, CommerceError, ProductId};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::catalog::CatalogApi;
use crate::error::{CartError, Operation};
use crate::notify::{Notifier, TracingNotifier};

/// Namespace the cart is stored under.
pub const STORAGE_NAMESPACE: &str = "@RocketShoes";

/// Storage key of the cart in a namespace.
pub fn storage_key(namespace: &str) -> String {
    cache_key!(namespace, "cart")
}

/// Request to set a product's quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductAmount {
    pub product_id: ProductId,
    pub amount: i64,
}

impl UpdateProductAmount {
    pub fn new(product_id: ProductId, amount: i64) -> Self {
        Self { product_id, amount }
    }
}

/// Builder for [`CartStore`].
pub struct CartStoreBuilder {
    catalog: Arc<dyn CatalogApi>,
    cache: Cache,
    notifier: Option<Arc<dyn Notifier>>,
    key: String,
}

impl CartStoreBuilder {
    /// Send failure messages to `notifier` instead of the log.
    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Store the cart under `<namespace>:cart`.
    pub fn namespace(mut self, namespace: &str) -> Self {
        self.key = storage_key(namespace);
        self
    }

    /// Store the cart under an explicit key.
    pub fn storage_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Restore the persisted cart and build the store.
    pub fn build(self) -> CartStore {
        let cart = load(&self.cache, &self.key);
        CartStore {
            catalog: self.catalog,
            cache: self.cache,
            notifier: self
                .notifier
                .unwrap_or_else(|| Arc::new(TracingNotifier)),
            key: self.key,
            cart: Mutex::new(cart),
        }
    }
}

fn load(cache: &Cache, key: &str) -> Cart {
    match cache.get::<Cart>(key) {
        Ok(Some(cart)) => {
            debug!(key, items = cart.len(), "cart restored");
            cart
        }
        Ok(None) => Cart::new(),
        Err(e) => {
            warn!(key, error = %e, "stored cart is unreadable, starting empty");
            Cart::new()
        }
    }
}

/// Stock-checked, persisted cart state.
pub struct CartStore {
    catalog: Arc<dyn CatalogApi>,
    cache: Cache,
    notifier: Arc<dyn Notifier>,
    key: String,
    cart: Mutex<Cart>,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("key", &self.key)
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

impl CartStore {
    /// Start building a store over a catalog and a storage backend.
    pub fn builder(catalog: Arc<dyn CatalogApi>, cache: Cache) -> CartStoreBuilder {
        CartStoreBuilder {
            catalog,
            cache,
            notifier: None,
            key: storage_key(STORAGE_NAMESPACE),
        }
    }

    /// Key the cart is persisted under.
    pub fn storage_key(&self) -> &str {
        &self.key
    }

    /// Current cart snapshot.
    ///
    /// Waits for any mutation in flight to finish.
    pub async fn cart(&self) -> Cart {
        self.cart.lock().await.clone()
    }

    /// Add one unit of a product, notifying the shopper on failure.
    pub async fn add_product(&self, product_id: ProductId) {
        if let Err(e) = self.try_add_product(product_id).await {
            self.report(Operation::Add, product_id, &e);
        }
    }

    /// Remove a product entirely, notifying the shopper on failure.
    pub async fn remove_product(&self, product_id: ProductId) {
        if let Err(e) = self.try_remove_product(product_id).await {
            self.report(Operation::Remove, product_id, &e);
        }
    }

    /// Set a product's quantity, notifying the shopper on failure.
    pub async fn update_product_amount(&self, update: UpdateProductAmount) {
        if let Err(e) = self.try_update_product_amount(update).await {
            self.report(Operation::UpdateAmount, update.product_id, &e);
        }
    }

    /// Add one unit of a product.
    ///
    /// A product not yet in the cart is fetched from the catalog and added
    /// with amount 1. Either way the stock must cover the resulting amount.
    pub async fn try_add_product(&self, product_id: ProductId) -> Result<Cart, CartError> {
        let mut cart = self.cart.lock().await;

        let stock = self.catalog.stock(product_id).await?;
        stock.ensure_available(1)?;

        let next = if cart.contains(product_id) {
            let current = i64::from(cart.amount_of(product_id));
            stock.ensure_available(current + 1)?;
            cart.with_incremented(product_id)?
        } else {
            let product = self.catalog.product(product_id).await?;
            cart.with_product(product)?
        };

        let next = self.commit(&mut cart, next)?;
        info!(product_id = %product_id, amount = next.amount_of(product_id), "product added");
        Ok(next)
    }

    /// Remove a product entirely. No catalog request is made.
    pub async fn try_remove_product(&self, product_id: ProductId) -> Result<Cart, CartError> {
        let mut cart = self.cart.lock().await;

        let next = cart.without(product_id)?;

        let next = self.commit(&mut cart, next)?;
        info!(product_id = %product_id, "product removed");
        Ok(next)
    }

    /// Set a product's quantity to an absolute value.
    ///
    /// Amounts below 1 and products not in the cart are rejected before
    /// the catalog is consulted.
    pub async fn try_update_product_amount(
        &self,
        update: UpdateProductAmount,
    ) -> Result<Cart, CartError> {
        let UpdateProductAmount { product_id, amount } = update;
        if amount < 1 {
            return Err(CommerceError::InvalidQuantity(amount).into());
        }

        let mut cart = self.cart.lock().await;
        if !cart.contains(product_id) {
            return Err(CommerceError::ItemNotInCart(product_id).into());
        }

        let stock = self.catalog.stock(product_id).await?;
        stock.ensure_available(amount)?;

        let next = cart.with_amount(product_id, amount)?;

        let next = self.commit(&mut cart, next)?;
        info!(product_id = %product_id, amount, "product amount updated");
        Ok(next)
    }

    /// Empty the cart and drop its stored copy.
    pub async fn clear(&self) -> Result<(), CartError> {
        let mut cart = self.cart.lock().await;
        self.cache.delete(&self.key)?;
        *cart = Cart::new();
        info!("cart cleared");
        Ok(())
    }

    fn commit(&self, current: &mut Cart, next: Cart) -> Result<Cart, CartError> {
        self.cache.set(&self.key, &next)?;
        *current = next.clone();
        debug!(key = %self.key, items = next.len(), "cart persisted");
        Ok(next)
    }

    fn report(&self, operation: Operation, product_id: ProductId, error: &CartError) {
        warn!(
            operation = operation.name(),
            product_id = %product_id,
            error = %error,
            "cart operation failed"
        );
        self.notifier.error(error.user_message(operation));
    }
}
