//! Cart and cart item types.
//!
//! `Cart` is a value type. Every transition borrows the current cart and
//! returns the next one, leaving the original untouched, so a caller can
//! persist the new snapshot before publishing it.

use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// A product held in the cart with its quantity.
///
/// Serialized flat: the product fields followed by `amount`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartItem {
    /// The product as fetched from the catalog.
    #[serde(flatten)]
    pub product: Product,
    /// Quantity held. Always at least 1.
    pub amount: u32,
}

impl CartItem {
    /// Create a cart item.
    pub fn new(mut product: Product, amount: u32) -> Self {
        // `amount` is ours; a catalog field of the same name would be emitted twice.
        product.extra.remove("amount");
        Self { product, amount }
    }

    /// Product identifier.
    pub fn id(&self) -> ProductId {
        self.product.id
    }

    /// Unit price times amount.
    pub fn subtotal(&self, currency: Currency) -> Result<Money, CommerceError> {
        self.product
            .unit_price(currency)
            .checked_mul(i64::from(self.amount))
            .ok_or(CommerceError::Overflow)
    }
}

/// The shopping cart: items in insertion order, unique by product id.
///
/// Serialized as a bare JSON array of [`CartItem`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(from = "Vec<CartItem>", into = "Vec<CartItem>")]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from items, keeping the first occurrence of each id.
    ///
    /// Items with a zero amount are dropped.
    pub fn from_items(items: impl IntoIterator<Item = CartItem>) -> Self {
        let mut unique: Vec<CartItem> = Vec::new();
        for item in items {
            if item.amount > 0 && !unique.iter().any(|i| i.id() == item.id()) {
                unique.push(item);
            }
        }
        Self { items: unique }
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Iterate over items.
    pub fn iter(&self) -> impl Iterator<Item = &CartItem> {
        self.items.iter()
    }

    /// Get an item by product id.
    pub fn get(&self, id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|i| i.id() == id)
    }

    /// Check whether a product is in the cart.
    pub fn contains(&self, id: ProductId) -> bool {
        self.get(id).is_some()
    }

    /// Amount held for a product, zero when absent.
    pub fn amount_of(&self, id: ProductId) -> u32 {
        self.get(id).map(|i| i.amount).unwrap_or(0)
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total item count (sum of amounts).
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.amount)).sum()
    }

    /// Sum of all subtotals.
    pub fn total(&self, currency: Currency) -> Result<Money, CommerceError> {
        let subtotals = self
            .items
            .iter()
            .map(|i| i.subtotal(currency))
            .collect::<Result<Vec<_>, _>>()?;
        Money::checked_sum(subtotals.iter(), currency).ok_or(CommerceError::Overflow)
    }

    /// Append a product with amount 1.
    pub fn with_product(&self, product: Product) -> Result<Cart, CommerceError> {
        if self.contains(product.id) {
            return Err(CommerceError::ItemAlreadyInCart(product.id));
        }
        let mut next = self.clone();
        next.items.push(CartItem::new(product, 1));
        Ok(next)
    }

    /// Increase a held product's amount by exactly one.
    pub fn with_incremented(&self, id: ProductId) -> Result<Cart, CommerceError> {
        let current = self.get(id).ok_or(CommerceError::ItemNotInCart(id))?.amount;
        let amount = current.checked_add(1).ok_or(CommerceError::Overflow)?;
        self.with_amount(id, i64::from(amount))
    }

    /// Set a held product's amount.
    pub fn with_amount(&self, id: ProductId, amount: i64) -> Result<Cart, CommerceError> {
        if amount < 1 {
            return Err(CommerceError::InvalidQuantity(amount));
        }
        let amount = u32::try_from(amount).map_err(|_| CommerceError::InvalidQuantity(amount))?;

        let mut next = self.clone();
        let item = next
            .items
            .iter_mut()
            .find(|i| i.id() == id)
            .ok_or(CommerceError::ItemNotInCart(id))?;
        item.amount = amount;
        Ok(next)
    }

    /// Remove a product.
    pub fn without(&self, id: ProductId) -> Result<Cart, CommerceError> {
        if !self.contains(id) {
            return Err(CommerceError::ItemNotInCart(id));
        }
        Ok(Cart {
            items: self.items.iter().filter(|i| i.id() != id).cloned().collect(),
        })
    }
}

impl From<Vec<CartItem>> for Cart {
    fn from(items: Vec<CartItem>) -> Self {
        Self::from_items(items)
    }
}

impl From<Cart> for Vec<CartItem> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a CartItem;
    type IntoIter = std::slice::Iter<'a, CartItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
