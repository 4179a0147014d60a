//! Catalog API access.

use async_trait::async_trait;
use rocketshoes_commerce::{catalog::Product, catalog::Stock, ProductId};
use rocketshoes_data::{FetchClient, FetchError};

/// Remote lookups the cart depends on.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Current stock for a product.
    async fn stock(&self, id: ProductId) -> Result<Stock, FetchError>;

    /// Full product record.
    async fn product(&self, id: ProductId) -> Result<Product, FetchError>;
}

/// [`CatalogApi`] over the storefront's JSON API.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: FetchClient,
}

impl HttpCatalog {
    /// Create a catalog over a client whose base URL points at the API.
    pub fn new(client: FetchClient) -> Self {
        Self { client }
    }

    /// Path of a product's stock record.
    pub fn stock_path(id: ProductId) -> String {
        format!("/stock/{}", id)
    }

    /// Path of a product record.
    pub fn product_path(id: ProductId) -> String {
        format!("/products/{}", id)
    }
}

#[async_trait]
impl CatalogApi for HttpCatalog {
    async fn stock(&self, id: ProductId) -> Result<Stock, FetchError> {
        let mut stock: Stock = self.client.get_json(Self::stock_path(id)).await?;
        stock.id = id;
        tracing::debug!(product_id = %id, amount = stock.amount, "stock fetched");
        Ok(stock)
    }

    async fn product(&self, id: ProductId) -> Result<Product, FetchError> {
        let product: Product = self.client.get_json(Self::product_path(id)).await?;
        tracing::debug!(product_id = %id, title = %product.title, "product fetched");
        Ok(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(HttpCatalog::stock_path(ProductId::new(3)), "/stock/3");
        assert_eq!(HttpCatalog::product_path(ProductId::new(3)), "/products/3");
    }
}
