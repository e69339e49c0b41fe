use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::ProductResult;
use crate::models::Product;

/// Data access for products
///
/// Every operation either completes or fails with a store error; "no such
/// row" is never an error here (`None` / `false`).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert a product and return its store-assigned id
    async fn create(&self, name: &str, price: f64) -> ProductResult<i64>;

    /// Get a product by ID
    async fn get_by_id(&self, id: i64) -> ProductResult<Option<Product>>;

    /// Replace name and price; `false` when no row was affected
    async fn update(&self, id: i64, name: &str, price: f64) -> ProductResult<bool>;

    /// Delete a product; `false` when no row was affected
    async fn delete(&self, id: i64) -> ProductResult<bool>;

    /// All products in ascending id order
    async fn list(&self) -> ProductResult<Vec<Product>>;
}

#[derive(Debug, Default)]
struct Store {
    last_id: i64,
    products: BTreeMap<i64, Product>,
}

/// In-memory implementation of ProductRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, name: &str, price: f64) -> ProductResult<i64> {
        let mut store = self.store.write().await;
        store.last_id += 1;
        let id = store.last_id;

        store.products.insert(
            id,
            Product {
                id,
                name: name.to_string(),
                price,
                created_at: Some(Utc::now()),
            },
        );

        tracing::info!(product_id = id, "Created product");
        Ok(id)
    }

    async fn get_by_id(&self, id: i64) -> ProductResult<Option<Product>> {
        let store = self.store.read().await;
        Ok(store.products.get(&id).cloned())
    }

    async fn update(&self, id: i64, name: &str, price: f64) -> ProductResult<bool> {
        let mut store = self.store.write().await;
        let updated = match store.products.get_mut(&id) {
            Some(product) => {
                product.name = name.to_string();
                product.price = price;
                true
            }
            None => false,
        };

        tracing::info!(product_id = id, rows = updated as i32, "Updated product");
        Ok(updated)
    }

    async fn delete(&self, id: i64) -> ProductResult<bool> {
        let mut store = self.store.write().await;
        let deleted = store.products.remove(&id).is_some();

        tracing::info!(product_id = id, rows = deleted as i32, "Deleted product");
        Ok(deleted)
    }

    async fn list(&self) -> ProductResult<Vec<Product>> {
        let store = self.store.read().await;
        Ok(store.products.values().cloned().collect())
    }
}
