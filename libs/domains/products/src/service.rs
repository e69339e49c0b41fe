use axum_helpers::validation_message;
use std::sync::Arc;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{Product, ProductInput};
use crate::repository::ProductRepository;

/// Service layer for Product business logic
#[derive(Clone)]
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    pub async fn list_products(&self) -> ProductResult<Vec<Product>> {
        self.repository.list().await
    }

    pub async fn get_product(&self, id: i64) -> ProductResult<Product> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    /// Validate and insert; returns the new id
    pub async fn create_product(&self, input: ProductInput) -> ProductResult<i64> {
        let (name, price) = validated(input)?;
        self.repository.create(&name, price).await
    }

    /// Replace name and price of an existing product
    ///
    /// Zero affected rows is reported as `NotFound`, whether the product never
    /// existed or was removed concurrently.
    pub async fn update_product(&self, id: i64, input: ProductInput) -> ProductResult<()> {
        let (name, price) = validated(input)?;

        if !self.repository.update(id, &name, price).await? {
            return Err(ProductError::NotFound(id));
        }

        Ok(())
    }

    pub async fn delete_product(&self, id: i64) -> ProductResult<()> {
        let deleted = self.repository.delete(id).await?;

        if !deleted {
            return Err(ProductError::NotFound(id));
        }

        Ok(())
    }
}

fn validated(input: ProductInput) -> ProductResult<(String, f64)> {
    input
        .validate()
        .map_err(|e| ProductError::Validation(validation_message(&e)))?;

    match (input.name, input.price) {
        (Some(name), Some(price)) => Ok((name, price)),
        _ => Err(ProductError::Validation(
            "name and price are required".to_string(),
        )),
    }
}
