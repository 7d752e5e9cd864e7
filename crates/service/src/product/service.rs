use std::sync::Arc;

use tracing::{info, instrument};
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::product::domain::{Product, ProductInput};
use crate::product::repository::ProductRepository;

/// Product operations over an injected gateway. Gateway absence becomes `NotFound`.
#[derive(Clone)]
pub struct ProductService {
    repo: Arc<dyn ProductRepository>,
}

impl ProductService {
    pub fn new(repo: Arc<dyn ProductRepository>) -> Self { Self { repo } }

    #[instrument(skip_all)]
    pub async fn create(&self, input: ProductInput) -> Result<Product, ServiceError> {
        let product = self.repo.insert(input).await?;
        info!(id = %product.id, "product_created");
        Ok(product)
    }

    pub async fn list(&self) -> Result<Vec<Product>, ServiceError> {
        self.repo.find_all().await
    }

    pub async fn get(&self, id: Uuid) -> Result<Product, ServiceError> {
        self.repo.find_by_id(id).await?.ok_or_else(|| ServiceError::not_found("product"))
    }

    #[instrument(skip_all, fields(id = %id))]
    pub async fn update(&self, id: Uuid, patch: ProductInput) -> Result<Product, ServiceError> {
        let product = self
            .repo
            .update_by_id(id, patch)
            .await?
            .ok_or_else(|| ServiceError::not_found("product"))?;
        info!("product_updated");
        Ok(product)
    }

    #[instrument(skip_all, fields(id = %id))]
    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        if !self.repo.delete_by_id(id).await? {
            return Err(ServiceError::not_found("product"));
        }
        info!("product_deleted");
        Ok(())
    }
}
