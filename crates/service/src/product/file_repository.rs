use std::{path::PathBuf, sync::Arc};

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::product::domain::{Product, ProductInput};
use crate::product::repository::ProductRepository;
use crate::storage::json_map_store::JsonMapStore;

/// Products kept as JSON documents in a single file, keyed by id.
/// Listing order is whatever the map yields.
#[derive(Clone)]
pub struct FileProductRepository {
    store: Arc<JsonMapStore<Uuid, Product>>,
}

impl FileProductRepository {
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Self, ServiceError> {
        Ok(Self { store: JsonMapStore::new(path).await? })
    }
}

#[async_trait]
impl ProductRepository for FileProductRepository {
    async fn insert(&self, input: ProductInput) -> Result<Product, ServiceError> {
        let product = input.into_product(Uuid::new_v4());
        self.store.insert(product.id, product.clone()).await?;
        Ok(product)
    }

    async fn find_all(&self) -> Result<Vec<Product>, ServiceError> {
        Ok(self.store.values().await)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, ServiceError> {
        Ok(self.store.get(&id).await)
    }

    async fn update_by_id(&self, id: Uuid, patch: ProductInput) -> Result<Option<Product>, ServiceError> {
        self.store
            .update_map(|m| {
                Ok(m.get_mut(&id).map(|p| {
                    patch.merge_into(p);
                    p.clone()
                }))
            })
            .await
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, ServiceError> {
        self.store.remove(&id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::temp_store_path;

    #[tokio::test]
    async fn file_repository_crud_and_reload() -> Result<(), anyhow::Error> {
        let path = temp_store_path("products");
        let repo = FileProductRepository::open(&path).await?;

        let a = repo
            .insert(ProductInput { name: Some(Some("Widget".into())), quantity: Some(Some(5)), ..ProductInput::default() })
            .await?;
        let b = repo.insert(ProductInput { name: Some(Some("Gadget".into())), ..ProductInput::default() }).await?;
        assert_ne!(a.id, b.id);
        assert_eq!(repo.find_all().await?.len(), 2);

        let patch = ProductInput { quantity: Some(Some(4)), ..ProductInput::default() };
        let updated = repo.update_by_id(a.id, patch).await?.expect("present");
        assert_eq!(updated.id, a.id);
        assert_eq!(updated.quantity, Some(4));
        assert_eq!(updated.name.as_deref(), Some("Widget"));

        // an explicit null clears the field
        let patch = ProductInput { quantity: Some(None), ..ProductInput::default() };
        let updated = repo.update_by_id(a.id, patch).await?.expect("present");
        assert_eq!(updated.quantity, None);
        assert_eq!(updated.name.as_deref(), Some("Widget"));

        assert!(repo.delete_by_id(b.id).await?);
        assert!(!repo.delete_by_id(b.id).await?);
        assert!(repo.update_by_id(b.id, ProductInput::default()).await?.is_none());

        let reopened = FileProductRepository::open(&path).await?;
        assert_eq!(reopened.find_all().await?, vec![updated]);

        let _ = tokio::fs::remove_file(&path).await;
        Ok(())
    }
}
