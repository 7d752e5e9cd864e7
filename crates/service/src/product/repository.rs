use async_trait::async_trait;
use chrono::Utc;
use configs::DatabaseConfig;
use migration::MigratorTrait;
use models::product;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel, QueryOrder, Set,
};
use tokio::sync::RwLock;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::product::domain::{Product, ProductInput};

/// Persistence gateway for products.
///
/// Absence is reported as `Ok(None)` / `Ok(false)`; `Err` is reserved for store failures.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Store a new record under a freshly minted id.
    async fn insert(&self, input: ProductInput) -> Result<Product, ServiceError>;
    async fn find_all(&self) -> Result<Vec<Product>, ServiceError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, ServiceError>;
    /// Merge `patch` into the record; `None` when no record has this id.
    async fn update_by_id(&self, id: Uuid, patch: ProductInput) -> Result<Option<Product>, ServiceError>;
    /// `false` when no record has this id.
    async fn delete_by_id(&self, id: Uuid) -> Result<bool, ServiceError>;
}

/// SeaORM/Postgres-backed repository.
///
/// The connection is established on first use and re-attempted on every call
/// until it succeeds, so the service can start while the database is down.
pub struct SeaOrmProductRepository {
    cfg: DatabaseConfig,
    conn: RwLock<Option<DatabaseConnection>>,
}

impl SeaOrmProductRepository {
    pub fn new(cfg: DatabaseConfig) -> Self {
        Self { cfg, conn: RwLock::new(None) }
    }

    /// Current connection, connecting (and migrating) if there is none yet.
    pub async fn connection(&self) -> Result<DatabaseConnection, ServiceError> {
        if let Some(db) = self.conn.read().await.as_ref() {
            return Ok(db.clone());
        }

        // Connect without holding the lock; a concurrent winner is kept.
        let db = models::db::connect_with_config(&self.cfg).await.map_err(|e| {
            warn!(error = %e, "product store unreachable");
            ServiceError::store(e)
        })?;
        migration::Migrator::up(&db, None).await.map_err(ServiceError::store)?;

        let mut guard = self.conn.write().await;
        match guard.as_ref() {
            Some(existing) => Ok(existing.clone()),
            None => {
                info!("connected to product store");
                *guard = Some(db.clone());
                Ok(db)
            }
        }
    }
}

#[async_trait]
impl ProductRepository for SeaOrmProductRepository {
    async fn insert(&self, input: ProductInput) -> Result<Product, ServiceError> {
        let db = self.connection().await?;
        let am = product::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name.flatten()),
            description: Set(input.description.flatten()),
            price: Set(input.price.flatten()),
            quantity: Set(input.quantity.flatten()),
            category: Set(input.category.flatten()),
            created_at: Set(Utc::now().into()),
        };
        let model = am.insert(&db).await.map_err(ServiceError::store)?;
        Ok(model.into())
    }

    async fn find_all(&self) -> Result<Vec<Product>, ServiceError> {
        let db = self.connection().await?;
        let rows = product::Entity::find()
            .order_by_asc(product::Column::CreatedAt)
            .order_by_asc(product::Column::Id)
            .all(&db)
            .await
            .map_err(ServiceError::store)?;
        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, ServiceError> {
        let db = self.connection().await?;
        let found = product::Entity::find_by_id(id).one(&db).await.map_err(ServiceError::store)?;
        Ok(found.map(Product::from))
    }

    async fn update_by_id(&self, id: Uuid, patch: ProductInput) -> Result<Option<Product>, ServiceError> {
        let db = self.connection().await?;
        let Some(found) = product::Entity::find_by_id(id).one(&db).await.map_err(ServiceError::store)? else {
            return Ok(None);
        };
        if patch.is_empty() {
            return Ok(Some(found.into()));
        }

        let mut am = found.into_active_model();
        if let Some(v) = patch.name { am.name = Set(v); }
        if let Some(v) = patch.description { am.description = Set(v); }
        if let Some(v) = patch.price { am.price = Set(v); }
        if let Some(v) = patch.quantity { am.quantity = Set(v); }
        if let Some(v) = patch.category { am.category = Set(v); }

        match am.update(&db).await {
            Ok(model) => Ok(Some(model.into())),
            // deleted between the read and the write
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(ServiceError::store(e)),
        }
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, ServiceError> {
        let db = self.connection().await?;
        let res = product::Entity::delete_by_id(id).exec(&db).await.map_err(ServiceError::store)?;
        Ok(res.rows_affected > 0)
    }
}
