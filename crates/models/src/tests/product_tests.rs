use crate::db::connect;
use crate::product;
use anyhow::Result;
use chrono::Utc;
use migration::MigratorTrait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, Set};
use uuid::Uuid;

async fn setup_test_db() -> Option<DatabaseConnection> {
    if std::env::var("SKIP_DB_TESTS").is_ok() || std::env::var("DATABASE_URL").is_err() {
        eprintln!("skip: DATABASE_URL not set");
        return None;
    }
    let db = connect().await.ok()?;
    migration::Migrator::up(&db, None).await.ok()?;
    Some(db)
}

#[tokio::test]
async fn test_product_entity_crud() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let id = Uuid::new_v4();
    let created = product::ActiveModel {
        id: Set(id),
        name: Set(Some("Widget".into())),
        description: Set(None),
        price: Set(Some(9.99)),
        quantity: Set(Some(5)),
        category: Set(Some("tools".into())),
        created_at: Set(Utc::now().into()),
    }
    .insert(&db)
    .await?;
    assert_eq!(created.id, id);
    assert_eq!(created.description, None);

    let found = product::Entity::find_by_id(id).one(&db).await?.expect("inserted row");
    assert_eq!(found.name.as_deref(), Some("Widget"));

    let mut am = found.into_active_model();
    am.price = Set(Some(7.49));
    let updated = am.update(&db).await?;
    assert_eq!(updated.price, Some(7.49));
    assert_eq!(updated.quantity, Some(5));

    let res = product::Entity::delete_by_id(id).exec(&db).await?;
    assert_eq!(res.rows_affected, 1);
    assert!(product::Entity::find_by_id(id).one(&db).await?.is_none());
    Ok(())
}
