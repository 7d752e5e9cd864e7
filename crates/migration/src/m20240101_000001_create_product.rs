//! Create `product` table.
//! Every document field is nullable; only `id` and the insertion timestamp are required.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Product::Table)
                    .if_not_exists()
                    .col(uuid(Product::Id).primary_key())
                    .col(string_null(Product::Name))
                    .col(text_null(Product::Description))
                    .col(double_null(Product::Price))
                    .col(big_integer_null(Product::Quantity))
                    .col(string_null(Product::Category))
                    .col(timestamp_with_time_zone(Product::CreatedAt).not_null())
                    .to_owned(),
            )
            .await?;

        // Listing order
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_product_created_at")
                    .table(Product::Table)
                    .col(Product::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Product::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Product {
    Table,
    Id,
    Name,
    Description,
    Price,
    Quantity,
    Category,
    CreatedAt,
}
