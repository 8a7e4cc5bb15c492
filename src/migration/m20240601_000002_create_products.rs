use sea_orm_migration::prelude::*;

use super::m20240601_000001_create_wishlists::Wishlists;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Products::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Products::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Products::WishlistId).integer().not_null())
                    .col(
                        ColumnDef::new(Products::InventoryProductId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Products::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Products::Price).double().not_null())
                    // 1 = AVAILABLE, 0 = UNAVAILABLE
                    .col(
                        ColumnDef::new(Products::Status)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(ColumnDef::new(Products::PicUrl).text().null())
                    .col(ColumnDef::new(Products::ShortDesc).text().null())
                    // 0 = DEFAULT, 1 = IN_CART
                    .col(
                        ColumnDef::new(Products::InCartStatus)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Products::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Products::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_products_wishlist_id")
                            .from(Products::Table, Products::WishlistId)
                            .to(Wishlists::Table, Wishlists::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_products_wishlist_id")
                    .table(Products::Table)
                    .col(Products::WishlistId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Products::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Products {
    Table,
    Id,
    WishlistId,
    InventoryProductId,
    Name,
    Price,
    Status,
    PicUrl,
    ShortDesc,
    InCartStatus,
    CreatedAt,
    UpdatedAt,
}
