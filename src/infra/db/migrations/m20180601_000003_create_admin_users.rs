//! Migration: Create admin users table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AdminUsers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AdminUsers::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AdminUsers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(AdminUsers::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(AdminUsers::DeletedAt).timestamp_with_time_zone().null())
                    .col(
                        ColumnDef::new(AdminUsers::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(AdminUsers::FirstName).string().not_null().default(""))
                    .col(ColumnDef::new(AdminUsers::LastName).string().not_null().default(""))
                    .col(ColumnDef::new(AdminUsers::Password).string().not_null())
                    .col(ColumnDef::new(AdminUsers::LastLogin).timestamp_with_time_zone().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_admin_users_deleted_at")
                    .table(AdminUsers::Table)
                    .col(AdminUsers::DeletedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AdminUsers::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum AdminUsers {
    Table,
    Id,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
    Email,
    FirstName,
    LastName,
    Password,
    LastLogin,
}
