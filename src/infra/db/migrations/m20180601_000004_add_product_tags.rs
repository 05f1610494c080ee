//! Migration: Add a tag array to products.

use sea_orm::sea_query::{ColumnType, StringLen};
use sea_orm_migration::prelude::*;

use crate::config::MAX_TAG_LENGTH;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(Products::Table)
                    .add_column(
                        ColumnDef::new(Products::Tags)
                            .array(ColumnType::String(StringLen::N(MAX_TAG_LENGTH as u32)))
                            .not_null()
                            .default(Expr::cust("'{}'")),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(Products::Table)
                    .drop_column(Products::Tags)
                    .to_owned(),
            )
            .await
    }
}

#[derive(Iden)]
enum Products {
    Table,
    Tags,
}
