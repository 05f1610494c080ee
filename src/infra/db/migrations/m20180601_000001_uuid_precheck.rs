//! Migration: Require the uuid-ossp extension on Postgres.
//!
//! Product keys default to `uuid_generate_v4()`, which only exists once the
//! extension is installed. Other backends skip the check.

use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};
use sea_orm_migration::prelude::*;

use crate::config::REQUIRED_PG_EXTENSION;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        if manager.get_database_backend() != DatabaseBackend::Postgres {
            return Ok(());
        }

        let row = manager
            .get_connection()
            .query_one(Statement::from_sql_and_values(
                DatabaseBackend::Postgres,
                "SELECT COUNT(*) AS count FROM pg_extension WHERE extname = $1",
                [REQUIRED_PG_EXTENSION.into()],
            ))
            .await?;

        let count: i64 = match row {
            Some(row) => row.try_get("", "count")?,
            None => 0,
        };

        if count < 1 {
            return Err(DbErr::Migration(format!(
                "extension {} doesn't exist in the target database but is required",
                REQUIRED_PG_EXTENSION
            )));
        }

        Ok(())
    }

    async fn down(&self, _manager: &SchemaManager) -> Result<(), DbErr> {
        Ok(())
    }
}
