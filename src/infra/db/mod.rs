//! Postgres pool and schema migrations.

use std::collections::HashSet;
use std::fmt;
use std::time::Duration;

use sea_orm::{
    ConnectOptions, ConnectionTrait, Database as SeaDatabase, DatabaseConnection, DbErr,
    EntityTrait, Statement,
};
use sea_orm_migration::{seaql_migrations, MigratorTrait};

use crate::config::{Config, DB_CONNECT_TIMEOUT_SECS};

pub mod migrations;

pub use migrations::Migrator;

/// One row of `migrate status`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationStatus {
    pub name: String,
    pub applied: bool,
}

impl fmt::Display for MigrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.applied { "applied" } else { "pending" };
        write!(f, "{}: {}", self.name, state)
    }
}

/// Pair migration names, in declaration order, with the applied set.
fn statuses<I>(names: I, applied: &HashSet<String>) -> Vec<MigrationStatus>
where
    I: IntoIterator<Item = String>,
{
    names
        .into_iter()
        .map(|name| MigrationStatus {
            applied: applied.contains(&name),
            name,
        })
        .collect()
}

/// Shared handle on the connection pool
#[derive(Clone)]
pub struct Database {
    connection: DatabaseConnection,
}

impl Database {
    /// Open the pool and bring the schema up to date.
    ///
    /// Used by `serve`: a database that cannot be reached or migrated is fatal.
    pub async fn connect(config: &Config) -> Result<Self, DbErr> {
        let database = Self::connect_without_migrations(config).await?;

        database.run_migrations().await.inspect_err(|e| {
            tracing::error!(error = %e, "Failed to run migrations");
        })?;

        tracing::info!("Database connected and migrations applied");
        Ok(database)
    }

    /// Open the pool only; `migrate` drives the schema itself.
    pub async fn connect_without_migrations(config: &Config) -> Result<Self, DbErr> {
        let mut options = ConnectOptions::new(config.database.url.clone());
        options
            .connect_timeout(Duration::from_secs(DB_CONNECT_TIMEOUT_SECS))
            .sqlx_logging(false);

        let connection = SeaDatabase::connect(options).await.inspect_err(|e| {
            tracing::error!(error = %e, "Database connection failed");
        })?;
        Ok(Self { connection })
    }

    pub fn get_connection(&self) -> DatabaseConnection {
        self.connection.clone()
    }

    pub async fn run_migrations(&self) -> Result<(), DbErr> {
        Migrator::up(&self.connection, None).await
    }

    /// Undo the most recent migration.
    pub async fn rollback_migration(&self) -> Result<(), DbErr> {
        Migrator::down(&self.connection, Some(1)).await
    }

    pub async fn migration_status(&self) -> Result<Vec<MigrationStatus>, DbErr> {
        let applied: HashSet<String> = seaql_migrations::Entity::find()
            .all(&self.connection)
            .await?
            .into_iter()
            .map(|row| row.version)
            .collect();

        let names = Migrator::migrations()
            .iter()
            .map(|m| m.name().to_string())
            .collect::<Vec<_>>();

        Ok(statuses(names, &applied))
    }

    /// Drop every table, then replay all migrations.
    pub async fn fresh_migrations(&self) -> Result<(), DbErr> {
        Migrator::fresh(&self.connection).await
    }

    pub async fn ping(&self) -> Result<(), DbErr> {
        let backend = self.connection.get_database_backend();
        self.connection
            .execute(Statement::from_string(backend, "SELECT 1"))
            .await
            .map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_keeps_declaration_order() {
        let applied: HashSet<String> = ["m2".to_string()].into_iter().collect();
        let rows = statuses(vec!["m1".to_string(), "m2".to_string()], &applied);

        assert_eq!(rows[0].to_string(), "m1: pending");
        assert_eq!(rows[1].to_string(), "m2: applied");
    }

    #[test]
    fn unknown_applied_versions_are_ignored() {
        let applied: HashSet<String> = ["m_removed".to_string()].into_iter().collect();
        let rows = statuses(vec!["m1".to_string()], &applied);

        assert_eq!(rows.len(), 1);
        assert!(!rows[0].applied);
    }
}
