//! Infrastructure layer - External systems integration
//!
//! - Database connection, migrations and repositories
//! - The outbound cocktail API client
//! - Unit of Work for repository access

pub mod cocktail;
pub mod db;
pub mod repositories;
pub mod unit_of_work;

pub use cocktail::{CocktailApi, CocktailClient};
pub use db::{Database, MigrationStatus, Migrator};
pub use repositories::{
    AdminUserChanges, AdminUserRepository, ArticleRepository, NewAdminUser, ProductRepository,
};
pub use unit_of_work::{Persistence, UnitOfWork};

#[cfg(test)]
pub use cocktail::MockCocktailApi;
#[cfg(test)]
pub use repositories::{MockAdminUserRepository, MockArticleRepository, MockProductRepository};
#[cfg(test)]
pub use unit_of_work::MockUnitOfWork;
