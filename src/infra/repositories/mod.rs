//! Repository layer - Data access abstraction
//!
//! Repositories hide sea-orm behind traits so services can be tested
//! against mocks.

mod admin_user_repository;
mod article_repository;
pub(crate) mod entities;
mod product_repository;

pub use admin_user_repository::{AdminUserChanges, AdminUserRepository, AdminUserStore, NewAdminUser};
pub use article_repository::{ArticleRepository, ArticleStore};
pub use product_repository::{ProductRepository, ProductStore};

#[cfg(test)]
pub use admin_user_repository::MockAdminUserRepository;
#[cfg(test)]
pub use article_repository::MockArticleRepository;
#[cfg(test)]
pub use product_repository::MockProductRepository;
