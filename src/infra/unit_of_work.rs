//! Unit of Work: one place to reach every repository.
//!
//! Services receive a `UnitOfWork` instead of individual repositories, so a
//! new repository only touches this file and the container.

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use super::repositories::{
    AdminUserRepository, AdminUserStore, ArticleRepository, ArticleStore, ProductRepository,
    ProductStore,
};

#[cfg(test)]
use mockall::automock;

/// Repository access for services.
#[cfg_attr(test, automock)]
pub trait UnitOfWork: Send + Sync {
    fn products(&self) -> Arc<dyn ProductRepository>;

    fn admin_users(&self) -> Arc<dyn AdminUserRepository>;

    fn articles(&self) -> Arc<dyn ArticleRepository>;
}

/// Concrete implementation of UnitOfWork over a shared connection pool
pub struct Persistence {
    products: Arc<ProductStore>,
    admin_users: Arc<AdminUserStore>,
    articles: Arc<ArticleStore>,
}

impl Persistence {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            products: Arc::new(ProductStore::new(db.clone())),
            admin_users: Arc::new(AdminUserStore::new(db.clone())),
            articles: Arc::new(ArticleStore::new(db)),
        }
    }
}

impl UnitOfWork for Persistence {
    fn products(&self) -> Arc<dyn ProductRepository> {
        self.products.clone()
    }

    fn admin_users(&self) -> Arc<dyn AdminUserRepository> {
        self.admin_users.clone()
    }

    fn articles(&self) -> Arc<dyn ArticleRepository> {
        self.articles.clone()
    }
}
