//! Service Container - Centralized service access.
//!
//! Handlers depend on the `ServiceContainer` trait, so integration tests can
//! swap every service for a fake.

use std::sync::Arc;

use super::{
    AdminAuthService, AdminAuthenticator, AdminUserManager, AdminUserService, ArticleReader,
    ArticleService, Bartender, ProductManager, ProductService, WebhookService,
};
use crate::config::Config;
use crate::infra::{CocktailApi, Persistence};

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
pub trait ServiceContainer: Send + Sync {
    fn webhook(&self) -> Arc<dyn WebhookService>;

    fn admin_auth(&self) -> Arc<dyn AdminAuthService>;

    fn products(&self) -> Arc<dyn ProductService>;

    fn admin_users(&self) -> Arc<dyn AdminUserService>;

    fn articles(&self) -> Arc<dyn ArticleService>;
}

/// Concrete implementation of ServiceContainer
#[derive(Clone)]
pub struct Services {
    webhook: Arc<dyn WebhookService>,
    admin_auth: Arc<dyn AdminAuthService>,
    products: Arc<dyn ProductService>,
    admin_users: Arc<dyn AdminUserService>,
    articles: Arc<dyn ArticleService>,
}

impl Services {
    pub fn new(
        webhook: Arc<dyn WebhookService>,
        admin_auth: Arc<dyn AdminAuthService>,
        products: Arc<dyn ProductService>,
        admin_users: Arc<dyn AdminUserService>,
        articles: Arc<dyn ArticleService>,
    ) -> Self {
        Self {
            webhook,
            admin_auth,
            products,
            admin_users,
            articles,
        }
    }

    /// Wire every service over one connection pool and cocktail client.
    pub fn from_connection(
        db: sea_orm::DatabaseConnection,
        cocktails: Arc<dyn CocktailApi>,
        config: Config,
    ) -> Self {
        let uow = Arc::new(Persistence::new(db));

        Self {
            webhook: Arc::new(Bartender::new(cocktails)),
            admin_auth: Arc::new(AdminAuthenticator::new(uow.clone(), config)),
            products: Arc::new(ProductManager::new(uow.clone())),
            admin_users: Arc::new(AdminUserManager::new(uow.clone())),
            articles: Arc::new(ArticleReader::new(uow)),
        }
    }
}

impl ServiceContainer for Services {
    fn webhook(&self) -> Arc<dyn WebhookService> {
        self.webhook.clone()
    }

    fn admin_auth(&self) -> Arc<dyn AdminAuthService> {
        self.admin_auth.clone()
    }

    fn products(&self) -> Arc<dyn ProductService> {
        self.products.clone()
    }

    fn admin_users(&self) -> Arc<dyn AdminUserService> {
        self.admin_users.clone()
    }

    fn articles(&self) -> Arc<dyn ArticleService> {
        self.articles.clone()
    }
}
