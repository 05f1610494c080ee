//! Application state - Dependency injection container.

use std::sync::Arc;

use crate::admin::AdminSite;
use crate::config::Config;
use crate::infra::{CocktailApi, Database};
use crate::services::{ServiceContainer, Services};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<dyn ServiceContainer>,
    pub admin: Arc<AdminSite>,
}

impl AppState {
    /// Wire the real services over the database and cocktail client.
    pub fn from_config(database: &Database, cocktails: Arc<dyn CocktailApi>, config: Config) -> Self {
        let admin = AdminSite::new(&config.admin);
        let services = Services::from_connection(database.get_connection(), cocktails, config);

        Self::new(Arc::new(services), admin)
    }

    /// State over arbitrary service implementations.
    pub fn new(services: Arc<dyn ServiceContainer>, admin: AdminSite) -> Self {
        Self {
            services,
            admin: Arc::new(admin),
        }
    }
}
