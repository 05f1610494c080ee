//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure. Database-backed
//! services reach repositories through the Unit of Work.

mod admin_auth_service;
mod admin_user_service;
mod article_service;
pub mod container;
mod product_service;
mod webhook_service;

pub use container::{ServiceContainer, Services};

pub use admin_auth_service::{AdminAuthService, AdminAuthenticator, AdminSession, SessionClaims};
pub use admin_user_service::{AdminUserManager, AdminUserService};
pub use article_service::{ArticleReader, ArticleService};
pub use product_service::{ProductManager, ProductService};
pub use webhook_service::{Bartender, WebhookService};

#[cfg(test)]
pub use container::MockServiceContainer;
