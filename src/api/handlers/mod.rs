//! HTTP request handlers.

pub mod admin_handler;
pub mod article_handler;
pub mod health_handler;
pub mod session_handler;
pub mod webhook_handler;

pub use admin_handler::admin_routes;
pub use article_handler::article_routes;
pub use health_handler::health;
pub use session_handler::session_routes;
pub use webhook_handler::webhook;
