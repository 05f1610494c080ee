//! barkeep - Dialogflow cocktail webhook with a product admin
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Configuration file, environment and constants
//! - **domain**: Core business entities and logic
//! - **services**: Webhook fulfillment, admin sessions and CRUD use cases
//! - **infra**: Database, migrations, repositories and the cocktail API client
//! - **admin**: Admin site registry (resources, paths)
//! - **api**: HTTP handlers, middleware, and routes
//! - **types**: Shared types (pagination, responses)
//! - **utils**: HTML helpers and the login page
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! barkeep serve --conf conf.toml
//!
//! # Run migrations
//! barkeep migrate up
//!
//! # Create the first admin account
//! barkeep admin create-user --email admin@example.com --password 'change me please'
//! ```

pub mod admin;
pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;
pub mod utils;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use errors::{AppError, AppResult};
