//! CLI module - Command-line interface for the application.
//!
//! - `serve` - Start the HTTP server
//! - `migrate` - Database migrations
//! - `version` - Build and version information
//! - `admin` - Admin account management

pub mod args;

pub use args::{Cli, Commands};
