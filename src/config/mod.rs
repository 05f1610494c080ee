//! Application configuration module
//!
//! Handles the configuration file, environment variables and
//! application-wide constants.

mod constants;
mod settings;

pub use constants::*;
pub use settings::{
    AdminConfig, CocktailConfig, Config, DatabaseConfig, LogConfig, LogFormat, ServerConfig,
};
