//! CLI argument definitions.
//!
//! Uses clap derive macros for type-safe argument parsing.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// barkeep - cocktail webhook and product admin server
#[derive(Parser, Debug)]
#[command(name = "barkeep")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(long = "conf", global = true, env = "CONFIG_PATH")]
    pub conf: Option<PathBuf>,

    /// One of debug, info, warn, error or fatal
    #[arg(long = "log-level", alias = "log.level", global = true)]
    pub log_level: Option<String>,

    /// One of text or json
    #[arg(long = "log-format", alias = "log.format", global = true)]
    pub log_format: Option<String>,

    /// Enable file name and line number in logs
    #[arg(long = "log-line", alias = "log.line", global = true)]
    pub log_line: bool,

    /// Shorthand for --log-level debug
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server
    Serve(ServeArgs),

    /// Run database migrations
    Migrate(MigrateArgs),

    /// Show build and version
    Version,

    /// Manage admin accounts
    Admin(AdminArgs),
}

/// Arguments for the serve command; unset values come from configuration
#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// Host to bind to
    #[arg(short = 'H', long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,
}

/// Arguments for the migrate command
#[derive(Args, Debug)]
pub struct MigrateArgs {
    #[command(subcommand)]
    pub action: MigrateAction,
}

/// Migration actions
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrateAction {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset and re-run all migrations
    Fresh,
}

/// Arguments for the admin command
#[derive(Args, Debug)]
pub struct AdminArgs {
    #[command(subcommand)]
    pub action: AdminAction,
}

#[derive(Subcommand, Debug)]
pub enum AdminAction {
    /// Create an admin account able to sign in to the admin
    CreateUser {
        #[arg(long)]
        email: String,
        #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long, default_value = "")]
        first_name: String,
        #[arg(long, default_value = "")]
        last_name: String,
    },
}
