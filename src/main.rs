//! barkeep - Application entry point
//!
//! CLI-based entry point that dispatches to various commands.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use barkeep::{
    cli::{Cli, Commands},
    commands,
    config::{Config, LogConfig, LogFormat},
};

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    if let Commands::Version = cli.command {
        commands::version::execute();
        return;
    }

    // Load configuration; logging depends on it
    let mut config = match Config::load(cli.conf.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let level = if cli.verbose {
        Some("debug".to_string())
    } else {
        cli.log_level
    };
    config.apply_log_flags(level, cli.log_format, cli.log_line);

    init_tracing(&config.log);

    for notice in config.notices() {
        tracing::warn!("{}", notice);
    }
    match &config.source {
        Some(path) => tracing::info!(path = %path.display(), "Configuration loaded"),
        None => tracing::debug!("Configuration loaded from defaults and environment"),
    }

    // Execute command
    let result = match cli.command {
        Commands::Serve(args) => commands::serve::execute(args, config).await,
        Commands::Migrate(args) => commands::migrate::execute(args, config).await,
        Commands::Admin(args) => commands::admin::execute(args, config).await,
        Commands::Version => Ok(()),
    };

    // Handle errors
    if let Err(e) = result {
        tracing::error!(error = ?e, "Command failed: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing subscriber from the log settings.
///
/// `RUST_LOG` still wins when set, for per-module filtering.
fn init_tracing(log: &LogConfig) {
    let (level, invalid) = match log.parsed_level() {
        Some(level) => (level, false),
        None => (tracing::Level::INFO, true),
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));

    let layer = match log.format {
        LogFormat::Text => tracing_subscriber::fmt::layer()
            .with_file(log.line)
            .with_line_number(log.line)
            .boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_file(log.line)
            .with_line_number(log.line)
            .boxed(),
    };

    tracing_subscriber::registry().with(layer).with(filter).init();

    if invalid {
        tracing::warn!(level = %log.level, "Invalid log level, fallback to 'info'");
    }
}
