//! Application settings.
//!
//! Values are resolved in order: built-in defaults, TOML configuration file,
//! environment variables, then command-line flags.

use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;
use tracing::Level;

use super::constants::{
    CONFIG_SEARCH_DIRS, DEFAULT_ADMIN_SITE_NAME, DEFAULT_COCKTAIL_API_URL,
    DEFAULT_COCKTAIL_TIMEOUT_SECS, DEFAULT_CONFIG_FILE, DEFAULT_DATABASE_URL,
    DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT, DEFAULT_SESSION_EXPIRATION_HOURS,
    MAX_SESSION_EXPIRATION_HOURS, MIN_COOKIE_SECRET_LENGTH,
};
use crate::errors::{AppError, AppResult};

/// Application configuration
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub cocktail: CocktailConfig,
    pub admin: AdminConfig,
    pub log: LogConfig,
    /// File the configuration was read from, if any
    #[serde(skip)]
    pub source: Option<PathBuf>,
    /// Messages produced while loading, emitted once logging is initialized
    #[serde(skip)]
    notices: Vec<String>,
}

/// HTTP listener settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Database settings
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
}

/// Cocktail API client settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CocktailConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

/// Admin interface and session settings
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Path prefix under which login, logout and admin routes are mounted
    pub prefix: String,
    pub site_name: String,
    cookie_secret: String,
    pub session_expiration_hours: i64,
}

/// Logging settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// One of trace, debug, info, warn, error or fatal
    pub level: String,
    #[serde(skip)]
    pub format: LogFormat,
    /// `format` as written in the file, resolved once parsing is done
    #[serde(rename = "format")]
    format_name: Option<String>,
    /// Include source file and line in log events
    pub line: bool,
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{}'", other)),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_SERVER_HOST.to_string(),
            port: DEFAULT_SERVER_PORT,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
        }
    }
}

impl Default for CocktailConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_COCKTAIL_API_URL.to_string(),
            timeout_secs: DEFAULT_COCKTAIL_TIMEOUT_SECS,
        }
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            site_name: DEFAULT_ADMIN_SITE_NAME.to_string(),
            cookie_secret: String::new(),
            session_expiration_hours: DEFAULT_SESSION_EXPIRATION_HOURS,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Text,
            format_name: None,
            line: false,
        }
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &"[REDACTED]")
            .finish()
    }
}

impl fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminConfig")
            .field("prefix", &self.prefix)
            .field("site_name", &self.site_name)
            .field("cookie_secret", &"[REDACTED]")
            .field("session_expiration_hours", &self.session_expiration_hours)
            .finish()
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("server", &self.server)
            .field("database", &self.database)
            .field("cocktail", &self.cocktail)
            .field("admin", &self.admin)
            .field("log", &self.log)
            .field("source", &self.source)
            .finish()
    }
}

impl Config {
    /// Load configuration from file and environment.
    ///
    /// An explicit `path` must exist and parse. Without one, `conf.toml` is
    /// looked up in the search directories and its absence is only noted.
    pub fn load(path: Option<&Path>) -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::find_default_file() {
                Some(found) => Self::from_file(&found)?,
                None => {
                    let mut config = Self::default();
                    config.notices.push("No configuration file found".to_string());
                    config
                }
            },
        };

        config.apply_env(|key| env::var(key).ok());
        config.finalize()?;
        Ok(config)
    }

    /// Parse a configuration file.
    pub fn from_file(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AppError::config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let mut config = Self::from_toml_str(&content)
            .map_err(|e| AppError::config(format!("{}: {}", path.display(), e)))?;
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> AppResult<Self> {
        let mut config: Self = toml::from_str(content)
            .map_err(|e| AppError::config(format!("Invalid configuration: {}", e)))?;
        if let Some(name) = config.log.format_name.take() {
            config.set_log_format(&name);
        }
        Ok(config)
    }

    fn find_default_file() -> Option<PathBuf> {
        CONFIG_SEARCH_DIRS
            .iter()
            .map(|dir| Path::new(dir).join(DEFAULT_CONFIG_FILE))
            .find(|candidate| candidate.is_file())
    }

    /// Override values from environment variables read through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("SERVER_HOST") {
            self.server.host = v;
        }
        if let Some(v) = lookup("SERVER_PORT").and_then(|v| v.parse().ok()) {
            self.server.port = v;
        }
        if let Some(v) = lookup("DATABASE_URL") {
            self.database.url = v;
        }
        if let Some(v) = lookup("COCKTAIL_API_URL") {
            self.cocktail.base_url = v;
        }
        if let Some(v) = lookup("COCKTAIL_TIMEOUT_SECS").and_then(|v| v.parse().ok()) {
            self.cocktail.timeout_secs = v;
        }
        if let Some(v) = lookup("ADMIN_PREFIX") {
            self.admin.prefix = v;
        }
        if let Some(v) = lookup("ADMIN_SITE_NAME") {
            self.admin.site_name = v;
        }
        if let Some(v) = lookup("COOKIE_SECRET") {
            self.admin.cookie_secret = v;
        }
        if let Some(v) = lookup("SESSION_EXPIRATION_HOURS").and_then(|v| v.parse().ok()) {
            self.admin.session_expiration_hours = v;
        }
        if let Some(v) = lookup("LOG_LEVEL") {
            self.log.level = v;
        }
        if let Some(v) = lookup("LOG_FORMAT") {
            self.set_log_format(&v);
        }
        if let Some(v) = lookup("LOG_LINE") {
            self.log.line = matches!(v.as_str(), "1" | "true" | "TRUE" | "yes");
        }
    }

    /// Apply command-line logging flags on top of file and environment.
    pub fn apply_log_flags(&mut self, level: Option<String>, format: Option<String>, line: bool) {
        if let Some(level) = level {
            self.log.level = level;
        }
        if let Some(format) = format {
            self.set_log_format(&format);
        }
        if line {
            self.log.line = true;
        }
    }

    fn set_log_format(&mut self, value: &str) {
        match value.parse() {
            Ok(format) => self.log.format = format,
            Err(e) => {
                self.notices.push(format!("{}, fallback to 'text'", e));
                self.log.format = LogFormat::Text;
            }
        }
    }

    /// Validate secrets and session lifetime once every source has been applied.
    fn finalize(&mut self) -> AppResult<()> {
        let hours = self.admin.session_expiration_hours;
        if !(1..=MAX_SESSION_EXPIRATION_HOURS).contains(&hours) {
            return Err(AppError::config(format!(
                "SESSION_EXPIRATION_HOURS must be between 1 and {}, got {}",
                MAX_SESSION_EXPIRATION_HOURS, hours
            )));
        }

        if self.admin.cookie_secret.is_empty() {
            if cfg!(debug_assertions) {
                self.notices.push(
                    "COOKIE_SECRET not set, using insecure default for development".to_string(),
                );
                self.admin.cookie_secret = "dev-cookie-secret-minimum-32-chars!!".to_string();
            } else {
                return Err(AppError::config(
                    "COOKIE_SECRET must be set in production",
                ));
            }
        }

        if self.admin.cookie_secret.len() < MIN_COOKIE_SECRET_LENGTH {
            return Err(AppError::config(format!(
                "COOKIE_SECRET must be at least {} characters long",
                MIN_COOKIE_SECRET_LENGTH
            )));
        }

        Ok(())
    }

    /// Warnings gathered while loading.
    pub fn notices(&self) -> &[String] {
        &self.notices
    }

    /// Get cookie secret bytes for session signing/verification.
    pub fn cookie_secret_bytes(&self) -> &[u8] {
        self.admin.cookie_secret.as_bytes()
    }

    /// Set the cookie secret directly (used by tests and embedding).
    pub fn with_cookie_secret(mut self, secret: impl Into<String>) -> Self {
        self.admin.cookie_secret = secret.into();
        self
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Outbound cocktail API timeout.
    pub fn cocktail_timeout(&self) -> Duration {
        Duration::from_secs(self.cocktail.timeout_secs)
    }
}

impl LogConfig {
    /// Parsed log level; `None` when the configured value is not a level.
    ///
    /// `fatal` is accepted and treated as `error`.
    pub fn parsed_level(&self) -> Option<Level> {
        let level = self.level.trim().to_ascii_lowercase();
        match level.as_str() {
            "fatal" | "panic" => Some(Level::ERROR),
            other => Level::from_str(other).ok(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_applied_to_empty_file() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config.server.port, DEFAULT_SERVER_PORT);
        assert_eq!(config.cocktail.base_url, DEFAULT_COCKTAIL_API_URL);
        assert_eq!(config.cocktail.timeout_secs, 10);
        assert_eq!(config.admin.prefix, "");
        assert_eq!(config.log.format, LogFormat::Text);
    }

    #[test]
    fn file_sections_override_defaults() {
        let config = Config::from_toml_str(
            r#"
            [server]
            port = 9000

            [admin]
            prefix = "/backoffice"

            [log]
            level = "debug"
            format = "json"
            line = true
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, DEFAULT_SERVER_HOST);
        assert_eq!(config.admin.prefix, "/backoffice");
        assert_eq!(config.log.format, LogFormat::Json);
        assert!(config.log.line);
        assert_eq!(config.log.parsed_level(), Some(Level::DEBUG));
    }

    #[test]
    fn malformed_file_is_rejected() {
        assert!(Config::from_toml_str("[server\nport = ").is_err());
    }

    #[test]
    fn environment_overrides_file() {
        let mut config = Config::from_toml_str("[server]\nport = 9000").unwrap();
        config.apply_env(|key| match key {
            "SERVER_PORT" => Some("9100".to_string()),
            "ADMIN_PREFIX" => Some("/shop".to_string()),
            "LOG_FORMAT" => Some("JSON".to_string()),
            _ => None,
        });

        assert_eq!(config.server.port, 9100);
        assert_eq!(config.admin.prefix, "/shop");
        assert_eq!(config.log.format, LogFormat::Json);
    }

    #[test]
    fn unknown_log_format_falls_back_to_text() {
        let mut config = Config::default();
        config.apply_log_flags(None, Some("xml".to_string()), false);
        assert_eq!(config.log.format, LogFormat::Text);
        assert_eq!(config.notices().len(), 1);
    }

    #[test]
    fn unknown_log_format_in_file_falls_back_to_text() {
        let config = Config::from_toml_str("[log]\nformat = \"xml\"").unwrap();
        assert_eq!(config.log.format, LogFormat::Text);
        assert_eq!(config.notices().len(), 1);
        assert!(config.notices()[0].contains("xml"));
    }

    #[test]
    fn invalid_level_is_not_parsed() {
        let log = LogConfig {
            level: "loud".to_string(),
            ..LogConfig::default()
        };
        assert_eq!(log.parsed_level(), None);
    }

    #[test]
    fn fatal_maps_to_error() {
        let log = LogConfig {
            level: "fatal".to_string(),
            ..LogConfig::default()
        };
        assert_eq!(log.parsed_level(), Some(Level::ERROR));
    }

    #[test]
    fn short_cookie_secret_is_rejected() {
        let mut config = Config::default().with_cookie_secret("short");
        assert!(config.finalize().is_err());
    }

    fn with_session_hours(hours: i64) -> Config {
        let mut config = Config::default().with_cookie_secret(SECRET);
        config.admin.session_expiration_hours = hours;
        config
    }

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    #[test]
    fn session_lifetime_must_be_positive() {
        assert!(with_session_hours(0).finalize().is_err());
        assert!(with_session_hours(-1).finalize().is_err());
        assert!(with_session_hours(1).finalize().is_ok());
    }

    #[test]
    fn session_lifetime_is_capped() {
        assert!(with_session_hours(MAX_SESSION_EXPIRATION_HOURS).finalize().is_ok());
        assert!(with_session_hours(MAX_SESSION_EXPIRATION_HOURS + 1)
            .finalize()
            .is_err());

        let mut config = Config::default().with_cookie_secret(SECRET);
        config.apply_env(|key| match key {
            "SESSION_EXPIRATION_HOURS" => Some(i64::MAX.to_string()),
            _ => None,
        });
        assert!(config.finalize().is_err());
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let config = Config::default().with_cookie_secret("a-very-secret-value-that-is-long-enough");
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("a-very-secret-value"));
        assert!(!rendered.contains("password@localhost"));
    }
}
