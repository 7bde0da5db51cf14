use anyhow::{bail, Context, Result};
use chrono::NaiveTime;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub hours: HoursConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    #[serde(default = "default_num_threads")]
    pub num_threads: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    #[serde(default = "default_expires_minutes")]
    pub expires_minutes: i64,
}

/// Operating hours of the restaurant. Product mutations are rejected
/// while the current time-of-day falls inside [opening, closing].
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct HoursConfig {
    #[serde(default = "default_opening")]
    pub opening: NaiveTime,
    #[serde(default = "default_closing")]
    pub closing: NaiveTime,
}

impl Default for HoursConfig {
    fn default() -> Self {
        Self {
            opening: default_opening(),
            closing: default_closing(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            categories: default_categories(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default = "default_console")]
    pub console: bool,
}

// Default value functions
fn default_num_threads() -> usize {
    num_cpus::get()
}

fn default_expires_minutes() -> i64 {
    60
}

fn default_opening() -> NaiveTime {
    NaiveTime::from_hms_opt(10, 0, 0).unwrap()
}

fn default_closing() -> NaiveTime {
    NaiveTime::from_hms_opt(23, 0, 0).unwrap()
}

fn default_categories() -> Vec<String> {
    ["Burgers", "Sides", "Drinks", "Desserts"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

fn default_console() -> bool {
    false
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .context("Failed to parse config file")?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        // Validate server config
        if self.server.port == 0 {
            bail!("Server port must be greater than 0");
        }

        if self.server.num_threads == 0 {
            bail!("num_threads must be greater than 0");
        }

        // Validate jwt config. The minimum key length is enforced again at
        // signing time; an empty secret is always a misconfiguration.
        if self.jwt.secret.is_empty() {
            bail!("jwt secret must not be empty");
        }

        if self.jwt.issuer.is_empty() {
            bail!("jwt issuer must not be empty");
        }

        if self.jwt.audience.is_empty() {
            bail!("jwt audience must not be empty");
        }

        if self.jwt.expires_minutes <= 0 {
            bail!("jwt expires_minutes must be greater than 0");
        }

        // Validate operating hours
        if self.hours.opening >= self.hours.closing {
            bail!(
                "Opening time ({}) must be before closing time ({})",
                self.hours.opening,
                self.hours.closing
            );
        }

        // Validate catalog config
        if self.catalog.categories.is_empty() {
            bail!("At least one catalog category must be configured");
        }

        if self.catalog.categories.iter().any(|name| name.trim().is_empty()) {
            bail!("Catalog category names must not be blank");
        }

        // Validate logging config
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            bail!(
                "Invalid log level '{}'. Must be one of: trace, debug, info, warn, error",
                self.logging.level
            );
        }

        let valid_formats = ["json", "console"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            bail!(
                "Invalid log format '{}'. Must be one of: json, console",
                self.logging.format
            );
        }

        Ok(())
    }
}
