// src/config.rs
use crate::domain::errors::{AppError, AppResult};
use dotenv::dotenv;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Storefront configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Backend service endpoints
    pub services: ServicesConfig,

    /// Store identity
    pub store: StoreConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Backend service endpoints. All three collaborators live behind the
/// same API base in the default deployment, but each can be pointed
/// elsewhere.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServicesConfig {
    /// API base URL, e.g. "https://apebrain.cloud/api"
    pub base_url: String,
}

/// Store identity configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Site domain, used for the guest checkout placeholder address
    pub site_domain: String,
}

impl StoreConfig {
    /// Placeholder email for guest checkouts: "guest@<site domain>".
    pub fn guest_email(&self) -> String {
        format!("guest@{}", self.site_domain)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    pub level: String,

    /// Write logs to a file instead of stderr
    pub to_file: bool,

    /// Log file path when to_file is set
    pub file_path: Option<String>,
}

impl Config {
    /// Load configuration from environment variables (with .env support)
    pub fn from_env() -> AppResult<Self> {
        dotenv().ok();

        let base_url = env::var("SHOP_API_BASE_URL")
            .map_err(|_| AppError::Config("SHOP_API_BASE_URL is not set".to_string()))?;

        let site_domain =
            env::var("SHOP_SITE_DOMAIN").unwrap_or_else(|_| "apebrain.cloud".to_string());

        let level = env::var("SHOP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let file_path = env::var("SHOP_LOG_FILE").ok();

        Ok(Self {
            services: ServicesConfig { base_url },
            store: StoreConfig { site_domain },
            logging: LoggingConfig {
                level,
                to_file: file_path.is_some(),
                file_path,
            },
        })
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> AppResult<Self> {
        let mut file = File::open(path)
            .map_err(|e| AppError::Config(format!("Failed to open config file: {}", e)))?;

        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .map_err(|e| AppError::Config(format!("Failed to read config file: {}", e)))?;

        let config: Config = serde_json::from_str(&contents)
            .map_err(|e| AppError::Config(format!("Failed to parse config file: {}", e)))?;

        Ok(config)
    }

    /// Save configuration to a file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> AppResult<()> {
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| AppError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, contents)
            .map_err(|e| AppError::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Initialize logging based on configuration
    pub fn init_logging(&self) -> AppResult<()> {
        let mut builder = env_logger::Builder::new();

        let log_level = match self.logging.level.to_lowercase().as_str() {
            "trace" => log::LevelFilter::Trace,
            "debug" => log::LevelFilter::Debug,
            "info" => log::LevelFilter::Info,
            "warn" => log::LevelFilter::Warn,
            "error" => log::LevelFilter::Error,
            _ => log::LevelFilter::Info,
        };

        builder.filter_level(log_level);

        if self.logging.to_file {
            if let Some(file_path) = &self.logging.file_path {
                let file = File::create(file_path)
                    .map_err(|e| AppError::Config(format!("Failed to create log file: {}", e)))?;

                builder.target(env_logger::Target::Pipe(Box::new(file)));
            }
        }

        builder.init();

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            services: ServicesConfig {
                base_url: "https://apebrain.cloud/api".to_string(),
            },
            store: StoreConfig {
                site_domain: "apebrain.cloud".to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                to_file: false,
                file_path: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guest_email_is_derived_from_site_domain() {
        let config = Config::default();
        assert_eq!(config.store.guest_email(), "guest@apebrain.cloud");
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.services.base_url, config.services.base_url);
        assert_eq!(parsed.logging.level, "info");
    }
}
