//! Configuration management for the Kitchen Command backend
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with KC_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Remote record store configuration
    pub store: StoreConfig,

    /// Local snapshot cache configuration
    pub snapshot: SnapshotConfig,

    /// Sales report generation configuration
    pub report: ReportConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    /// Base URL of the remote record store API
    pub base_url: String,

    /// Optional API key sent with every request
    pub api_key: Option<String>,

    /// Per-request timeout in seconds
    pub timeout_seconds: u64,

    /// Maximum delivery attempts for background synchronization
    pub sync_max_attempts: u32,

    /// Base delay between sync retries in milliseconds, doubled per attempt
    pub sync_base_delay_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SnapshotConfig {
    /// Path of the JSON file holding the last-persisted product list
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReportConfig {
    /// Report generation API endpoint; local summaries only when unset
    pub api_endpoint: Option<String>,

    /// Report generation API key
    pub api_key: Option<String>,

    /// Per-request timeout in seconds
    pub timeout_seconds: u64,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("KC_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("store.base_url", "http://localhost:8000")?
            .set_default("store.timeout_seconds", 10)?
            .set_default("store.sync_max_attempts", 3)?
            .set_default("store.sync_base_delay_ms", 500)?
            .set_default("snapshot.path", "data/products.json")?
            .set_default("report.timeout_seconds", 60)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (KC_ prefix)
            .add_source(
                Environment::with_prefix("KC")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}
