//! Configuration management for the flight lookup service
//!
//! Handles loading configuration from an optional TOML file and environment
//! variables, and validates the values before the server starts.

use crate::FlightLookupError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Environment variable holding the provider credential when not set via
/// `FLIGHTLOOKUP_AVIATION__API_KEY`
pub const API_KEY_ENV: &str = "AVIATION_API_KEY";

/// Environment variable pointing at the configuration file
pub const CONFIG_PATH_ENV: &str = "FLIGHTLOOKUP_CONFIG";

/// Root configuration structure for the flight lookup service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlightLookupConfig {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Aviation data provider settings
    #[serde(default)]
    pub aviation: AviationConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind
    #[serde(default = "default_server_host")]
    pub host: String,
    /// Port to listen on
    #[serde(default = "default_server_port")]
    pub port: u16,
    /// Directory served under `/static`
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
    /// Certificate and key for serving HTTPS
    #[serde(default)]
    pub tls: Option<TlsConfig>,
}

/// PEM files used when serving HTTPS
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TlsConfig {
    pub cert_path: PathBuf,
    pub key_path: PathBuf,
}

/// Aviation data provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AviationConfig {
    /// Provider access key. Lookups fail with a configuration error without it.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Base URL of the provider API
    #[serde(default = "default_aviation_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_aviation_timeout")]
    pub timeout_seconds: u32,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
    /// OTLP/HTTP traces endpoint, e.g. `http://localhost:4318/v1/traces`
    #[serde(default)]
    pub otlp_endpoint: Option<String>,
}

// Default value functions
fn default_server_host() -> String {
    "0.0.0.0".to_string()
}

fn default_server_port() -> u16 {
    3000
}

fn default_static_dir() -> String {
    "static".to_string()
}

fn default_aviation_base_url() -> String {
    "http://api.aviationstack.com/v1".to_string()
}

fn default_aviation_timeout() -> u32 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            static_dir: default_static_dir(),
            tls: None,
        }
    }
}

impl Default for AviationConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_aviation_base_url(),
            timeout_seconds: default_aviation_timeout(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            otlp_endpoint: None,
        }
    }
}

impl FlightLookupConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(env::var_os(CONFIG_PATH_ENV).map(PathBuf::from))
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| PathBuf::from("config.toml"));

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment overrides, e.g. FLIGHTLOOKUP_AVIATION__API_KEY
        builder = builder.add_source(
            Environment::with_prefix("FLIGHTLOOKUP")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: FlightLookupConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        if config.aviation.api_key.is_none() {
            config.aviation.api_key = env::var(API_KEY_ENV).ok();
        }

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self
            .aviation
            .api_key
            .as_deref()
            .is_some_and(|key| key.trim().is_empty())
        {
            self.aviation.api_key = None;
        }
        if self.aviation.base_url.is_empty() {
            self.aviation.base_url = default_aviation_base_url();
        }
        if self.aviation.timeout_seconds == 0 {
            self.aviation.timeout_seconds = default_aviation_timeout();
        }
        if self.server.host.is_empty() {
            self.server.host = default_server_host();
        }
        if self.server.static_dir.is_empty() {
            self.server.static_dir = default_static_dir();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Address the server binds to
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.aviation.timeout_seconds > 300 {
            return Err(FlightLookupError::config(
                "Aviation API timeout cannot exceed 300 seconds",
            )
            .into());
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(FlightLookupError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(FlightLookupError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if !self.aviation.base_url.starts_with("http://")
            && !self.aviation.base_url.starts_with("https://")
        {
            return Err(FlightLookupError::config(
                "Aviation API base URL must be a valid HTTP or HTTPS URL",
            )
            .into());
        }

        Ok(())
    }
}
