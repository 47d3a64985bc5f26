//! Configuration module for Filebox.

use serde::Deserialize;
use std::path::Path;

use crate::file::ExtensionValidator;
use crate::{FileboxError, Result};

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// CORS allowed origins.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: vec![],
        }
    }
}

/// File storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct FilesConfig {
    /// Path to the file storage directory.
    #[serde(default = "default_storage_path")]
    pub storage_path: String,
    /// Maximum upload size in bytes.
    #[serde(default = "default_max_upload_size")]
    pub max_upload_size_bytes: u64,
    /// Accepted filename extensions (compared case-insensitively).
    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: Vec<String>,
}

fn default_storage_path() -> String {
    "uploads".to_string()
}

fn default_max_upload_size() -> u64 {
    16 * 1024 * 1024
}

fn default_allowed_extensions() -> Vec<String> {
    [
        "txt", "pdf", "png", "jpg", "jpeg", "gif", "doc", "docx", "xls", "xlsx", "csv",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            storage_path: default_storage_path(),
            max_upload_size_bytes: default_max_upload_size(),
            allowed_extensions: default_allowed_extensions(),
        }
    }
}

/// Shared-secret authentication configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthConfig {
    /// API key expected in the `X-API-Key` header (must be set).
    #[serde(default)]
    pub api_key: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/filebox.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// File storage configuration.
    #[serde(default)]
    pub files: FilesConfig,
    /// Authentication configuration.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            FileboxError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| FileboxError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `FILEBOX_API_KEY`: Override the shared API key
    pub fn apply_env_overrides(&mut self) {
        if let Ok(api_key) = std::env::var("FILEBOX_API_KEY") {
            if !api_key.is_empty() {
                self.auth.api_key = api_key;
            }
        }
    }

    /// Validate the configuration.
    ///
    /// Returns an error if:
    /// - the API key is not set
    /// - the upload limit is zero
    /// - no usable extension is allowed (blank and bare `.` entries do not count)
    pub fn validate(&self) -> Result<()> {
        if self.auth.api_key.is_empty() {
            return Err(FileboxError::Config(
                "api_key is not set. \
                 Set it in config.toml or via FILEBOX_API_KEY environment variable."
                    .to_string(),
            ));
        }
        if self.files.max_upload_size_bytes == 0 {
            return Err(FileboxError::Config(
                "max_upload_size_bytes must be greater than zero".to_string(),
            ));
        }
        if ExtensionValidator::new(&self.files.allowed_extensions).is_empty() {
            return Err(FileboxError::Config(
                "allowed_extensions must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
