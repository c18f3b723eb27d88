//! Configuration management for the storefront
//!
//! Configuration is an explicit value passed to the components that need
//! it. It is loaded once at startup from a YAML file, layered with
//! environment overrides, and validated before the server starts.

pub mod models;

pub use models::*;

use crate::utils::error::{ApiError, Result};
use std::env;
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct for the storefront
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// MongoDB configuration
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Token and password-reset configuration
    #[serde(default)]
    pub auth: AuthConfig,
    /// Outbound mail configuration
    #[serde(default)]
    pub smtp: SmtpConfig,
    /// Image host configuration
    #[serde(default)]
    pub media: MediaConfig,
}

impl Config {
    /// Load configuration from file, apply environment overrides, validate
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ApiError::Config(format!("Failed to read config file: {}", e)))?;

        let mut config: Config = serde_yaml::from_str(&content)
            .map_err(|e| ApiError::Config(format!("Failed to parse config: {}", e)))?;

        config.apply_env()?;
        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Build configuration from defaults plus environment overrides
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let mut config = Config::default();
        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Apply environment variable overrides in place
    pub fn apply_env(&mut self) -> Result<()> {
        if let Ok(host) = env::var("STOREFRONT_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = env::var("STOREFRONT_PORT") {
            self.server.port = port
                .parse()
                .map_err(|e| ApiError::Config(format!("Invalid port: {}", e)))?;
        }
        if let Ok(workers) = env::var("STOREFRONT_WORKERS") {
            self.server.workers = Some(
                workers
                    .parse()
                    .map_err(|e| ApiError::Config(format!("Invalid workers count: {}", e)))?,
            );
        }

        if let Ok(uri) = env::var("MONGO_URI") {
            self.database.uri = uri;
        }
        if let Ok(database) = env::var("MONGO_DB") {
            self.database.database = database;
        }

        if let Ok(jwt_secret) = env::var("JWT_SECRET") {
            self.auth.jwt_secret = jwt_secret;
        }
        if let Ok(ttl) = env::var("JWT_TTL_DAYS") {
            self.auth.token_ttl_days = ttl
                .parse()
                .map_err(|e| ApiError::Config(format!("Invalid token lifetime: {}", e)))?;
        }

        if let Ok(host) = env::var("SMTP_HOST") {
            self.smtp.host = host;
        }
        if let Ok(port) = env::var("SMTP_PORT") {
            self.smtp.port = port
                .parse()
                .map_err(|e| ApiError::Config(format!("Invalid SMTP port: {}", e)))?;
        }
        if let Ok(username) = env::var("SMTP_USERNAME") {
            self.smtp.username = username;
        }
        if let Ok(password) = env::var("SMTP_PASSWORD") {
            self.smtp.password = password;
        }

        if let Ok(base_url) = env::var("MEDIA_BASE_URL") {
            self.media.base_url = base_url;
        }
        if let Ok(cloud_name) = env::var("MEDIA_CLOUD_NAME") {
            self.media.cloud_name = cloud_name;
        }
        if let Ok(api_key) = env::var("MEDIA_API_KEY") {
            self.media.api_key = api_key;
        }
        if let Ok(api_secret) = env::var("MEDIA_API_SECRET") {
            self.media.api_secret = api_secret;
        }

        Ok(())
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.server
            .validate()
            .map_err(|e| ApiError::Config(format!("Server config error: {}", e)))?;

        self.server
            .cors
            .validate()
            .map_err(|e| ApiError::Config(format!("CORS config error: {}", e)))?;

        self.database
            .validate()
            .map_err(|e| ApiError::Config(format!("Database config error: {}", e)))?;

        self.auth
            .validate()
            .map_err(|e| ApiError::Config(format!("Auth config error: {}", e)))?;

        self.smtp
            .validate()
            .map_err(|e| ApiError::Config(format!("SMTP config error: {}", e)))?;

        self.media
            .validate()
            .map_err(|e| ApiError::Config(format!("Media config error: {}", e)))?;

        debug!("Configuration validation completed");
        Ok(())
    }
}
