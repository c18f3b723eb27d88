//! Database configuration

use serde::{Deserialize, Serialize};

/// MongoDB configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Connection string
    #[serde(default = "default_uri")]
    pub uri: String,
    /// Database name
    #[serde(default = "default_database")]
    pub database: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            uri: default_uri(),
            database: default_database(),
        }
    }
}

impl DatabaseConfig {
    /// Validate database configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.uri.is_empty() {
            return Err("Database URI cannot be empty".to_string());
        }

        if !self.uri.starts_with("mongodb://") && !self.uri.starts_with("mongodb+srv://") {
            return Err(format!("Unsupported database URI scheme: {}", self.uri));
        }

        if self.database.is_empty() {
            return Err("Database name cannot be empty".to_string());
        }

        Ok(())
    }
}

fn default_uri() -> String {
    "mongodb://localhost:27017".to_string()
}

fn default_database() -> String {
    "shopit".to_string()
}
