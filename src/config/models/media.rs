//! Image host configuration

use serde::{Deserialize, Serialize};

/// Image host configuration (Cloudinary-style upload API)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaConfig {
    /// API base URL; overridable so tests can point at a local mock
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Cloud name segment of the upload URL
    #[serde(default)]
    pub cloud_name: String,
    /// API key
    #[serde(default)]
    pub api_key: String,
    /// API secret used to sign requests
    #[serde(default)]
    pub api_secret: String,
    /// Folder for avatar uploads
    #[serde(default = "default_avatar_folder")]
    pub avatar_folder: String,
    /// Folder for product image uploads
    #[serde(default = "default_product_folder")]
    pub product_folder: String,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            cloud_name: String::new(),
            api_key: String::new(),
            api_secret: String::new(),
            avatar_folder: default_avatar_folder(),
            product_folder: default_product_folder(),
        }
    }
}

impl MediaConfig {
    /// Validate image host configuration
    pub fn validate(&self) -> Result<(), String> {
        url::Url::parse(&self.base_url)
            .map_err(|e| format!("Invalid media base URL {}: {}", self.base_url, e))?;

        if self.avatar_folder.is_empty() || self.product_folder.is_empty() {
            return Err("Media upload folders cannot be empty".to_string());
        }

        Ok(())
    }
}

fn default_base_url() -> String {
    "https://api.cloudinary.com".to_string()
}

fn default_avatar_folder() -> String {
    "avatars".to_string()
}

fn default_product_folder() -> String {
    "products".to_string()
}
