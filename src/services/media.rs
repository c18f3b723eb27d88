//! Image host client
//!
//! Talks to a Cloudinary-style upload API. The base URL comes from
//! configuration so tests can point the client at a local mock server.

use crate::config::MediaConfig;
use crate::utils::error::{ApiError, Result};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::time::Duration;
use tracing::{debug, info};

/// Hosted image reference returned by the upload endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct UploadedImage {
    pub public_id: String,
    pub secure_url: String,
}

/// HTTP client for the image host
#[derive(Clone, Debug)]
pub struct MediaClient {
    http: reqwest::Client,
    config: MediaConfig,
}

impl MediaClient {
    /// Create a client from configuration
    pub fn new(config: &MediaConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ApiError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            config: config.clone(),
        })
    }

    /// Upload an avatar payload into the configured avatar folder
    pub async fn upload_avatar(&self, payload: &str) -> Result<UploadedImage> {
        self.upload(payload, &self.config.avatar_folder).await
    }

    /// Upload a product image payload into the configured product folder
    pub async fn upload_product_image(&self, payload: &str) -> Result<UploadedImage> {
        self.upload(payload, &self.config.product_folder).await
    }

    /// Upload an image payload (a data URI or remote URL) into a folder
    pub async fn upload(&self, payload: &str, folder: &str) -> Result<UploadedImage> {
        let timestamp = chrono::Utc::now().timestamp().to_string();
        let signature = self.sign(&[("folder", folder), ("timestamp", &timestamp)]);

        let body = serde_json::json!({
            "file": payload,
            "folder": folder,
            "timestamp": timestamp,
            "api_key": self.config.api_key,
            "signature": signature,
        });

        let url = format!(
            "{}/v1_1/{}/image/upload",
            self.config.base_url, self.config.cloud_name
        );
        debug!("Uploading image to folder: {}", folder);

        let response = self.http.post(&url).json(&body).send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(ApiError::upstream(format!(
                "Image host returned {}: {}",
                status, detail
            )));
        }

        let image = response.json::<UploadedImage>().await?;
        info!("Uploaded image: {}", image.public_id);
        Ok(image)
    }

    /// Remove a hosted image
    pub async fn destroy(&self, public_id: &str) -> Result<()> {
        let timestamp = chrono::Utc::now().timestamp().to_string();
        let signature = self.sign(&[("public_id", public_id), ("timestamp", &timestamp)]);

        let body = serde_json::json!({
            "public_id": public_id,
            "timestamp": timestamp,
            "api_key": self.config.api_key,
            "signature": signature,
        });

        let url = format!(
            "{}/v1_1/{}/image/destroy",
            self.config.base_url, self.config.cloud_name
        );
        debug!("Destroying image: {}", public_id);

        let response = self.http.post(&url).json(&body).send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(ApiError::upstream(format!(
                "Image host returned {}: {}",
                status, detail
            )));
        }

        info!("Destroyed image: {}", public_id);
        Ok(())
    }

    /// Request signature: sorted `k=v` pairs joined by `&`, secret appended,
    /// SHA-256 hex digest.
    fn sign(&self, params: &[(&str, &str)]) -> String {
        let mut sorted: Vec<&(&str, &str)> = params.iter().collect();
        sorted.sort_by_key(|(name, _)| *name);

        let joined = sorted
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect::<Vec<_>>()
            .join("&");

        let mut hasher = Sha256::new();
        hasher.update(joined.as_bytes());
        hasher.update(self.config.api_secret.as_bytes());
        hex::encode(hasher.finalize())
    }
}
