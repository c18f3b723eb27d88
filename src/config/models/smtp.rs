//! SMTP configuration

use serde::{Deserialize, Serialize};

/// SMTP configuration for outbound mail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmtpConfig {
    /// Relay host
    #[serde(default = "default_host")]
    pub host: String,
    /// Relay port
    #[serde(default = "default_port")]
    pub port: u16,
    /// SMTP username
    #[serde(default)]
    pub username: String,
    /// SMTP password
    #[serde(default)]
    pub password: String,
    /// Sender display name
    #[serde(default = "default_from_name")]
    pub from_name: String,
    /// Sender address
    #[serde(default = "default_from_email")]
    pub from_email: String,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            username: String::new(),
            password: String::new(),
            from_name: default_from_name(),
            from_email: default_from_email(),
        }
    }
}

impl SmtpConfig {
    /// Validate SMTP configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.host.is_empty() {
            return Err("SMTP host cannot be empty".to_string());
        }

        if self.port == 0 {
            return Err("SMTP port cannot be 0".to_string());
        }

        if self.from_email.is_empty() {
            return Err("SMTP sender address cannot be empty".to_string());
        }

        Ok(())
    }

    /// Formatted sender for the `From` header
    pub fn sender(&self) -> String {
        format!("{} <{}>", self.from_name, self.from_email)
    }
}

fn default_host() -> String {
    "smtp.mailtrap.io".to_string()
}

fn default_port() -> u16 {
    587
}

fn default_from_name() -> String {
    "ShopIT".to_string()
}

fn default_from_email() -> String {
    "noreply@shopit.example".to_string()
}
