//! Outbound mail delivery

use crate::config::SmtpConfig;
use crate::utils::error::{ApiError, Result};
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    transport::smtp::authentication::Credentials,
};
use tracing::info;

/// SMTP mailer for transactional mail
#[derive(Clone)]
pub struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: String,
}

impl Mailer {
    /// Create a mailer from configuration
    pub fn new(config: &SmtpConfig) -> Result<Self> {
        let credentials = Credentials::new(config.username.clone(), config.password.clone());

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| ApiError::Config(format!("Invalid SMTP relay {}: {}", config.host, e)))?
            .port(config.port)
            .credentials(credentials)
            .build();

        Ok(Self {
            transport,
            sender: config.sender(),
        })
    }

    /// Send a plain-text message; failures surface with the relay's message
    pub async fn send(&self, to: &str, subject: &str, body: &str) -> Result<()> {
        let email = Message::builder()
            .from(
                self.sender
                    .parse()
                    .map_err(|_| ApiError::Config(format!("Invalid sender address: {}", self.sender)))?,
            )
            .to(to
                .parse()
                .map_err(|_| ApiError::validation(format!("Invalid email address: {}", to)))?)
            .subject(subject)
            .body(body.to_string())
            .map_err(|e| ApiError::upstream(format!("Failed to build message: {}", e)))?;

        self.transport
            .send(email)
            .await
            .map_err(|e| ApiError::upstream(format!("Email could not be sent: {}", e)))?;

        info!(to = %to, subject = %subject, "Email sent successfully");
        Ok(())
    }
}

/// Body of the password recovery mail
pub fn password_reset_body(reset_url: &str) -> String {
    format!(
        "Your password reset link is as follows:\n\n{}\n\nIf you have not requested this email, then ignore it.",
        reset_url
    )
}
