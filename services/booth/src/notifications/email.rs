//! Email delivery through the Resend HTTP API

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{ProviderError, api_error};

/// Production Resend endpoint
pub const RESEND_API_BASE: &str = "https://api.resend.com";

/// File attached to an outgoing email, content is base64
#[derive(Debug, Clone, PartialEq)]
pub struct EmailAttachment {
    pub filename: String,
    pub content: String,
    pub content_type: String,
}

/// An email ready to hand to a provider
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundEmail {
    pub to: String,
    pub subject: String,
    pub html: String,
    pub attachment: EmailAttachment,
}

/// Abstraction over email-sending providers
#[async_trait]
pub trait EmailProvider: Send + Sync {
    /// Send the email and return the provider's message id
    async fn send_email(&self, email: &OutboundEmail) -> Result<String, ProviderError>;
}

/// Resend client configuration
#[derive(Debug, Clone)]
pub struct ResendConfig {
    pub api_key: String,
    pub from: String,
}

impl ResendConfig {
    /// Returns `None` when no API key is set
    pub fn new(api_key: Option<&str>, from: &str) -> Option<Self> {
        let api_key = api_key.filter(|key| !key.is_empty())?;

        Some(Self {
            api_key: api_key.to_string(),
            from: from.to_string(),
        })
    }
}

#[derive(Serialize)]
struct ResendAttachment<'a> {
    filename: &'a str,
    content: &'a str,
    content_type: &'a str,
}

#[derive(Serialize)]
struct ResendEmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
    attachments: [ResendAttachment<'a>; 1],
}

#[derive(Deserialize)]
struct ResendEmailResponse {
    id: String,
}

/// Resend API client
#[derive(Clone)]
pub struct ResendClient {
    client: Client,
    config: ResendConfig,
    base_url: String,
}

impl ResendClient {
    /// Create a client for the production API
    pub fn new(config: ResendConfig, client: Client) -> Self {
        Self::with_base_url(config, client, RESEND_API_BASE)
    }

    /// Create a client against a custom base URL
    pub fn with_base_url(config: ResendConfig, client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            config,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl EmailProvider for ResendClient {
    async fn send_email(&self, email: &OutboundEmail) -> Result<String, ProviderError> {
        let body = ResendEmailRequest {
            from: &self.config.from,
            to: [email.to.as_str()],
            subject: &email.subject,
            html: &email.html,
            attachments: [ResendAttachment {
                filename: &email.attachment.filename,
                content: &email.attachment.content,
                content_type: &email.attachment.content_type,
            }],
        };

        let response = self
            .client
            .post(format!("{}/emails", self.base_url))
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let sent: ResendEmailResponse = response.json().await?;
        Ok(sent.id)
    }
}
