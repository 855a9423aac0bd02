//! Service configuration loaded from the environment

use std::{net::SocketAddr, path::PathBuf};

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

use crate::notifications::{email::ResendConfig, sms::TwilioConfig};

/// Secret used when `SECRET_KEY` is not provided
pub const DEV_SECRET_KEY: &str = "dev-secret-key-change-in-production";

/// Sender used for outgoing photo emails unless `EMAIL_FROM` overrides it
pub const DEFAULT_EMAIL_FROM: &str = "Billy's Photo Booth <billys@classicpic.com>";

/// Runtime configuration for the booth service
///
/// # Environment Variables
/// - `HOST` / `PORT`: listen address (default `0.0.0.0:5000`)
/// - `STATIC_DIR`: directory holding the built front-end (default `static`)
/// - `SECRET_KEY`: application secret
/// - `RESEND_API_KEY`, `EMAIL_FROM`: email provider settings
/// - `TWILIO_ACCOUNT_SID`, `TWILIO_AUTH_TOKEN`, `TWILIO_PHONE_NUMBER`: SMS provider settings
/// - `PROVIDER_TIMEOUT_SECS`: per-request timeout for provider calls (default 15)
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub static_dir: PathBuf,
    pub secret_key: String,
    pub resend_api_key: Option<String>,
    pub email_from: String,
    pub twilio_account_sid: Option<String>,
    pub twilio_auth_token: Option<String>,
    pub twilio_phone_number: Option<String>,
    pub provider_timeout_secs: u64,
}

impl AppConfig {
    /// Build the configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 5000)?
            .set_default("static_dir", "static")?
            .set_default("secret_key", DEV_SECRET_KEY)?
            .set_default("email_from", DEFAULT_EMAIL_FROM)?
            .set_default("provider_timeout_secs", 15)?
            .add_source(Environment::default())
            .build()?
            .try_deserialize()
    }

    /// Socket address the HTTP server binds to
    pub fn bind_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }

    /// Whether the secret key is still the development placeholder
    pub fn uses_dev_secret(&self) -> bool {
        self.secret_key == DEV_SECRET_KEY
    }

    /// Email provider settings, present only when an API key is configured
    pub fn resend(&self) -> Option<ResendConfig> {
        ResendConfig::new(self.resend_api_key.as_deref(), &self.email_from)
    }

    /// Messaging provider settings, present only when the credentials are usable
    pub fn twilio(&self) -> Option<TwilioConfig> {
        TwilioConfig::new(
            self.twilio_account_sid.as_deref(),
            self.twilio_auth_token.as_deref(),
            self.twilio_phone_number.as_deref(),
        )
    }
}
