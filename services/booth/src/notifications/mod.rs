//! Photo strip delivery over email and SMS
//!
//! The [`Dispatcher`] owns optional handles to the email and messaging
//! providers. It validates the inbound request, builds the provider payload
//! and folds every provider failure into a [`NotificationError`].

pub mod email;
pub mod format;
pub mod sms;

use std::{fmt, sync::Arc, time::Duration};

use serde::Deserialize;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::{
    config::AppConfig,
    models::{SendPhotosRequest, SendSmsRequest},
};

use self::{
    email::{EmailAttachment, EmailProvider, OutboundEmail, ResendClient},
    sms::{OutboundMms, SmsProvider, TwilioClient},
};

/// Details returned when SMS credentials are missing or malformed
pub const SMS_NOT_CONFIGURED_DETAILS: &str = "Twilio credentials are not set up. Please configure TWILIO_ACCOUNT_SID (must start with 'AC'), TWILIO_AUTH_TOKEN, and TWILIO_PHONE_NUMBER.";

/// Delivery channel, used for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Email,
    Sms,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Email => f.write_str("email"),
            Channel::Sms => f.write_str("SMS"),
        }
    }
}

/// Failure reported by a provider client
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Transport failure, including timeouts
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-success status
    #[error("{message}")]
    Api { status: u16, message: String },

    /// A setting the provider needs is missing
    #[error("{0} is not configured")]
    NotConfigured(&'static str),
}

/// Error kinds surfaced by the dispatcher
#[derive(Error, Debug)]
pub enum NotificationError {
    /// The caller supplied incomplete input
    #[error("{0}")]
    Validation(&'static str),

    /// Required provider credentials are absent or malformed
    #[error("{channel} not configured")]
    NotConfigured {
        channel: Channel,
        details: &'static str,
    },

    /// The provider call failed
    #[error("Failed to send {channel}: {details}")]
    Dispatch { channel: Channel, details: String },

    /// The email body could not be rendered
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

impl NotificationError {
    fn dispatch(channel: Channel, err: ProviderError) -> Self {
        error!("{} send error: {}", channel, err);
        NotificationError::Dispatch {
            channel,
            details: err.to_string(),
        }
    }
}

/// Error body shape shared by Resend and Twilio
#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    message: Option<String>,
}

/// Turn a non-success provider response into a [`ProviderError::Api`]
pub(crate) async fn api_error(response: reqwest::Response) -> ProviderError {
    let status = response.status().as_u16();
    let text = response.text().await.unwrap_or_default();

    let message = serde_json::from_str::<ProviderErrorBody>(&text)
        .ok()
        .and_then(|body| body.message)
        .unwrap_or(text);

    ProviderError::Api { status, message }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Sends photo strips through the configured providers
#[derive(Clone, Default)]
pub struct Dispatcher {
    email: Option<Arc<dyn EmailProvider>>,
    sms: Option<Arc<dyn SmsProvider>>,
}

impl Dispatcher {
    /// Create a dispatcher from already constructed providers
    pub fn new(email: Option<Arc<dyn EmailProvider>>, sms: Option<Arc<dyn SmsProvider>>) -> Self {
        Self { email, sms }
    }

    /// Build the HTTP-backed providers described by the configuration
    pub fn from_config(config: &AppConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.provider_timeout_secs))
            .build()?;

        let email = config.resend().map(|resend| {
            info!("Resend email client initialized");
            Arc::new(ResendClient::new(resend, http.clone())) as Arc<dyn EmailProvider>
        });

        let sms = match config.twilio() {
            Some(twilio) => {
                info!("Twilio client initialized successfully");
                Some(Arc::new(TwilioClient::new(twilio, http)) as Arc<dyn SmsProvider>)
            }
            None => {
                warn!(
                    "Twilio credentials not configured or invalid (Account SID must start with 'AC')"
                );
                None
            }
        };

        Ok(Self::new(email, sms))
    }

    /// Whether an email provider is available
    pub fn email_configured(&self) -> bool {
        self.email.is_some()
    }

    /// Whether a messaging client was constructed
    pub fn sms_configured(&self) -> bool {
        self.sms.is_some()
    }

    /// Email the photo strip as a JPEG attachment
    ///
    /// Returns the provider's message id.
    pub async fn send_photo_email(
        &self,
        request: &SendPhotosRequest,
    ) -> Result<String, NotificationError> {
        let (Some(to), Some(photo_strip)) = (
            non_empty(request.email.as_deref()),
            non_empty(request.photo_strip.as_deref()),
        ) else {
            return Err(NotificationError::Validation(
                "Email and photo strip are required",
            ));
        };

        let session_id = request.session_id_or_placeholder();
        let today = chrono::Local::now().date_naive();

        let html = format::render_email_html(session_id, today).map_err(|e| {
            error!("Email template error: {}", e);
            NotificationError::Template(e)
        })?;

        let message = OutboundEmail {
            to: to.to_string(),
            subject: format::EMAIL_SUBJECT.to_string(),
            html,
            attachment: EmailAttachment {
                filename: format::attachment_filename(session_id),
                content: format::photo_payload(photo_strip).to_string(),
                content_type: "image/jpeg".to_string(),
            },
        };

        let provider = self.email.as_ref().ok_or_else(|| {
            NotificationError::dispatch(
                Channel::Email,
                ProviderError::NotConfigured("RESEND_API_KEY"),
            )
        })?;

        let message_id = provider
            .send_email(&message)
            .await
            .map_err(|e| NotificationError::dispatch(Channel::Email, e))?;

        info!(session_id = %session_id, message_id = %message_id, "Photo strip emailed");
        Ok(message_id)
    }

    /// Text the photo strip URL as an MMS attachment
    ///
    /// Returns the provider's message SID.
    pub async fn send_photo_sms(&self, request: &SendSmsRequest) -> Result<String, NotificationError> {
        let provider = self.sms.as_ref().ok_or(NotificationError::NotConfigured {
            channel: Channel::Sms,
            details: SMS_NOT_CONFIGURED_DETAILS,
        })?;

        let (Some(phone), Some(photo_url)) = (
            non_empty(request.phone.as_deref()),
            non_empty(request.photo_url.as_deref()),
        ) else {
            return Err(NotificationError::Validation(
                "Phone number and photo URL are required",
            ));
        };

        let message = OutboundMms {
            to: format::normalize_phone(phone),
            body: format::SMS_BODY.to_string(),
            media_url: photo_url.to_string(),
        };

        let message_sid = provider
            .send_mms(&message)
            .await
            .map_err(|e| NotificationError::dispatch(Channel::Sms, e))?;

        info!(
            session_id = request.session_id.as_deref().unwrap_or_default(),
            message_sid = %message_sid,
            "Photo strip texted"
        );
        Ok(message_sid)
    }
}
