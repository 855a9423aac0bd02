//! MMS delivery through the Twilio Messages API

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::{ProviderError, api_error};

/// Production Twilio REST endpoint
pub const TWILIO_API_BASE: &str = "https://api.twilio.com";

/// Prefix every Twilio account SID carries
const ACCOUNT_SID_PREFIX: &str = "AC";

/// A text message with a single media attachment
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundMms {
    pub to: String,
    pub body: String,
    pub media_url: String,
}

/// Abstraction over text-messaging providers
#[async_trait]
pub trait SmsProvider: Send + Sync {
    /// Send the message and return the provider's message SID
    async fn send_mms(&self, message: &OutboundMms) -> Result<String, ProviderError>;
}

/// Twilio credentials and sender number
#[derive(Debug, Clone)]
pub struct TwilioConfig {
    pub account_sid: String,
    pub auth_token: String,
    pub from_number: Option<String>,
}

impl TwilioConfig {
    /// Returns `None` unless the account SID starts with `AC` and a token is set
    pub fn new(
        account_sid: Option<&str>,
        auth_token: Option<&str>,
        from_number: Option<&str>,
    ) -> Option<Self> {
        let account_sid = account_sid.filter(|sid| sid.starts_with(ACCOUNT_SID_PREFIX))?;
        let auth_token = auth_token.filter(|token| !token.is_empty())?;

        Some(Self {
            account_sid: account_sid.to_string(),
            auth_token: auth_token.to_string(),
            from_number: from_number
                .filter(|number| !number.is_empty())
                .map(str::to_string),
        })
    }
}

#[derive(Deserialize)]
struct TwilioMessageResponse {
    sid: String,
}

/// Twilio API client
#[derive(Clone)]
pub struct TwilioClient {
    client: Client,
    config: TwilioConfig,
    base_url: String,
}

impl TwilioClient {
    /// Create a client for the production API
    pub fn new(config: TwilioConfig, client: Client) -> Self {
        Self::with_base_url(config, client, TWILIO_API_BASE)
    }

    /// Create a client against a custom base URL
    pub fn with_base_url(config: TwilioConfig, client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            config,
            base_url: base_url.into(),
        }
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.base_url, self.config.account_sid
        )
    }
}

#[async_trait]
impl SmsProvider for TwilioClient {
    async fn send_mms(&self, message: &OutboundMms) -> Result<String, ProviderError> {
        let from = self
            .config
            .from_number
            .as_deref()
            .ok_or(ProviderError::NotConfigured("TWILIO_PHONE_NUMBER"))?;

        let form = [
            ("Body", message.body.as_str()),
            ("From", from),
            ("To", message.to.as_str()),
            ("MediaUrl", message.media_url.as_str()),
        ];

        let response = self
            .client
            .post(self.messages_url())
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(&form)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let created: TwilioMessageResponse = response.json().await?;
        Ok(created.sid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_message() -> OutboundMms {
        OutboundMms {
            to: "+15551234567".to_string(),
            body: "Thanks!".to_string(),
            media_url: "https://example.com/strip.jpg".to_string(),
        }
    }

    fn test_config(from: Option<&str>) -> TwilioConfig {
        TwilioConfig::new(Some("AC123"), Some("secret"), from).unwrap()
    }

    #[test]
    fn test_config_requires_ac_prefix_and_token() {
        assert!(TwilioConfig::new(None, Some("t"), None).is_none());
        assert!(TwilioConfig::new(Some("SK123"), Some("t"), None).is_none());
        assert!(TwilioConfig::new(Some("AC123"), None, None).is_none());
        assert!(TwilioConfig::new(Some("AC123"), Some(""), None).is_none());

        let config = TwilioConfig::new(Some("AC123"), Some("t"), Some("")).unwrap();
        assert!(config.from_number.is_none());
    }

    #[tokio::test]
    async fn test_send_mms_posts_form_to_account_messages() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/2010-04-01/Accounts/AC123/Messages.json"))
            .and(header_exists("authorization"))
            .and(body_string_contains("To=%2B15551234567"))
            .and(body_string_contains("From=%2B15550000000"))
            .and(body_string_contains(
                "MediaUrl=https%3A%2F%2Fexample.com%2Fstrip.jpg",
            ))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(serde_json::json!({ "sid": "SM42" })),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = TwilioClient::with_base_url(
            test_config(Some("+15550000000")),
            Client::new(),
            mock_server.uri(),
        );
        let sid = client.send_mms(&test_message()).await.unwrap();
        assert_eq!(sid, "SM42");
    }

    #[tokio::test]
    async fn test_send_mms_surfaces_twilio_error_message() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "code": 21211,
                "message": "The 'To' number +1555 is not a valid phone number.",
                "status": 400
            })))
            .mount(&mock_server)
            .await;

        let client = TwilioClient::with_base_url(
            test_config(Some("+15550000000")),
            Client::new(),
            mock_server.uri(),
        );
        let err = client.send_mms(&test_message()).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "The 'To' number +1555 is not a valid phone number."
        );
    }

    #[tokio::test]
    async fn test_send_mms_without_sender_fails_before_request() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&mock_server)
            .await;

        let client = TwilioClient::with_base_url(test_config(None), Client::new(), mock_server.uri());
        let err = client.send_mms(&test_message()).await.unwrap_err();
        assert!(matches!(
            err,
            ProviderError::NotConfigured("TWILIO_PHONE_NUMBER")
        ));
    }
}
