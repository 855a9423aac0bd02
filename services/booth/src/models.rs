//! API models for request and response payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Photo style recorded when a session does not specify one ("black & white")
pub const DEFAULT_PHOTO_TYPE: &str = "bw";

/// Placeholder used in emails when the caller omits the session id
pub const UNKNOWN_SESSION_ID: &str = "N/A";

/// One photo-booth customer interaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Session {
    pub id: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub photo_type: String,
    pub email_sent: bool,
    pub sms_sent: bool,
    pub created_at: Option<DateTime<Utc>>,
}

/// Payload for starting a session; the id is assigned by the booth
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSession {
    pub id: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub photo_type: Option<String>,
}

/// Key/value runtime setting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Setting {
    pub id: i32,
    pub key: String,
    pub value: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `PUT /api/settings/:key`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSettingRequest {
    pub value: Option<String>,
}

/// Response for `GET /api/settings/:key`
#[derive(Debug, Clone, Serialize)]
pub struct SettingValueResponse {
    pub key: String,
    pub value: Option<String>,
}

/// Body of `POST /api/send-photos`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendPhotosRequest {
    pub email: Option<String>,
    pub photo_strip: Option<String>,
    pub session_id: Option<String>,
}

impl SendPhotosRequest {
    /// Session id to print in the email
    ///
    /// Only a missing id gets the placeholder; an empty string is kept as sent.
    pub fn session_id_or_placeholder(&self) -> &str {
        self.session_id.as_deref().unwrap_or(UNKNOWN_SESSION_ID)
    }
}

/// Body of `POST /api/send-sms`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendSmsRequest {
    pub phone: Option<String>,
    pub photo_url: Option<String>,
    pub session_id: Option<String>,
}

/// Response for a delivered email
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendPhotosResponse {
    pub success: bool,
    pub message_id: String,
}

/// Response for a delivered text message
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendSmsResponse {
    pub success: bool,
    pub message_sid: String,
}

/// Response for `GET /api/health`
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub email_configured: bool,
    pub sms_configured: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_session_serializes_created_at_as_iso_string() {
        let session = Session {
            id: "ABC123".to_string(),
            email: Some("guest@example.com".to_string()),
            phone: None,
            photo_type: DEFAULT_PHOTO_TYPE.to_string(),
            email_sent: true,
            sms_sent: false,
            created_at: Some(Utc.with_ymd_and_hms(2024, 5, 1, 18, 30, 0).unwrap()),
        };

        let value = serde_json::to_value(&session).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "ABC123",
                "email": "guest@example.com",
                "phone": null,
                "photo_type": "bw",
                "email_sent": true,
                "sms_sent": false,
                "created_at": "2024-05-01T18:30:00Z"
            })
        );
    }

    #[test]
    fn test_session_without_timestamp_serializes_null() {
        let session = Session {
            id: "X".to_string(),
            email: None,
            phone: None,
            photo_type: "color".to_string(),
            email_sent: false,
            sms_sent: false,
            created_at: None,
        };

        let value = serde_json::to_value(&session).unwrap();
        assert!(value["created_at"].is_null());
    }

    #[test]
    fn test_send_photos_request_tolerates_missing_keys() {
        let request: SendPhotosRequest = serde_json::from_value(json!({
            "email": "guest@example.com"
        }))
        .unwrap();

        assert_eq!(request.email.as_deref(), Some("guest@example.com"));
        assert!(request.photo_strip.is_none());
        assert_eq!(request.session_id_or_placeholder(), UNKNOWN_SESSION_ID);
    }

    #[test]
    fn test_empty_session_id_is_not_replaced() {
        let request: SendPhotosRequest = serde_json::from_value(json!({
            "email": "guest@example.com",
            "photoStrip": "QQ==",
            "sessionId": ""
        }))
        .unwrap();
        assert_eq!(request.session_id_or_placeholder(), "");

        let request: SendPhotosRequest = serde_json::from_value(json!({
            "sessionId": null
        }))
        .unwrap();
        assert_eq!(request.session_id_or_placeholder(), UNKNOWN_SESSION_ID);
    }

    #[test]
    fn test_send_sms_request_uses_camel_case() {
        let request: SendSmsRequest = serde_json::from_value(json!({
            "phone": "555-123-4567",
            "photoUrl": "https://example.com/strip.jpg",
            "sessionId": "S1"
        }))
        .unwrap();

        assert_eq!(request.photo_url.as_deref(), Some("https://example.com/strip.jpg"));
        assert_eq!(request.session_id.as_deref(), Some("S1"));
    }

    #[test]
    fn test_response_field_names() {
        let email = serde_json::to_value(SendPhotosResponse {
            success: true,
            message_id: "m1".to_string(),
        })
        .unwrap();
        assert_eq!(email, json!({"success": true, "messageId": "m1"}));

        let sms = serde_json::to_value(SendSmsResponse {
            success: true,
            message_sid: "SM1".to_string(),
        })
        .unwrap();
        assert_eq!(sms, json!({"success": true, "messageSid": "SM1"}));
    }
}
