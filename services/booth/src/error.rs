//! Custom error types for the booth API

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::{
    notifications::{Channel, NotificationError},
    repositories::RepositoryError,
};

/// Custom error type for the booth API
#[derive(Error, Debug)]
pub enum ApiError {
    /// Bad request with message
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Requested record does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Delivery failed or could not be attempted
    #[error(transparent)]
    Notification(#[from] NotificationError),

    /// Persistence failure
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// Internal server error
    #[error("Internal server error")]
    InternalServerError,
}

impl ApiError {
    fn parts(self) -> (StatusCode, String, Option<String>) {
        match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, None),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            ApiError::Notification(NotificationError::Validation(msg)) => {
                (StatusCode::BAD_REQUEST, msg.to_string(), None)
            }
            ApiError::Notification(NotificationError::NotConfigured { channel, details }) => (
                StatusCode::SERVICE_UNAVAILABLE,
                format!("{} not configured", channel),
                Some(details.to_string()),
            ),
            ApiError::Notification(NotificationError::Dispatch { channel, details }) => {
                let message = match channel {
                    Channel::Email => "Failed to send email",
                    Channel::Sms => "Failed to send SMS",
                };
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    message.to_string(),
                    Some(details),
                )
            }
            ApiError::Notification(NotificationError::Template(e)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to send email".to_string(),
                Some(e.to_string()),
            ),
            ApiError::Repository(err @ RepositoryError::Conflict(_)) => {
                (StatusCode::CONFLICT, err.to_string(), None)
            }
            ApiError::Repository(RepositoryError::Database(e)) => {
                error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error".to_string(),
                    None,
                )
            }
            ApiError::InternalServerError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
                None,
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message, details) = self.parts();

        let body = match details {
            Some(details) => json!({ "error": error_message, "details": details }),
            None => json!({ "error": error_message }),
        };

        (status, Json(body)).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::SMS_NOT_CONFIGURED_DETAILS;

    async fn render(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_validation_maps_to_400() {
        let (status, body) = render(ApiError::Notification(NotificationError::Validation(
            "Email and photo strip are required",
        )))
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Email and photo strip are required" }));
    }

    #[tokio::test]
    async fn test_not_configured_maps_to_503_with_details() {
        let (status, body) = render(ApiError::Notification(NotificationError::NotConfigured {
            channel: Channel::Sms,
            details: SMS_NOT_CONFIGURED_DETAILS,
        }))
        .await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"], "SMS not configured");
        assert_eq!(body["details"], SMS_NOT_CONFIGURED_DETAILS);
    }

    #[tokio::test]
    async fn test_dispatch_maps_to_500_with_provider_text() {
        let (status, body) = render(ApiError::Notification(NotificationError::Dispatch {
            channel: Channel::Email,
            details: "domain not verified".to_string(),
        }))
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            json!({ "error": "Failed to send email", "details": "domain not verified" })
        );
    }

    #[tokio::test]
    async fn test_template_failure_maps_to_email_500() {
        let (status, body) = render(ApiError::Notification(NotificationError::Template(
            askama::Error::Fmt,
        )))
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to send email");
        assert!(body["details"].is_string());
    }

    #[tokio::test]
    async fn test_conflict_maps_to_409() {
        let (status, body) = render(ApiError::Repository(RepositoryError::Conflict(
            "Session S1".to_string(),
        )))
        .await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "Session S1 already exists");
    }

    #[tokio::test]
    async fn test_database_error_hides_internals() {
        let (status, body) =
            render(ApiError::Repository(RepositoryError::Database(sqlx::Error::PoolTimedOut))).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Database error" }));
    }
}
