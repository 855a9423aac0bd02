//! Booth service routes

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tower_http::{
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tracing::{debug, warn};

use crate::{
    error::{ApiError, ApiResult},
    models::{
        HealthResponse, NewSession, SendPhotosRequest, SendPhotosResponse, SendSmsRequest,
        SendSmsResponse, SettingValueResponse, UNKNOWN_SESSION_ID, UpdateSettingRequest,
    },
    notifications::format::normalize_phone,
    state::AppState,
};

const MAX_SESSION_ID_LEN: usize = 20;
const MAX_EMAIL_LEN: usize = 255;
const MAX_PHONE_LEN: usize = 20;
const MAX_PHOTO_TYPE_LEN: usize = 10;
const MAX_SETTING_KEY_LEN: usize = 100;

/// Sized for base64 photo strips
const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

/// Create the router for the booth service
///
/// Anything outside `/api` is served from the static directory, falling back
/// to `index.html` so client-side routes resolve.
pub fn create_router(state: AppState) -> Router {
    let index = state.static_dir.join("index.html");
    let static_files = ServeDir::new(&state.static_dir).fallback(ServeFile::new(index));

    let api = Router::new()
        .route("/health", get(health_check))
        .route("/send-photos", post(send_photos))
        .route("/send-sms", post(send_sms))
        .route("/sessions", post(create_session))
        .route("/sessions/:id", get(get_session))
        .route("/settings", get(list_settings))
        .route("/settings/:key", get(get_setting).put(update_setting))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES));

    Router::new()
        .nest("/api", api)
        .fallback_service(static_files)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}

/// Reject values longer than the column that stores them
fn check_len(field: &str, value: Option<&str>, max: usize) -> ApiResult<()> {
    match value {
        Some(value) if value.chars().count() > max => Err(ApiError::BadRequest(format!(
            "{} must be at most {} characters",
            field, max
        ))),
        _ => Ok(()),
    }
}

/// Session id worth flagging, ignoring blanks and the email placeholder
fn tracked_session(session_id: Option<&str>) -> Option<&str> {
    session_id.filter(|id| !id.is_empty() && *id != UNKNOWN_SESSION_ID)
}

/// Health check endpoint, reports provider configuration only
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy",
        email_configured: state.dispatcher.email_configured(),
        sms_configured: state.dispatcher.sms_configured(),
    })
}

/// Email a photo strip
pub async fn send_photos(
    State(state): State<AppState>,
    payload: Result<Json<SendPhotosRequest>, JsonRejection>,
) -> ApiResult<Json<SendPhotosResponse>> {
    let request = json_body(payload)?;
    let message_id = state.dispatcher.send_photo_email(&request).await?;

    if let (Some(session_id), Some(email)) = (
        tracked_session(request.session_id.as_deref()),
        request.email.as_deref(),
    ) {
        match state
            .session_repository
            .mark_email_sent(session_id, email)
            .await
        {
            Ok(true) => {}
            Ok(false) => debug!("Email sent for unrecorded session {}", session_id),
            Err(e) => warn!("Failed to flag email as sent for session {}: {}", session_id, e),
        }
    }

    Ok(Json(SendPhotosResponse {
        success: true,
        message_id,
    }))
}

/// Text a photo strip link
pub async fn send_sms(
    State(state): State<AppState>,
    payload: Result<Json<SendSmsRequest>, JsonRejection>,
) -> ApiResult<Json<SendSmsResponse>> {
    let request = json_body(payload)?;
    let message_sid = state.dispatcher.send_photo_sms(&request).await?;

    if let (Some(session_id), Some(phone)) = (
        tracked_session(request.session_id.as_deref()),
        request.phone.as_deref(),
    ) {
        match state
            .session_repository
            .mark_sms_sent(session_id, &normalize_phone(phone))
            .await
        {
            Ok(true) => {}
            Ok(false) => debug!("SMS sent for unrecorded session {}", session_id),
            Err(e) => warn!("Failed to flag SMS as sent for session {}: {}", session_id, e),
        }
    }

    Ok(Json(SendSmsResponse {
        success: true,
        message_sid,
    }))
}

/// Record a new booth session
pub async fn create_session(
    State(state): State<AppState>,
    payload: Result<Json<NewSession>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let new_session = json_body(payload)?;

    if new_session.id.trim().is_empty() {
        return Err(ApiError::BadRequest("Session id is required".to_string()));
    }
    check_len("Session id", Some(&new_session.id), MAX_SESSION_ID_LEN)?;
    check_len("Email", new_session.email.as_deref(), MAX_EMAIL_LEN)?;
    check_len("Phone", new_session.phone.as_deref(), MAX_PHONE_LEN)?;
    check_len("Photo type", new_session.photo_type.as_deref(), MAX_PHOTO_TYPE_LEN)?;

    let session = state.session_repository.create(&new_session).await?;

    Ok((StatusCode::CREATED, Json(session)))
}

/// Get a session by ID
pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let session = state
        .session_repository
        .find_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Session not found".to_string()))?;

    Ok(Json(session))
}

/// List every stored setting
pub async fn list_settings(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let settings = state.settings_repository.list().await?;

    Ok(Json(settings))
}

/// Read a single setting, `value` is null when unset
pub async fn get_setting(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let value = state.settings_repository.get(&key, None).await?;

    Ok(Json(SettingValueResponse { key, value }))
}

/// Create or overwrite a setting
pub async fn update_setting(
    State(state): State<AppState>,
    Path(key): Path<String>,
    payload: Result<Json<UpdateSettingRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let request = json_body(payload)?;

    check_len("Setting key", Some(&key), MAX_SETTING_KEY_LEN)?;

    let setting = state
        .settings_repository
        .set(&key, request.value.as_deref())
        .await?;

    Ok(Json(setting))
}
