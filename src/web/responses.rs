use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use serde::Serialize;
use tracing::error;

use crate::models::RecordId;

/// Canonical JSON payload for error responses.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ApiMessage {
    pub message: String,
}

impl ApiMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

pub type ApiError = (StatusCode, Json<ApiMessage>);

pub type ApiResult<T> = Result<Json<T>, ApiError>;

/// Helper for controllers that need to return `(StatusCode, Json<ApiMessage>)`.
pub fn json_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(ApiMessage::new(message)))
}

pub fn not_found(resource: &str) -> ApiError {
    json_error(StatusCode::NOT_FOUND, format!("{resource} not found"))
}

/// Logs a storage failure and hides its details from the client.
pub fn storage_error(err: sqlx::Error, action: &str) -> ApiError {
    error!(?err, "failed to {action}");
    json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
}

/// Unwraps a JSON body, turning any rejection into a 400.
pub fn parse_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| json_error(StatusCode::BAD_REQUEST, rejection.body_text()))
}

/// A path segment that is not an integer cannot name a stored row.
pub fn parse_id(raw: &str, resource: &str) -> Result<RecordId, ApiError> {
    raw.parse().map_err(|_| not_found(resource))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_resource() {
        let (status, Json(body)) = not_found("recipe");
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, ApiMessage::new("recipe not found"));
    }

    #[test]
    fn parse_id_maps_garbage_to_not_found() {
        assert_eq!(parse_id("15", "log").expect("id"), RecordId::from(15));

        let (status, Json(body)) = parse_id("fifteen", "log").unwrap_err();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.message, "log not found");
    }

    #[test]
    fn storage_errors_hide_details() {
        let (status, Json(body)) = storage_error(sqlx::Error::RowNotFound, "load recipe");
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.message, "internal server error");
    }
}
