//! Error taxonomy shared by every REST handler.
//!
//! Handlers return `Result<Json<Value>, ApiError>`; the `IntoResponse` impl
//! maps each variant to its HTTP status. Upstream model failures are logged
//! with full detail but surface to the client as a generic message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use crate::ai::AiError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Missing or malformed required request field → 400.
    #[error("validation: {0}")]
    Validation(String),

    /// Invalid credentials on login → 401.
    #[error("auth: {0}")]
    Auth(String),

    /// Entity id not found → 404.
    #[error("not found: {0}")]
    NotFound(String),

    /// The model-completion API call failed or returned no content → 502.
    #[error(transparent)]
    Upstream(#[from] AiError),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    /// Shorthand for the common "field must not be empty" rejection.
    pub fn missing_field(field: &str) -> Self {
        Self::Validation(format!("'{field}' is required and must not be empty"))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Auth(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ApiError::Upstream(e) => {
                error!(err = %e, "AI upstream call failed");
                (
                    StatusCode::BAD_GATEWAY,
                    "AI service unavailable".to_string(),
                )
            }
            ApiError::Internal(e) => {
                error!(err = %e, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Reject a request when a required string field is empty or whitespace-only.
pub fn require_field<'a>(value: &'a str, field: &str) -> Result<&'a str, ApiError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ApiError::missing_field(field));
    }
    Ok(trimmed)
}
