use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::providers::ProviderError;

/// Sentinel error code telling the client to re-run the YouTube OAuth
/// flow instead of treating the failure as a dead session.
pub const YOUTUBE_TOKEN_INVALID: &str = "youtube_token_invalid";

/// Application error type for HTTP handlers.
///
/// Serializes as `{ error, message?, details? }` with a matching status
/// code. Services return this directly; provider and database errors
/// convert via `From`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("upstream error: {0}")]
    Upstream(String),

    #[error("youtube authorization expired")]
    YoutubeTokenInvalid,

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

pub type AppResult<T> = Result<T, AppError>;

#[derive(Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::NotFound("record not found".to_string()),
            other => {
                tracing::error!(error = %other, "database error");
                AppError::Internal(other.into())
            }
        }
    }
}

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::AuthExpired { provider: "youtube" } => AppError::YoutubeTokenInvalid,
            ProviderError::AuthExpired { provider } => {
                AppError::Upstream(format!("{provider} authorization expired"))
            }
            ProviderError::Credentials(which) => {
                AppError::BadRequest(format!("missing credentials: {which}"))
            }
            other => AppError::Upstream(other.to_string()),
        }
    }
}

impl From<redis::RedisError> for AppError {
    fn from(err: redis::RedisError) -> Self {
        tracing::error!(error = %err, "redis error");
        AppError::Internal(err.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "unauthorized",
                "Missing or invalid session".to_string(),
            ),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg.clone()),
            AppError::Upstream(msg) => (StatusCode::BAD_GATEWAY, "upstream_error", msg.clone()),
            AppError::YoutubeTokenInvalid => (
                StatusCode::UNAUTHORIZED,
                YOUTUBE_TOKEN_INVALID,
                "Reconnect your YouTube account".to_string(),
            ),
            AppError::Internal(err) => {
                tracing::error!(error = %err, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = ErrorBody {
            error: code.to_string(),
            message: Some(message),
            details: None,
        };

        (status, Json(body)).into_response()
    }
}
