use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use atelier_core::error::CoreError;
use atelier_fal::FalError;
use atelier_pollinations::PollinationsError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds transport-specific
/// variants for the database and the two external APIs. Implements
/// [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `atelier-core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A failure from the image generation API.
    #[error(transparent)]
    Fal(#[from] FalError),

    /// A failure from the prompt-rewriting API.
    #[error(transparent)]
    Pollinations(#[from] PollinationsError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Upstream { status, message } => {
                    tracing::warn!(status, error = %message, "Upstream failure");
                    (upstream_status(*status), "UPSTREAM_ERROR", message.clone())
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- External API errors ---
            AppError::Fal(err) => classify_fal_error(err),
            AppError::Pollinations(err) => classify_pollinations_error(err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Everything else maps to 500 with a sanitized message; the original
///   error is only logged server-side.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}

/// Map a generation API failure: the upstream status passes through when
/// the provider answered, everything else is a 500.
fn classify_fal_error(err: &FalError) -> (StatusCode, &'static str, String) {
    match err {
        FalError::Api { status, .. } => {
            tracing::warn!(status, error = %err, "Generation API failure");
            (
                upstream_status(*status),
                "UPSTREAM_ERROR",
                "Failed to generate image".to_string(),
            )
        }
        FalError::Request(_) | FalError::UnexpectedResponse(_) => {
            tracing::error!(error = %err, "Generation API failure");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "UPSTREAM_ERROR",
                "Failed to generate image".to_string(),
            )
        }
    }
}

/// Map a prompt-rewriting failure; non-2xx upstream statuses pass through
/// with the upstream body in the message.
fn classify_pollinations_error(err: &PollinationsError) -> (StatusCode, &'static str, String) {
    match err {
        PollinationsError::Api { status, body } => {
            tracing::warn!(status, error = %err, "Text API failure");
            (
                upstream_status(*status),
                "UPSTREAM_ERROR",
                format!("Text API error: {status} - {body}"),
            )
        }
        PollinationsError::Request(_)
        | PollinationsError::UnexpectedResponse(_)
        | PollinationsError::MissingContent => {
            tracing::error!(error = %err, "Text API failure");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "UPSTREAM_ERROR",
                "Prompt rewrite failed".to_string(),
            )
        }
    }
}

/// Best-effort conversion of an upstream status code, defaulting to 500.
fn upstream_status(status: u16) -> StatusCode {
    StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}
