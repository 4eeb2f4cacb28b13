use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errors raised by the pure calculators when an input falls outside the
/// domain they are defined on. Every variant is a caller mistake.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    #[error("Unknown pay grade '{0}'")]
    InvalidGrade(String),

    #[error("Unknown state '{0}'")]
    UnknownState(String),

    #[error("Unknown credential '{0}'")]
    UnknownCredential(String),

    #[error("{field} {message}")]
    OutOfRange {
        field: &'static str,
        message: String,
    },

    #[error("{0} is required")]
    MissingField(&'static str),
}

impl CalcError {
    pub fn out_of_range(field: &'static str, message: impl Into<String>) -> Self {
        CalcError::OutOfRange {
            field,
            message: message.into(),
        }
    }
}

/// Rejects NaN, infinities and negatives.
pub fn non_negative(field: &'static str, value: f64) -> Result<f64, CalcError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(CalcError::out_of_range(field, "must be zero or greater"))
    }
}

pub fn positive(field: &'static str, value: f64) -> Result<f64, CalcError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(CalcError::out_of_range(field, "must be greater than zero"))
    }
}

/// Inclusive range check.
pub fn within(field: &'static str, value: f64, min: f64, max: f64) -> Result<f64, CalcError> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(CalcError::out_of_range(
            field,
            format!("must be between {min} and {max}"),
        ))
    }
}

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Too many requests: {0}")]
    TooManyRequests(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<CalcError> for AppError {
    fn from(err: CalcError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::TooManyRequests(msg) => {
                (StatusCode::TOO_MANY_REQUESTS, "RATE_LIMITED", msg.clone())
            }
            AppError::Llm(msg) => {
                tracing::error!("LLM error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "LLM_ERROR",
                    "An AI processing error occurred".to_string(),
                )
            }
            AppError::Unavailable(msg) => {
                tracing::error!("Service unavailable: {msg}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "UNAVAILABLE",
                    "This feature is not available right now".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": message,
            "code": code,
        }));

        (status, body).into_response()
    }
}
