use std::sync::LazyLock;

use axum::{extract::State, http::HeaderMap, Json};
use chrono::Utc;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::analytics::{AnalyticsEvent, EventName};
use crate::email::rate_limit::RateDecision;
use crate::errors::AppError;
use crate::state::AppState;

static EMAIL_PATTERN: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$"));

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN
        .as_ref()
        .is_ok_and(|pattern| pattern.is_match(email))
}

/// First `x-forwarded-for` hop, else `x-real-ip`, else `"unknown"`.
pub fn client_key(headers: &HeaderMap) -> String {
    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty());

    let real_ip = headers
        .get("x-real-ip")
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty());

    forwarded.or(real_ip).unwrap_or("unknown").to_string()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailCaptureRequest {
    pub email: Option<String>,
    pub tool_name: Option<String>,
    pub timestamp: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct EmailCaptureResponse {
    pub message: String,
    pub success: bool,
}

/// POST /api/email/capture
pub async fn handle_capture(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<EmailCaptureRequest>,
) -> Result<Json<EmailCaptureResponse>, AppError> {
    let client = client_key(&headers);

    if let RateDecision::Limited { retry_after } = state.rate_limiter.check(&client) {
        warn!(
            "Email capture rate limited for {client}, retry in {}s",
            retry_after.as_secs()
        );
        return Err(AppError::TooManyRequests(
            "Too many requests. Please try again later.".to_string(),
        ));
    }

    let email = req
        .email
        .as_deref()
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .ok_or_else(|| AppError::Validation("Email is required".to_string()))?;

    if !is_valid_email(email) {
        return Err(AppError::Validation(
            "Please enter a valid email address".to_string(),
        ));
    }

    let tool_name = req.tool_name.as_deref().unwrap_or("unknown");
    let timestamp = req.timestamp.unwrap_or_else(|| Utc::now().to_rfc3339());
    info!(tool_name, %timestamp, client = %client, "Email captured");

    state.events.record(
        AnalyticsEvent::new(EventName::EmailCaptured).with("tool_name", tool_name),
    );

    Ok(Json(EmailCaptureResponse {
        message: "Email captured successfully".to_string(),
        success: true,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_email_pattern() {
        assert!(is_valid_email("vet@example.com"));
        assert!(is_valid_email("first.last+tag@mail.example.org"));
        assert!(!is_valid_email("no-at-sign.com"));
        assert!(!is_valid_email("two@@example.com"));
        assert!(!is_valid_email("user@localhost"));
        assert!(!is_valid_email("spaced out@example.com"));
    }

    #[test]
    fn test_client_key_prefers_first_forwarded_hop() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("203.0.113.7, 10.0.0.1"));
        headers.insert("x-real-ip", HeaderValue::from_static("198.51.100.2"));
        assert_eq!(client_key(&headers), "203.0.113.7");
    }

    #[test]
    fn test_client_key_falls_back_to_real_ip_then_unknown() {
        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", HeaderValue::from_static("198.51.100.2"));
        assert_eq!(client_key(&headers), "198.51.100.2");
        assert_eq!(client_key(&HeaderMap::new()), "unknown");
    }
}
