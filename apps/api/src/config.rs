use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every calculator works without configuration; only resume generation
/// needs an API key.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: Option<String>,
    pub port: u16,
    pub rust_log: String,
    pub email_rate_limit_max: u32,
    pub email_rate_limit_window_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
            port: parse_env("PORT", 8080).context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            email_rate_limit_max: parse_env("EMAIL_RATE_LIMIT_MAX", 5)
                .context("EMAIL_RATE_LIMIT_MAX must be a positive integer")?,
            email_rate_limit_window_secs: parse_env("EMAIL_RATE_LIMIT_WINDOW_SECS", 60)
                .context("EMAIL_RATE_LIMIT_WINDOW_SECS must be a positive integer")?,
        })
    }
}

/// Unset and blank both count as absent.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("Invalid value '{raw}' for environment variable '{key}'")),
        None => Ok(default),
    }
}
