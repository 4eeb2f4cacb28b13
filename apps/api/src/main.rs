mod analytics;
mod compensation;
mod config;
mod credentials;
mod email;
mod errors;
mod housing;
mod llm_client;
mod military;
mod money;
mod resume;
mod routes;
mod state;
mod tax;
mod translator;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analytics::TracingEventSink;
use crate::config::Config;
use crate::email::rate_limit::ClientRateLimiter;
use crate::llm_client::LlmClient;
use crate::resume::relay::TextChunkSource;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={},analytics={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log,
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting transition API v{}", env!("CARGO_PKG_VERSION"));

    // Streaming completions for the resume builder are optional
    let chunk_source: Option<Arc<dyn TextChunkSource>> = match &config.anthropic_api_key {
        Some(key) => {
            let llm = LlmClient::new(key.clone())?;
            info!("LLM client initialized (model: {})", llm_client::MODEL);
            Some(Arc::new(llm))
        }
        None => {
            warn!("ANTHROPIC_API_KEY not set; resume generation disabled");
            None
        }
    };

    let window = Duration::from_secs(config.email_rate_limit_window_secs);
    let rate_limiter = Arc::new(ClientRateLimiter::new(
        config.email_rate_limit_max,
        window,
    )?);
    info!(
        "Email capture limited to {} requests per {}s",
        config.email_rate_limit_max,
        window.as_secs()
    );

    // Replenished client keys are dropped once per window length
    let purge_target = rate_limiter.clone();
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(window.max(Duration::from_secs(1)));
        loop {
            ticker.tick().await;
            let removed = purge_target.purge_expired();
            if removed > 0 {
                debug!("Purged {removed} idle rate-limit keys");
            }
        }
    });

    let state = AppState {
        chunk_source,
        rate_limiter,
        events: Arc::new(TracingEventSink),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
